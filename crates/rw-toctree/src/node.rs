//! Navigation tree nodes.
//!
//! A navigation tree is made of two node kinds:
//! - [`Page`]: one document, addressed by its slug
//! - [`Section`]: the expansion of one toctree directive, holding the pages
//!   it lists
//!
//! Nodes live in the arena owned by [`Toctree`](crate::Toctree) and refer to
//! each other by [`NodeId`]. Parent links are plain ids, so they never own
//! the node they point at.

use serde::Serialize;

/// Opaque node handle.
///
/// Ids are assigned when a node is attached to a tree and stay stable for
/// the lifetime of that tree. The arena is append-only, so an id is never
/// reused. Ids are only meaningful for the tree that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Returns true for destinations that point outside the site.
///
/// External pages are terminal: they are never fetched or expanded.
#[must_use]
pub fn is_external(slug: &str) -> bool {
    slug.starts_with("http://") || slug.starts_with("https://")
}

/// Breadcrumb descriptor for a single node.
///
/// Serializes to the flat JSON shape consumed by page templates:
/// `{"title", "slug", "link"}` for pages and `{"text", "slug", "link"}`
/// for sections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LineageItem {
    /// Breadcrumb for a page.
    Page {
        /// Page title.
        title: String,
        /// Page slug.
        slug: String,
        /// Link target (the slug itself).
        link: String,
    },
    /// Breadcrumb for a section.
    Section {
        /// Section caption.
        text: Option<String>,
        /// Slug of the declaring page (`None` for root sections).
        slug: Option<String>,
        /// Overview link: first child page of a root section.
        link: Option<String>,
    },
}

/// A document in the navigation tree.
#[derive(Clone, Debug)]
pub struct Page {
    pub(crate) id: NodeId,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) parent: NodeId,
    pub(crate) children: Vec<NodeId>,
}

impl Page {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// The section listing this page.
    #[must_use]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Sections declared on this page, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn is_external(&self) -> bool {
        is_external(&self.slug)
    }

    #[must_use]
    pub fn lineage_item(&self) -> LineageItem {
        LineageItem::Page {
            title: self.title.clone(),
            slug: self.slug.clone(),
            link: self.slug.clone(),
        }
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Page {}

/// The expansion of one toctree directive.
#[derive(Clone, Debug)]
pub struct Section {
    pub(crate) id: NodeId,
    pub(crate) is_root: bool,
    pub(crate) defined_on: String,
    pub(crate) label: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Section {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// True if the directive was declared on the root document.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Slug of the page whose source declared this directive.
    #[must_use]
    pub fn defined_on(&self) -> &str {
        &self.defined_on
    }

    /// Directive caption.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Enclosing section or page. `None` only for root sections.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in declaration order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Section {}

/// A node stored in the tree arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Page(Page),
    Section(Section),
}

impl Node {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Page(page) => page.id,
            Self::Section(section) => section.id,
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Self::Page(page) => Some(page.parent),
            Self::Section(section) => section.parent,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Page(page) => &page.children,
            Self::Section(section) => &section.children,
        }
    }

    #[must_use]
    pub fn as_page(&self) -> Option<&Page> {
        match self {
            Self::Page(page) => Some(page),
            Self::Section(_) => None,
        }
    }

    #[must_use]
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Self::Section(section) => Some(section),
            Self::Page(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        match self {
            Self::Page(page) => &mut page.children,
            Self::Section(section) => &mut section.children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page(index: usize, slug: &str) -> Page {
        Page {
            id: NodeId::new(index),
            title: "Guide".to_owned(),
            slug: slug.to_owned(),
            parent: NodeId::new(0),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_is_external_detects_http_and_https() {
        assert!(is_external("http://example.com"));
        assert!(is_external("https://example.com/docs"));
        assert!(!is_external("guide"));
        assert!(!is_external("httpd/setup"));
    }

    #[test]
    fn test_page_equality_uses_identity() {
        let a = page(1, "guide");
        let b = page(1, "other");
        let c = page(2, "guide");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_page_lineage_item_links_to_slug() {
        let item = page(1, "guide").lineage_item();

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"title": "Guide", "slug": "guide", "link": "guide"})
        );
    }

    #[test]
    fn test_section_lineage_item_serializes_nulls() {
        let item = LineageItem::Section {
            text: None,
            slug: None,
            link: Some("guide".to_owned()),
        };

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"text": null, "slug": null, "link": "guide"})
        );
    }

    #[test]
    fn test_node_accessors_dispatch_by_kind() {
        let section = Node::Section(Section {
            id: NodeId::new(0),
            is_root: true,
            defined_on: "index".to_owned(),
            label: None,
            parent: None,
            children: vec![NodeId::new(1)],
        });
        let page = Node::Page(page(1, "guide"));

        assert_eq!(section.parent(), None);
        assert_eq!(section.children(), &[NodeId::new(1)]);
        assert!(section.as_page().is_none());
        assert_eq!(page.parent(), Some(NodeId::new(0)));
        assert_eq!(page.id(), NodeId::new(1));
        assert!(page.as_section().is_none());
    }
}
