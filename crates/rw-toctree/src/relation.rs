//! Relationship queries over a built tree.
//!
//! [`SectionRef`] and [`PageRef`] borrow a node together with its tree.
//! Only sections answer relationship questions directly; the descendant and
//! child relations are always evaluated from the other side, as
//! `other.is_ancestor_of(self)` and `other.is_parent_of(self)`, so the two
//! directions cannot disagree.

use std::fmt;

use crate::error::TocError;
use crate::node::{LineageItem, Node, NodeId, Page, Section};
use crate::tree::{ChildSelector, Toctree};

/// Relationship a section may have to a candidate node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Candidate is somewhere below the section.
    Ancestor,
    /// Candidate shares the section's parent.
    Sibling,
    /// Candidate is a direct child of the section.
    Parent,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ancestor => "ancestor",
            Self::Sibling => "sibling",
            Self::Parent => "parent",
        };
        f.write_str(name)
    }
}

/// Node a relationship is tested against.
#[derive(Clone, Copy, Debug)]
pub enum Candidate<'a> {
    /// Page slug, matched against the page pool.
    Slug(&'a str),
    /// Page or section, matched by identity against the pool of its kind.
    Node(NodeId),
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(slug: &'a str) -> Self {
        Self::Slug(slug)
    }
}

impl From<NodeId> for Candidate<'_> {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<PageRef<'_>> for Candidate<'_> {
    fn from(page: PageRef<'_>) -> Self {
        Self::Node(page.id())
    }
}

impl From<SectionRef<'_>> for Candidate<'_> {
    fn from(section: SectionRef<'_>) -> Self {
        Self::Node(section.id())
    }
}

/// Borrowed view of a section.
#[derive(Clone, Copy, Debug)]
pub struct SectionRef<'a> {
    tree: &'a Toctree,
    section: &'a Section,
}

impl<'a> SectionRef<'a> {
    pub(crate) fn new(tree: &'a Toctree, section: &'a Section) -> Self {
        Self { tree, section }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.section.id
    }

    #[must_use]
    pub fn section(&self) -> &'a Section {
        self.section
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.section.is_root
    }

    #[must_use]
    pub fn defined_on(&self) -> &'a str {
        &self.section.defined_on
    }

    #[must_use]
    pub fn label(&self) -> Option<&'a str> {
        self.section.label.as_deref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.section.parent
    }

    #[must_use]
    pub fn children(&self) -> &'a [NodeId] {
        &self.section.children
    }

    #[must_use]
    pub fn child_pages(&self) -> Vec<&'a Page> {
        self.tree.child_pages(self.id())
    }

    #[must_use]
    pub fn child_sections(&self) -> Vec<&'a Section> {
        self.tree.child_sections(self.id())
    }

    /// All pages and sections below this section.
    #[must_use]
    pub fn descendants(&self) -> Vec<NodeId> {
        self.tree.descendants(self.id())
    }

    #[must_use]
    pub fn descendant_pages(&self) -> Vec<&'a Page> {
        self.pages_in(&self.descendants())
    }

    #[must_use]
    pub fn descendant_sections(&self) -> Vec<&'a Section> {
        self.sections_in(&self.descendants())
    }

    #[must_use]
    pub fn siblings(&self) -> Vec<NodeId> {
        self.tree.siblings(self.id())
    }

    #[must_use]
    pub fn sibling_pages(&self) -> Vec<&'a Page> {
        self.pages_in(&self.siblings())
    }

    #[must_use]
    pub fn sibling_sections(&self) -> Vec<&'a Section> {
        self.sections_in(&self.siblings())
    }

    fn pool(&self, relation: Relation) -> Vec<NodeId> {
        match relation {
            Relation::Ancestor => self.descendants(),
            Relation::Sibling => self.siblings(),
            Relation::Parent => self.children().to_vec(),
        }
    }

    fn pages_in(&self, ids: &[NodeId]) -> Vec<&'a Page> {
        let tree: &'a Toctree = self.tree;
        ids.iter()
            .filter_map(|&id| tree.node(id).and_then(Node::as_page))
            .collect()
    }

    fn sections_in(&self, ids: &[NodeId]) -> Vec<&'a Section> {
        let tree: &'a Toctree = self.tree;
        ids.iter()
            .filter_map(|&id| tree.node(id).and_then(Node::as_section))
            .collect()
    }

    /// Test whether this section has `relation` to `candidate`.
    ///
    /// A slug is compared against the slugs of the page pool. A node id is
    /// compared by identity against the pool of its own kind, and fails with
    /// [`TocError::InvalidCandidateType`] if it is not a node of this tree.
    pub fn has_relation<'c>(
        &self,
        relation: Relation,
        candidate: impl Into<Candidate<'c>>,
    ) -> Result<bool, TocError> {
        let pool = self.pool(relation);
        match candidate.into() {
            Candidate::Slug(slug) => Ok(self.pages_in(&pool).iter().any(|p| p.slug == slug)),
            Candidate::Node(id) => match self.tree.node(id) {
                Some(Node::Page(_)) => Ok(self.pages_in(&pool).iter().any(|p| p.id == id)),
                Some(Node::Section(_)) => Ok(self.sections_in(&pool).iter().any(|s| s.id == id)),
                None => Err(TocError::InvalidCandidateType { relation }),
            },
        }
    }

    pub fn is_ancestor_of<'c>(
        &self,
        candidate: impl Into<Candidate<'c>>,
    ) -> Result<bool, TocError> {
        self.has_relation(Relation::Ancestor, candidate)
    }

    pub fn is_parent_of<'c>(
        &self,
        candidate: impl Into<Candidate<'c>>,
    ) -> Result<bool, TocError> {
        self.has_relation(Relation::Parent, candidate)
    }

    pub fn is_sibling_of<'c>(
        &self,
        candidate: impl Into<Candidate<'c>>,
    ) -> Result<bool, TocError> {
        self.has_relation(Relation::Sibling, candidate)
    }

    pub fn is_descendant_of(&self, other: SectionRef<'_>) -> Result<bool, TocError> {
        other.is_ancestor_of(self.id())
    }

    pub fn is_child_of(&self, other: SectionRef<'_>) -> Result<bool, TocError> {
        other.is_parent_of(self.id())
    }

    /// Look up a direct child by slug or id.
    pub fn get_child(&self, selector: ChildSelector<'_>) -> Result<NodeId, TocError> {
        self.tree.get_child(self.id(), selector)
    }

    #[must_use]
    pub fn lineage_item(&self) -> LineageItem {
        // The id always resolves: `self` was built from this tree.
        self.tree
            .lineage_item(self.id())
            .unwrap_or(LineageItem::Section {
                text: None,
                slug: None,
                link: None,
            })
    }

    #[must_use]
    pub fn lineage(&self) -> Vec<LineageItem> {
        self.tree.lineage(self.id()).unwrap_or_default()
    }
}

/// Borrowed view of a page.
#[derive(Clone, Copy, Debug)]
pub struct PageRef<'a> {
    tree: &'a Toctree,
    page: &'a Page,
}

impl<'a> PageRef<'a> {
    pub(crate) fn new(tree: &'a Toctree, page: &'a Page) -> Self {
        Self { tree, page }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.page.id
    }

    #[must_use]
    pub fn page(&self) -> &'a Page {
        self.page
    }

    #[must_use]
    pub fn title(&self) -> &'a str {
        &self.page.title
    }

    #[must_use]
    pub fn slug(&self) -> &'a str {
        &self.page.slug
    }

    /// The section listing this page.
    #[must_use]
    pub fn parent(&self) -> Option<SectionRef<'a>> {
        self.tree.section(self.page.parent)
    }

    /// Sections declared on this page.
    #[must_use]
    pub fn sections(&self) -> Vec<SectionRef<'a>> {
        let tree: &'a Toctree = self.tree;
        self.page
            .children
            .iter()
            .filter_map(|&id| tree.section(id))
            .collect()
    }

    pub fn is_descendant_of(&self, other: SectionRef<'_>) -> Result<bool, TocError> {
        other.is_ancestor_of(self.id())
    }

    pub fn is_child_of(&self, other: SectionRef<'_>) -> Result<bool, TocError> {
        other.is_parent_of(self.id())
    }

    #[must_use]
    pub fn lineage_item(&self) -> LineageItem {
        self.page.lineage_item()
    }

    #[must_use]
    pub fn lineage(&self) -> Vec<LineageItem> {
        self.tree.lineage(self.id()).unwrap_or_default()
    }
}
