//! Navigation tree arena.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<Node>` with parent/children relationships
//! tracked by [`NodeId`]. This provides:
//! - O(1) node access by id
//! - O(1) page lookups by slug via `slug_index`
//! - O(d) lineage building where d is the node depth
//!
//! Nodes are only ever appended. A directive is validated and placed before
//! any node is allocated for it, so a failed insertion leaves the tree
//! untouched.

use std::collections::{HashMap, HashSet};

use crate::error::TocError;
use crate::navigation::DirectiveRecord;
use crate::node::{LineageItem, Node, NodeId, Page, Section, is_external};
use crate::relation::{Candidate, PageRef, SectionRef};

/// Child selector for [`Toctree::get_child`].
///
/// Exactly one of `slug` or `id` must be set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChildSelector<'a> {
    pub slug: Option<&'a str>,
    pub id: Option<NodeId>,
}

impl<'a> ChildSelector<'a> {
    /// Select a child page by slug.
    #[must_use]
    pub fn slug(slug: &'a str) -> Self {
        Self {
            slug: Some(slug),
            id: None,
        }
    }

    /// Select any child node by id.
    #[must_use]
    pub fn id(id: NodeId) -> Self {
        Self {
            slug: None,
            id: Some(id),
        }
    }
}

/// Arena-backed navigation tree.
#[derive(Debug, Default)]
pub struct Toctree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    slug_index: HashMap<String, NodeId>,
}

impl Toctree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn page(&self, id: NodeId) -> Option<PageRef<'_>> {
        let page = self.node(id)?.as_page()?;
        Some(PageRef::new(self, page))
    }

    #[must_use]
    pub fn section(&self, id: NodeId) -> Option<SectionRef<'_>> {
        let section = self.node(id)?.as_section()?;
        Some(SectionRef::new(self, section))
    }

    /// Get page by slug.
    ///
    /// External links may be listed more than once; the first occurrence
    /// is returned for those.
    #[must_use]
    pub fn page_by_slug(&self, slug: &str) -> Option<PageRef<'_>> {
        self.slug_index.get(slug).and_then(|&id| self.page(id))
    }

    /// Root sections in insertion order.
    #[must_use]
    pub fn root_sections(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all pages in allocation order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.nodes.iter().filter_map(Node::as_page)
    }

    /// Iterate over all sections in allocation order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.nodes.iter().filter_map(Node::as_section)
    }

    /// Breadcrumb descriptor for a node.
    ///
    /// Root sections link to their first child page (the section overview)
    /// and carry no slug; nested sections report the page they were
    /// declared on and no link.
    #[must_use]
    pub fn lineage_item(&self, id: NodeId) -> Option<LineageItem> {
        match self.node(id)? {
            Node::Page(page) => Some(page.lineage_item()),
            Node::Section(section) => {
                let link = if section.is_root {
                    self.child_pages(section.id).first().map(|p| p.slug.clone())
                } else {
                    None
                };
                Some(LineageItem::Section {
                    text: section.label.clone(),
                    slug: (!section.is_root).then(|| section.defined_on.clone()),
                    link,
                })
            }
        }
    }

    /// Ancestor chain of a node.
    ///
    /// Sections end with their own item. Pages end with their nearest
    /// ancestor and never include themselves.
    #[must_use]
    pub fn lineage(&self, id: NodeId) -> Option<Vec<LineageItem>> {
        match self.node(id)? {
            Node::Page(page) => self.lineage_through(page.parent),
            Node::Section(section) => {
                let mut lineage = match section.parent {
                    Some(parent) => self.lineage_through(parent)?,
                    None => Vec::new(),
                };
                lineage.push(self.lineage_item(id)?);
                Some(lineage)
            }
        }
    }

    /// Lineage of `parent` as seen by one of its children.
    ///
    /// A page's own lineage stops short of the page, so it is appended here.
    fn lineage_through(&self, parent: NodeId) -> Option<Vec<LineageItem>> {
        let mut lineage = self.lineage(parent)?;
        if let Node::Page(page) = self.node(parent)? {
            lineage.push(page.lineage_item());
        }
        Some(lineage)
    }

    pub(crate) fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    pub(crate) fn child_pages(&self, id: NodeId) -> Vec<&Page> {
        self.children_of(id)
            .iter()
            .filter_map(|&c| self.nodes[c.index()].as_page())
            .collect()
    }

    pub(crate) fn child_sections(&self, id: NodeId) -> Vec<&Section> {
        self.children_of(id)
            .iter()
            .filter_map(|&c| self.nodes[c.index()].as_section())
            .collect()
    }

    /// All nodes below `id`, depth-first in declaration order.
    ///
    /// Follows pages into the sections declared on them.
    pub(crate) fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children_of(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children_of(current).iter().rev());
        }
        result
    }

    /// Other children of the same parent. Root sections have no siblings.
    pub(crate) fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.node(id).and_then(Node::parent) else {
            return Vec::new();
        };
        self.children_of(parent)
            .iter()
            .copied()
            .filter(|&c| c != id)
            .collect()
    }

    /// Look up a direct child of a section.
    ///
    /// A slug only matches child pages; an id matches any child.
    pub fn get_child(
        &self,
        section: NodeId,
        selector: ChildSelector<'_>,
    ) -> Result<NodeId, TocError> {
        if self.node(section).and_then(Node::as_section).is_none() {
            return Err(TocError::UnknownNode);
        }
        match (selector.slug, selector.id) {
            (Some(slug), None) => self
                .child_pages(section)
                .into_iter()
                .find(|page| page.slug == slug)
                .map(|page| page.id)
                .ok_or(TocError::ChildNotFound { selector: "slug" }),
            (None, Some(id)) => self
                .children_of(section)
                .iter()
                .copied()
                .find(|&child| child == id)
                .ok_or(TocError::ChildNotFound { selector: "id" }),
            _ => Err(TocError::AmbiguousSelector),
        }
    }

    /// Add a section declared on the root document.
    pub fn add_root_section(&mut self, directive: &DirectiveRecord) -> Result<NodeId, TocError> {
        self.check_slugs(directive)?;
        let id = self.attach(None, directive, true);
        self.roots.push(id);
        Ok(id)
    }

    /// Place a section somewhere below `ancestor`.
    ///
    /// If the declaring page is a direct child of `ancestor`, a captioned
    /// section nests beside it under `ancestor` while an uncaptioned one
    /// nests under the page itself. Otherwise each child section is tried
    /// in turn, followed by the sections declared on child pages.
    ///
    /// Returns `Ok(None)` when no position below `ancestor` fits, leaving
    /// the tree unchanged.
    pub fn add_descendant_section(
        &mut self,
        ancestor: NodeId,
        directive: &DirectiveRecord,
    ) -> Result<Option<NodeId>, TocError> {
        let Some(parent) = self.find_placement(ancestor, directive)? else {
            return Ok(None);
        };
        self.check_slugs(directive)?;
        Ok(Some(self.attach(Some(parent), directive, false)))
    }

    fn find_placement(
        &self,
        ancestor: NodeId,
        directive: &DirectiveRecord,
    ) -> Result<Option<NodeId>, TocError> {
        let section = self.section(ancestor).ok_or(TocError::UnknownNode)?;

        if section.is_parent_of(Candidate::Slug(&directive.target_document))? {
            if directive.label().is_some() {
                return Ok(Some(ancestor));
            }
            let page = section.get_child(ChildSelector::slug(&directive.target_document))?;
            return Ok(Some(page));
        }

        let nested = self
            .child_sections(ancestor)
            .into_iter()
            .map(|s| s.id)
            .chain(
                self.child_pages(ancestor)
                    .into_iter()
                    .flat_map(|page| page.children.iter().copied()),
            );
        for child in nested {
            if let Some(parent) = self.find_placement(child, directive)? {
                return Ok(Some(parent));
            }
        }
        Ok(None)
    }

    /// Reject directives that would list an internal slug twice.
    fn check_slugs(&self, directive: &DirectiveRecord) -> Result<(), TocError> {
        let mut seen = HashSet::new();
        for entry in &directive.entries {
            if is_external(&entry.slug) {
                continue;
            }
            if self.slug_index.contains_key(&entry.slug) || !seen.insert(entry.slug.as_str()) {
                return Err(TocError::DuplicateSlug {
                    slug: entry.slug.clone(),
                });
            }
        }
        Ok(())
    }

    fn attach(
        &mut self,
        parent: Option<NodeId>,
        directive: &DirectiveRecord,
        is_root: bool,
    ) -> NodeId {
        let section_id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::Section(Section {
            id: section_id,
            is_root,
            defined_on: directive.target_document.clone(),
            label: directive.label().map(str::to_owned),
            parent,
            children: Vec::with_capacity(directive.entries.len()),
        }));

        for entry in &directive.entries {
            let page_id = NodeId::new(self.nodes.len());
            self.nodes.push(Node::Page(Page {
                id: page_id,
                title: entry.title.clone(),
                slug: entry.slug.clone(),
                parent: section_id,
                children: Vec::new(),
            }));
            self.slug_index.entry(entry.slug.clone()).or_insert(page_id);
            self.nodes[section_id.index()].children_mut().push(page_id);
        }

        if let Some(parent) = parent {
            self.nodes[parent.index()].children_mut().push(section_id);
        }

        section_id
    }
}
