//! Navigation tree orchestration.
//!
//! [`NavigationTree`] builds a [`Toctree`] from the directives of a site's
//! documents. It starts from the configured root document and expands
//! every page listed by a newly placed section, depth-first, until all
//! reachable documents have been visited.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use rw_toctree::{DirectiveRecord, GraphError, DocumentGraph, NavigationTree, TocConfig};
//!
//! struct Docs;
//!
//! impl DocumentGraph for Docs {
//!     fn directives(&self, doc: &str) -> Result<Vec<DirectiveRecord>, GraphError> {
//!         Ok(match doc {
//!             "index" => vec![DirectiveRecord::new("index", None, [("Guide", "guide")])],
//!             _ => Vec::new(),
//!         })
//!     }
//! }
//!
//! let mut nav = NavigationTree::new(Arc::new(Docs), TocConfig::default());
//! nav.initialize()?;
//!
//! assert!(nav.is_initialized());
//! assert_eq!(nav.tree().pages().count(), 1);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::TocConfig;
use crate::error::{GraphError, TocError};
use crate::node::{LineageItem, NodeId};
use crate::relation::{PageRef, SectionRef};
use crate::render::{DefaultRenderHelpers, RenderHelpers};
use crate::tree::Toctree;

/// One `(title, destination)` entry of a toctree directive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Entry title.
    pub title: String,
    /// Destination slug or external URL.
    pub slug: String,
}

impl TocEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
        }
    }
}

/// Toctree directive as extracted from a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveRecord {
    /// Slug of the document that declares the directive.
    pub target_document: String,
    /// Listed pages in declaration order.
    pub entries: Vec<TocEntry>,
    /// Optional caption.
    #[serde(default)]
    pub caption: Option<String>,
}

impl DirectiveRecord {
    pub fn new<'a>(
        target_document: impl Into<String>,
        caption: Option<&str>,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            target_document: target_document.into(),
            entries: entries
                .into_iter()
                .map(|(title, slug)| TocEntry::new(title, slug))
                .collect(),
            caption: caption.map(str::to_owned),
        }
    }

    /// Caption, treating an empty caption as absent.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.caption.as_deref().filter(|c| !c.is_empty())
    }
}

/// Source of toctree directives, keyed by document slug.
pub trait DocumentGraph: Send + Sync {
    /// Directives declared in `doc`, in document order.
    fn directives(&self, doc: &str) -> Result<Vec<DirectiveRecord>, GraphError>;
}

/// Navigation tree for one site build.
///
/// Mutated only by [`initialize`](Self::initialize) and
/// [`add_section`](Self::add_section); once initialized it can be shared
/// for read-only queries.
pub struct NavigationTree {
    graph: Arc<dyn DocumentGraph>,
    pub(crate) helpers: Arc<dyn RenderHelpers>,
    pub(crate) config: TocConfig,
    pub(crate) tree: Toctree,
    root: Option<String>,
    initialized: bool,
    expanded: HashSet<String>,
}

impl NavigationTree {
    /// Create an empty navigation tree.
    ///
    /// # Arguments
    ///
    /// * `graph` - Source of directive records for each document
    /// * `config` - Root document and rendering options
    #[must_use]
    pub fn new(graph: Arc<dyn DocumentGraph>, config: TocConfig) -> Self {
        Self {
            graph,
            helpers: Arc::new(DefaultRenderHelpers),
            config,
            tree: Toctree::new(),
            root: None,
            initialized: false,
            expanded: HashSet::new(),
        }
    }

    /// Replace the title and link helpers used when rendering.
    #[must_use]
    pub fn with_render_helpers(mut self, helpers: Arc<dyn RenderHelpers>) -> Self {
        self.helpers = helpers;
        self
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Root document slug, set by [`initialize`](Self::initialize).
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    #[must_use]
    pub fn tree(&self) -> &Toctree {
        &self.tree
    }

    #[must_use]
    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    /// Root sections in declaration order.
    #[must_use]
    pub fn sections(&self) -> Vec<SectionRef<'_>> {
        self.tree
            .root_sections()
            .iter()
            .filter_map(|&id| self.tree.section(id))
            .collect()
    }

    /// Get page by slug.
    #[must_use]
    pub fn page(&self, slug: &str) -> Option<PageRef<'_>> {
        self.tree.page_by_slug(slug)
    }

    /// Breadcrumbs for the page with the given slug.
    #[must_use]
    pub fn lineage(&self, slug: &str) -> Option<Vec<LineageItem>> {
        self.page(slug).map(|page| page.lineage())
    }

    /// Build the tree from the configured root document.
    ///
    /// Does nothing once the tree has been initialized.
    ///
    /// # Errors
    ///
    /// Returns `TocError::DocumentGraph` if the root document cannot be read.
    /// The tree is then left empty and uninitialized, so the call can be
    /// retried. Documents further down that cannot be read are logged and
    /// left unexpanded.
    pub fn initialize(&mut self) -> Result<(), TocError> {
        if self.initialized {
            return Ok(());
        }

        let root = self.config.root_doc.clone();
        self.root = Some(root.clone());
        if let Err(e) = self.expand(&root) {
            // Leave nothing behind so a later call starts from scratch.
            self.root = None;
            self.tree = Toctree::new();
            self.expanded.clear();
            return Err(e);
        }
        self.initialized = true;

        tracing::info!(
            root = %root,
            section_count = self.tree.sections().count(),
            page_count = self.tree.pages().count(),
            "Navigation tree initialized"
        );
        Ok(())
    }

    /// Fetch the directives of `doc`, place each one, and expand the pages
    /// it lists before moving on to the next directive.
    fn expand(&mut self, doc: &str) -> Result<(), TocError> {
        if !self.expanded.insert(doc.to_owned()) {
            return Ok(());
        }

        let records = match self.graph.directives(doc) {
            Ok(records) => records,
            Err(e) if self.root.as_deref() != Some(doc) => {
                tracing::warn!(doc = %doc, error = %e, "Failed to read document directives");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(doc = %doc, directive_count = records.len(), "Expanding document");

        for record in &records {
            let Some(section) = self.add_section(record)? else {
                continue;
            };
            let pending: Vec<String> = self
                .tree
                .child_pages(section)
                .into_iter()
                .filter(|page| !page.is_external())
                .map(|page| page.slug.clone())
                .collect();
            for slug in pending {
                self.expand(&slug)?;
            }
        }
        Ok(())
    }

    /// Insert a section into the tree.
    ///
    /// Sections declared on the root document become root sections. Others
    /// are offered to each root section in turn. A section that fits nowhere,
    /// or that lists a page already in the tree, is logged and skipped, and
    /// `Ok(None)` is returned.
    pub fn add_section(&mut self, record: &DirectiveRecord) -> Result<Option<NodeId>, TocError> {
        match self.place_section(record) {
            Ok(id) => {
                tracing::debug!(
                    defined_on = %record.target_document,
                    label = ?record.label(),
                    "Added section"
                );
                Ok(Some(id))
            }
            Err(
                e @ (TocError::StructuralInsertionFailure { .. } | TocError::DuplicateSlug { .. }),
            ) => {
                tracing::warn!(
                    defined_on = %record.target_document,
                    label = ?record.label(),
                    error = %e,
                    "Failed to add section"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn place_section(&mut self, record: &DirectiveRecord) -> Result<NodeId, TocError> {
        if self.root.as_deref() == Some(record.target_document.as_str()) {
            return self.tree.add_root_section(record);
        }

        let roots = self.tree.root_sections().to_vec();
        for root in roots {
            if let Some(id) = self.tree.add_descendant_section(root, record)? {
                return Ok(id);
            }
        }

        Err(TocError::StructuralInsertionFailure {
            defined_on: record.target_document.clone(),
        })
    }
}
