//! Toctree navigation for RW.
//!
//! Assembles the global navigation of a documentation site from the
//! `toctree` directives declared in its documents. Each directive becomes a
//! [`Section`] listing [`Page`]s; sections declared on listed pages are
//! nested beneath them, producing one tree rooted at the sections of the
//! root document.
//!
//! This crate provides:
//! - [`NavigationTree`]: builds the tree from a [`DocumentGraph`] and renders it
//! - [`Toctree`]: arena of pages and sections with insertion and lineage
//! - [`SectionRef`] / [`PageRef`]: relationship queries over tree nodes
//! - [`TocConfig`]: `[toctree]` settings from `rw.toml`
//! - [`MockDocumentGraph`] for testing (behind `mock` feature flag)
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use rw_toctree::{
//!     DirectiveRecord, DocumentGraph, GraphError, NavigationTree, RenderFormat, TocConfig,
//! };
//!
//! struct Docs;
//!
//! impl DocumentGraph for Docs {
//!     fn directives(&self, doc: &str) -> Result<Vec<DirectiveRecord>, GraphError> {
//!         Ok(match doc {
//!             "index" => vec![DirectiveRecord::new(
//!                 "index",
//!                 Some("Contents"),
//!                 [("Guide", "guide"), ("API", "api")],
//!             )],
//!             _ => Vec::new(),
//!         })
//!     }
//! }
//!
//! let config = TocConfig::load(None)?;
//! let mut nav = NavigationTree::new(Arc::new(Docs), config);
//! nav.initialize()?;
//!
//! let html = nav.render(RenderFormat::Html, "guide")?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod navigation;
mod node;
mod relation;
mod render;
mod tree;

pub use config::{ConfigError, TocConfig};
pub use error::{GraphError, TocError};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockDocumentGraph;
pub use navigation::{DirectiveRecord, DocumentGraph, NavigationTree, TocEntry};
pub use node::{LineageItem, Node, NodeId, Page, Section, is_external};
pub use relation::{Candidate, PageRef, Relation, SectionRef};
pub use render::{
    DefaultRenderHelpers, NavNode, RenderFormat, RenderHelpers, escape_html, relative_path,
};
pub use tree::{ChildSelector, Toctree};
