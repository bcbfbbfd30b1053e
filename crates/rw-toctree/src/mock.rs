//! Mock document graph for testing.
//!
//! Provides [`MockDocumentGraph`] for building navigation trees without a
//! documentation backend.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::GraphError;
use crate::navigation::{DirectiveRecord, DocumentGraph};

/// In-memory document graph.
///
/// Documents are registered with the builder methods. Requests for
/// unregistered documents fail with [`GraphError::NotFound`].
///
/// # Example
///
/// ```ignore
/// use rw_toctree::{DirectiveRecord, DocumentGraph, MockDocumentGraph};
///
/// let graph = MockDocumentGraph::new()
///     .with_directive(DirectiveRecord::new("index", None, [("Guide", "guide")]))
///     .with_document("guide");
///
/// assert_eq!(graph.directives("index").unwrap().len(), 1);
/// assert!(graph.directives("guide").unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MockDocumentGraph {
    documents: RwLock<HashMap<String, Vec<DirectiveRecord>>>,
    failures: RwLock<HashMap<String, String>>,
    fetches: RwLock<HashMap<String, usize>>,
}

impl MockDocumentGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document with no directives.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, doc: impl Into<String>) -> Self {
        self.documents
            .write()
            .unwrap()
            .entry(doc.into())
            .or_default();
        self
    }

    /// Append a directive to its target document, registering the document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_directive(self, record: DirectiveRecord) -> Self {
        self.documents
            .write()
            .unwrap()
            .entry(record.target_document.clone())
            .or_default()
            .push(record);
        self
    }

    /// Make reads of `doc` fail with [`GraphError::Other`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, doc: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(doc.into(), message.into());
        self
    }

    /// Number of times directives were requested for `doc`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn fetch_count(&self, doc: &str) -> usize {
        self.fetches.read().unwrap().get(doc).copied().unwrap_or(0)
    }
}

impl DocumentGraph for MockDocumentGraph {
    fn directives(&self, doc: &str) -> Result<Vec<DirectiveRecord>, GraphError> {
        *self
            .fetches
            .write()
            .unwrap()
            .entry(doc.to_owned())
            .or_default() += 1;

        if let Some(message) = self.failures.read().unwrap().get(doc) {
            return Err(GraphError::Other {
                doc: doc.to_owned(),
                message: message.clone(),
            });
        }

        self.documents
            .read()
            .unwrap()
            .get(doc)
            .cloned()
            .ok_or_else(|| GraphError::NotFound(doc.to_owned()))
    }
}
