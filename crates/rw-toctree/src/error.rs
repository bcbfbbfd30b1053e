//! Error types for tree assembly and queries.

use crate::relation::Relation;

/// Error returned by the document graph collaborator.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The document does not exist.
    #[error("Document not found: {0}")]
    NotFound(String),
    /// The document exists but its directives could not be read.
    #[error("Failed to read directives from {doc}: {message}")]
    Other {
        /// Document identifier.
        doc: String,
        /// Backend-specific description.
        message: String,
    },
}

/// Error returned by navigation tree operations.
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// Relationship query given a node this tree does not know.
    #[error("A section can only be the {relation} of a page, section, or slug; got unknown node")]
    InvalidCandidateType {
        /// Relation being tested.
        relation: Relation,
    },
    /// Child lookup given zero or two selectors.
    #[error("Exactly one of slug or id must be given to select a child")]
    AmbiguousSelector,
    /// No child matched the selector.
    #[error("Could not find a child with the specified {selector}")]
    ChildNotFound {
        /// Selector kind that was used ("slug" or "id").
        selector: &'static str,
    },
    /// The section's declaring page is not reachable from any root section.
    #[error(
        "Section defined on '{defined_on}' is not root and is not nested inside a root section"
    )]
    StructuralInsertionFailure {
        /// Slug of the page that declared the directive.
        defined_on: String,
    },
    /// A directive lists a slug that is already in the tree.
    #[error("Page '{slug}' is already listed in the navigation tree")]
    DuplicateSlug {
        /// Offending slug.
        slug: String,
    },
    /// Node id does not belong to this tree or has the wrong kind.
    #[error("Unknown node")]
    UnknownNode,
    /// Document graph failure.
    #[error(transparent)]
    DocumentGraph(#[from] GraphError),
    /// JSON serialization failure while rendering.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
