//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree model.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cycle detected in parent relation at record: {0}")]
    CycleDetected(String),

    #[error("identity appears more than once in the tree: {0}")]
    DuplicateIdentity(String),

    #[error("unsupported relationship kind: {0} (expected belongs_to or belongs_to_many)")]
    UnsupportedRelationship(String),
}
