//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Permission;

/// Domain errors represent violations of the tree's naming and shape rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed view request '{name}': {reason}")]
    MalformedRequest { name: String, reason: String },

    #[error("a view named '{0}' already exists at this level")]
    NameTaken(String),

    #[error("view is not a container: {0}")]
    NotAContainer(String),

    #[error("view does not belong to this tree: {0}")]
    ForeignNode(String),

    #[error("invalid indentation depth: {0}")]
    InvalidDepth(String),
}

impl DomainError {
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRequest {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Returned by a permission check that refused an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("permission denied: {permission}: {reason}")]
pub struct AccessDenied {
    pub permission: Permission,
    pub reason: String,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
