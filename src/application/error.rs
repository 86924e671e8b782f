//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{AccessDenied, DomainError};

/// Error raised by an outside collaborator (persistence, item collection).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Application errors wrap domain errors and add collaborator failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    PermissionDenied(#[from] AccessDenied),

    #[error("operation failed: {context}")]
    Collaborator {
        context: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// Wrap a collaborator failure, keeping the original error as source.
    pub fn collaborator(context: impl Into<String>, source: CollaboratorError) -> Self {
        Self::Collaborator {
            context: context.into(),
            source,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
