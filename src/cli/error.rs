//! CLI-level errors (wraps infrastructure and application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

fn application_exit_code(e: &ApplicationError) -> i32 {
    match e {
        ApplicationError::Domain(_) => crate::exitcode::DATAERR,
        ApplicationError::PermissionDenied(_) => crate::exitcode::NOPERM,
        ApplicationError::Config { .. } => crate::exitcode::CONFIG,
        ApplicationError::Collaborator { .. } => crate::exitcode::SOFTWARE,
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => application_exit_code(e),
            CliError::Infra(e) => match e {
                InfraError::Application(e) => application_exit_code(e),
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Format { .. } => crate::exitcode::DATAERR,
                InfraError::ItemExists(_) => crate::exitcode::CANTCREAT,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccessDenied, DomainError, Permission};

    #[test]
    fn given_denied_permission_then_noperm() {
        let err = CliError::from(ApplicationError::from(AccessDenied {
            permission: Permission::CreateView,
            reason: "no".into(),
        }));
        assert_eq!(err.exit_code(), crate::exitcode::NOPERM);
    }

    #[test]
    fn given_wrapped_domain_error_then_dataerr() {
        let err = CliError::from(InfraError::from(ApplicationError::from(
            DomainError::NameTaken("x".into()),
        )));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }
}
