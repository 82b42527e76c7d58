//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Serialize(_) => crate::exitcode::DATAERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Domain(DomainError::UnsupportedRelationship(_)) => {
                        crate::exitcode::CONFIG
                    }
                    ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_errors_when_mapping_exit_codes_then_follow_sysexits() {
        let cycle: CliError = ApplicationError::from(DomainError::CycleDetected("1".into())).into();
        let relation: CliError =
            ApplicationError::from(DomainError::UnsupportedRelationship("x".into())).into();
        let io = CliError::Infra(InfraError::io("write", std::io::Error::other("boom")));

        assert_eq!(cycle.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(relation.exit_code(), crate::exitcode::CONFIG);
        assert_eq!(io.exit_code(), crate::exitcode::IOERR);
        assert_eq!(CliError::Usage("x".into()).exit_code(), crate::exitcode::USAGE);
    }
}
