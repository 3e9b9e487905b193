use thiserror::Error;

use retailbank_core::DomainError;

use crate::command::CommandError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Errors the console reports and then keeps reading input after.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Command(_) | Self::Domain(_))
    }
}
