//! Domain error model.

use thiserror::Error;

use crate::id::AccountId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Validation failures ("fix your input") are kept apart from domain-state
/// failures ("the ledger is broken") so callers can decide whether to prompt
/// again or abort.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Blank identifier, negative amount, self-payment.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation that needs an active session was invoked without one.
    #[error("not logged in")]
    NotLoggedIn,

    /// A named counterparty does not exist in the directory.
    #[error("unknown account: {0}")]
    UnknownAccount(AccountId),

    /// A debt entry refers to an account the directory cannot resolve.
    #[error("ledger inconsistency: {0}")]
    LedgerInconsistency(String),

    /// A caller broke an invariant (negative debt, overdraft, poisoned lock).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn inconsistency(msg: impl Into<String>) -> Self {
        Self::LedgerInconsistency(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn unknown_account(id: AccountId) -> Self {
        Self::UnknownAccount(id)
    }

    /// Whether the error signals corrupted state rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::LedgerInconsistency(_) | Self::InvariantViolation(_)
        )
    }
}
