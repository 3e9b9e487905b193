//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an account (the account holder's name).
///
/// Never blank. Two accounts are the same account iff their ids are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create an identifier, rejecting blank (empty or whitespace-only) names.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid("account name cannot be blank"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        for name in ["", " ", "\t\n"] {
            match AccountId::new(name) {
                Err(DomainError::InvalidArgument(_)) => {}
                other => panic!("expected InvalidArgument for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn name_is_kept_verbatim() {
        let id: AccountId = "Alice".parse().unwrap();
        assert_eq!(id.as_str(), "Alice");
        assert_eq!(id.to_string(), "Alice");
    }

    #[test]
    fn serde_is_transparent_and_validating() {
        let id = AccountId::new("Bob").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Bob\"");
        assert!(serde_json::from_str::<AccountId>("\"  \"").is_err());
    }
}
