use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use retailbank_core::{AccountId, Amount, DomainError, DomainResult};

/// One side of an account's IOUs: peer id -> strictly positive amount.
///
/// Entries keep the order in which they were first recorded; an entry that is
/// paid off and later recreated moves to the end. Zero entries never exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtBook {
    entries: IndexMap<AccountId, Amount>,
}

/// A single debt line, as shown to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtLine {
    pub peer: AccountId,
    pub amount: Amount,
}

impl DebtBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, peer: &AccountId) -> Option<Amount> {
        self.entries.get(peer).copied()
    }

    pub fn contains(&self, peer: &AccountId) -> bool {
        self.entries.contains_key(peer)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, Amount)> + '_ {
        self.entries.iter().map(|(peer, amount)| (peer, *amount))
    }

    pub fn total(&self) -> i128 {
        self.entries.values().map(|v| *v as i128).sum()
    }

    pub fn lines(&self) -> Vec<DebtLine> {
        self.iter()
            .map(|(peer, amount)| DebtLine {
                peer: peer.clone(),
                amount,
            })
            .collect()
    }

    /// The value `adjust` would store, without touching the book.
    ///
    /// Fails if the result would be negative or overflow.
    pub fn preview(&self, peer: &AccountId, delta: Amount) -> DomainResult<Amount> {
        let current = self.get(peer).unwrap_or(0);
        let next = current.checked_add(delta).ok_or_else(|| {
            DomainError::invariant(format!("debt with {peer} overflows ({current} + {delta})"))
        })?;
        if next < 0 {
            return Err(DomainError::invariant(format!(
                "debt with {peer} would become negative ({current} + {delta})"
            )));
        }
        Ok(next)
    }

    /// Add `delta` (positive or negative) to the entry for `peer`.
    ///
    /// A result of zero removes the entry. Returns the new value.
    pub fn adjust(&mut self, peer: &AccountId, delta: Amount) -> DomainResult<Amount> {
        let next = self.preview(peer, delta)?;
        if next == 0 {
            self.entries.shift_remove(peer);
        } else if let Some(slot) = self.entries.get_mut(peer) {
            *slot = next;
        } else {
            self.entries.insert(peer.clone(), next);
        }
        Ok(next)
    }

    pub fn remove(&mut self, peer: &AccountId) -> Option<Amount> {
        self.entries.shift_remove(peer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> AccountId {
        AccountId::new(name).unwrap()
    }

    #[test]
    fn adjust_creates_increments_and_removes_at_zero() {
        let mut book = DebtBook::new();
        assert_eq!(book.adjust(&id("Alice"), 50).unwrap(), 50);
        assert_eq!(book.adjust(&id("Alice"), 25).unwrap(), 75);
        assert_eq!(book.adjust(&id("Alice"), -75).unwrap(), 0);
        assert!(!book.contains(&id("Alice")));
        assert!(book.is_empty());
    }

    #[test]
    fn zero_delta_on_absent_entry_is_a_noop() {
        let mut book = DebtBook::new();
        book.adjust(&id("Alice"), 0).unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn negative_result_is_rejected_and_book_unchanged() {
        let mut book = DebtBook::new();
        book.adjust(&id("Alice"), 10).unwrap();
        let err = book.adjust(&id("Alice"), -11).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(book.get(&id("Alice")), Some(10));

        let err = book.adjust(&id("Bob"), -1).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(!book.contains(&id("Bob")));
    }

    #[test]
    fn overflow_is_rejected() {
        let mut book = DebtBook::new();
        book.adjust(&id("Alice"), Amount::MAX).unwrap();
        assert!(book.adjust(&id("Alice"), 1).is_err());
        assert_eq!(book.get(&id("Alice")), Some(Amount::MAX));
    }

    #[test]
    fn iteration_follows_recording_order() {
        let mut book = DebtBook::new();
        book.adjust(&id("Carol"), 1).unwrap();
        book.adjust(&id("Alice"), 2).unwrap();
        book.adjust(&id("Bob"), 3).unwrap();
        // Updating an existing entry keeps its position.
        book.adjust(&id("Carol"), 4).unwrap();
        // Paid off and recreated moves to the end.
        book.adjust(&id("Alice"), -2).unwrap();
        book.adjust(&id("Alice"), 9).unwrap();

        let order: Vec<(&str, Amount)> = book.iter().map(|(p, a)| (p.as_str(), a)).collect();
        assert_eq!(order, vec![("Carol", 5), ("Bob", 3), ("Alice", 9)]);
        assert_eq!(book.total(), 17);
    }
}
