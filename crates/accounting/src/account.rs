use serde::{Deserialize, Serialize};

use retailbank_core::{AccountId, Amount, DomainError, DomainResult, Entity};

use crate::debts::{DebtBook, DebtLine};

/// Ledger entity: a cash balance plus IOUs in both directions.
///
/// `owes_to` is what this account owes its peers, `owes_from` is what peers
/// owe it. Every entry must be mirrored on the peer's opposite book; the
/// settlement engine is responsible for updating both sides together.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    balance: Amount,
    owes_to: DebtBook,
    owes_from: DebtBook,
}

impl Account {
    /// A fresh account with zero balance and no debts.
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            balance: 0,
            owes_to: DebtBook::new(),
            owes_from: DebtBook::new(),
        }
    }

    /// A fresh account with an opening balance (bootstrap/test data).
    pub fn with_balance(id: AccountId, balance: Amount) -> DomainResult<Self> {
        if balance < 0 {
            return Err(DomainError::invalid(format!(
                "opening balance cannot be negative (got {balance})"
            )));
        }
        let mut account = Self::new(id);
        account.balance = balance;
        Ok(account)
    }

    pub fn id_typed(&self) -> &AccountId {
        &self.id
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn owes_to(&self) -> &DebtBook {
        &self.owes_to
    }

    pub fn owes_from(&self) -> &DebtBook {
        &self.owes_from
    }

    pub fn owed_to(&self, peer: &AccountId) -> Option<Amount> {
        self.owes_to.get(peer)
    }

    pub fn owed_from(&self, peer: &AccountId) -> Option<Amount> {
        self.owes_from.get(peer)
    }

    pub fn does_owe_to(&self, peer: &AccountId) -> bool {
        self.owes_to.contains(peer)
    }

    pub fn does_owe_from(&self, peer: &AccountId) -> bool {
        self.owes_from.contains(peer)
    }

    /// Add a positive or negative delta to the debt this account owes `peer`.
    pub fn add_owes_to(&mut self, peer: &AccountId, delta: Amount) -> DomainResult<Amount> {
        self.ensure_peer(peer)?;
        self.owes_to.adjust(peer, delta)
    }

    /// Add a positive or negative delta to the debt `peer` owes this account.
    pub fn add_owes_from(&mut self, peer: &AccountId, delta: Amount) -> DomainResult<Amount> {
        self.ensure_peer(peer)?;
        self.owes_from.adjust(peer, delta)
    }

    pub fn remove_owes_to(&mut self, peer: &AccountId) -> Option<Amount> {
        self.owes_to.remove(peer)
    }

    pub fn remove_owes_from(&mut self, peer: &AccountId) -> Option<Amount> {
        self.owes_from.remove(peer)
    }

    /// Increase the cash balance.
    pub fn credit(&mut self, amount: Amount) -> DomainResult<Amount> {
        if amount < 0 {
            return Err(DomainError::invalid("credit amount cannot be negative"));
        }
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            DomainError::invariant(format!("balance of {} overflows", self.id))
        })?;
        Ok(self.balance)
    }

    /// Decrease the cash balance. Overdrafts are a caller error.
    pub fn debit(&mut self, amount: Amount) -> DomainResult<Amount> {
        if amount < 0 {
            return Err(DomainError::invalid("debit amount cannot be negative"));
        }
        if amount > self.balance {
            return Err(DomainError::invariant(format!(
                "debit of {amount} exceeds balance {} of {}",
                self.balance, self.id
            )));
        }
        self.balance -= amount;
        Ok(self.balance)
    }

    /// `balance + Σowes_from − Σowes_to`.
    pub fn net_position(&self) -> i128 {
        self.balance as i128 + self.owes_from.total() - self.owes_to.total()
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id.clone(),
            balance: self.balance,
            owes_to: self.owes_to.lines(),
            owes_from: self.owes_from.lines(),
        }
    }

    fn ensure_peer(&self, peer: &AccountId) -> DomainResult<()> {
        if *peer == self.id {
            return Err(DomainError::invalid(format!(
                "account {} cannot hold a debt with itself",
                self.id
            )));
        }
        Ok(())
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl core::hash::Hash for Account {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[Name=[{}] Balance=[{}]]", self.id, self.balance)
    }
}

/// Read-only view of an account for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub balance: Amount,
    pub owes_to: Vec<DebtLine>,
    pub owes_from: Vec<DebtLine>,
}
