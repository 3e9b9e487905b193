use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use retailbank_accounting::Account;
use retailbank_core::{AccountId, DomainError, DomainResult};

/// Keyed account store: the only way services reach accounts.
///
/// Lookups return owned snapshots. Changes become visible only through
/// `insert`/`insert_all`, so a settlement computed on copies can be committed
/// in one step.
pub trait AccountDirectory: Send + Sync {
    fn lookup(&self, id: &AccountId) -> DomainResult<Option<Account>>;
    fn contains(&self, id: &AccountId) -> DomainResult<bool>;
    /// Insert or replace by id.
    fn insert(&self, account: Account) -> DomainResult<()>;
    /// Insert or replace several accounts under a single write.
    fn insert_all(&self, accounts: Vec<Account>) -> DomainResult<()>;
    /// All accounts, ordered by id.
    fn list(&self) -> DomainResult<Vec<Account>>;
    fn clear_all(&self) -> DomainResult<()>;
}

impl<D> AccountDirectory for Arc<D>
where
    D: AccountDirectory + ?Sized,
{
    fn lookup(&self, id: &AccountId) -> DomainResult<Option<Account>> {
        (**self).lookup(id)
    }

    fn contains(&self, id: &AccountId) -> DomainResult<bool> {
        (**self).contains(id)
    }

    fn insert(&self, account: Account) -> DomainResult<()> {
        (**self).insert(account)
    }

    fn insert_all(&self, accounts: Vec<Account>) -> DomainResult<()> {
        (**self).insert_all(accounts)
    }

    fn list(&self) -> DomainResult<Vec<Account>> {
        (**self).list()
    }

    fn clear_all(&self) -> DomainResult<()> {
        (**self).clear_all()
    }
}

/// In-memory directory, lives for the duration of the process.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    inner: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, HashMap<AccountId, Account>>> {
        self.inner.read().map_err(|_| {
            tracing::error!("account directory lock poisoned");
            DomainError::invariant("account directory lock poisoned")
        })
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, HashMap<AccountId, Account>>> {
        self.inner.write().map_err(|_| {
            tracing::error!("account directory lock poisoned");
            DomainError::invariant("account directory lock poisoned")
        })
    }
}

impl AccountDirectory for InMemoryDirectory {
    fn lookup(&self, id: &AccountId) -> DomainResult<Option<Account>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn contains(&self, id: &AccountId) -> DomainResult<bool> {
        Ok(self.read()?.contains_key(id))
    }

    fn insert(&self, account: Account) -> DomainResult<()> {
        self.write()?.insert(account.id_typed().clone(), account);
        Ok(())
    }

    fn insert_all(&self, accounts: Vec<Account>) -> DomainResult<()> {
        let mut map = self.write()?;
        for account in accounts {
            map.insert(account.id_typed().clone(), account);
        }
        Ok(())
    }

    fn list(&self) -> DomainResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self.read()?.values().cloned().collect();
        accounts.sort_by(|a, b| a.id_typed().cmp(b.id_typed()));
        Ok(accounts)
    }

    fn clear_all(&self) -> DomainResult<()> {
        self.write()?.clear();
        Ok(())
    }
}
