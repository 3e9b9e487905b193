//! Bank service: the operations the console front end exposes.
//!
//! Every settlement follows the same pipeline:
//!
//! ```text
//! resolve participants (owned copies from the directory)
//!   ↓
//! run the settlement engine on the copies
//!   ↓
//! commit every touched account in one `insert_all`
//! ```
//!
//! Nothing is written back when any step fails, so a rejected or broken
//! operation leaves the directory exactly as it was.

use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use retailbank_accounting::{
    Account, AccountResolver, AccountSummary, SweepReport, sweep_debts, transfer,
};
use retailbank_core::{AccountId, Amount, DomainError, DomainResult};

use crate::directory::AccountDirectory;
use crate::session::Session;

/// Names created on startup when seeding is enabled.
pub const DEFAULT_ACCOUNTS: [&str; 2] = ["Alice", "Bob"];

/// Creditors pulled from the directory on demand during a sweep.
struct WorkingSet<'a, D: ?Sized> {
    directory: &'a D,
    accounts: HashMap<AccountId, Account>,
    failure: Option<DomainError>,
}

impl<'a, D: AccountDirectory + ?Sized> WorkingSet<'a, D> {
    fn new(directory: &'a D) -> Self {
        Self {
            directory,
            accounts: HashMap::new(),
            failure: None,
        }
    }

    fn into_accounts(self) -> Vec<Account> {
        self.accounts.into_values().collect()
    }
}

impl<D: AccountDirectory + ?Sized> AccountResolver for WorkingSet<'_, D> {
    fn resolve(&mut self, id: &AccountId) -> Option<&mut Account> {
        if !self.accounts.contains_key(id) {
            match self.directory.lookup(id) {
                Ok(Some(account)) => {
                    self.accounts.insert(id.clone(), account);
                }
                Ok(None) => return None,
                Err(e) => {
                    self.failure = Some(e);
                    return None;
                }
            }
        }
        self.accounts.get_mut(id)
    }
}

/// Session-scoped banking operations over an injected directory.
#[derive(Debug)]
pub struct BankService<D> {
    directory: D,
    session: Session,
}

impl<D: AccountDirectory> BankService<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            session: Session::new(),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Create the bootstrap accounts with zero balance.
    pub fn seed_defaults(&self) -> DomainResult<()> {
        for name in DEFAULT_ACCOUNTS {
            self.add_account(name, 0)?;
        }
        Ok(())
    }

    /// Create (or replace) an account with an opening balance.
    pub fn add_account(&self, name: &str, balance: Amount) -> DomainResult<AccountSummary> {
        let id = AccountId::new(name)?;
        info!(account = %id, balance, "creating account");
        let account = Account::with_balance(id, balance)?;
        let summary = account.summary();
        self.directory.insert(account)?;
        Ok(summary)
    }

    pub fn get_account(&self, name: &str) -> DomainResult<Option<AccountSummary>> {
        let id = AccountId::new(name)?;
        let account = self.directory.lookup(&id)?;
        debug!(account = %id, found = account.is_some(), "looked up account");
        Ok(account.map(|a| a.summary()))
    }

    /// Resolve-or-create `name` and make it the active account.
    pub fn login(&mut self, name: &str) -> DomainResult<AccountSummary> {
        let id = AccountId::new(name)?;
        let account = match self.directory.lookup(&id)? {
            Some(account) => {
                info!(account = %id, "account exists");
                account
            }
            None => {
                warn!(account = %id, "account does not exist; creating it");
                let account = Account::new(id.clone());
                self.directory.insert(account.clone())?;
                account
            }
        };

        self.session.login(id.clone());
        info!(account = %id, "Hello, {id}.");
        let summary = account.summary();
        log_summary(&summary);
        Ok(summary)
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Summary of the active account.
    pub fn current(&self) -> DomainResult<AccountSummary> {
        Ok(self.active_account()?.summary())
    }

    /// Add `amount` to the active account, then sweep its debts.
    pub fn deposit(&mut self, amount: Amount) -> DomainResult<AccountSummary> {
        let mut account = self.active_account()?;
        if amount < 0 {
            return Err(DomainError::invalid(format!(
                "deposit amount cannot be negative (got {amount})"
            )));
        }
        info!(account = %account.id_typed(), amount, "depositing");

        account.credit(amount)?;

        let mut creditors = WorkingSet::new(&self.directory);
        let report = match sweep_debts(&mut account, &mut creditors) {
            Ok(report) => report,
            Err(e) => {
                let e = creditors.failure.take().unwrap_or(e);
                if e.is_fatal() {
                    error!(account = %account.id_typed(), error = %e, "debt sweep aborted");
                }
                return Err(e);
            }
        };
        log_sweep(account.id_typed(), &report);

        let summary = account.summary();
        let mut touched = creditors.into_accounts();
        touched.push(account);
        self.directory.insert_all(touched)?;

        log_summary(&summary);
        Ok(summary)
    }

    /// Pay `amount` from the active account to `target`.
    pub fn pay(&mut self, target: &str, amount: Amount) -> DomainResult<AccountSummary> {
        let target_id = AccountId::new(target)?;
        if amount < 0 {
            return Err(DomainError::invalid(format!(
                "payment amount cannot be negative (got {amount})"
            )));
        }
        let mut payer = self.active_account()?;
        let mut payee = match self.directory.lookup(&target_id)? {
            Some(account) => account,
            None => {
                warn!(payee = %target_id, "not a valid payee");
                return Err(DomainError::unknown_account(target_id));
            }
        };

        info!(payer = %payer.id_typed(), payee = %payee.id_typed(), amount, "transferring");
        let outcome = transfer(&mut payer, &mut payee, amount)?;
        debug!(
            debt_netted = outcome.debt_netted,
            cash_moved = outcome.cash_moved,
            deficit = outcome.deficit,
            "transfer settled"
        );

        let summary = payer.summary();
        self.directory.insert_all(vec![payer, payee])?;

        info!(payee = %target_id, amount, "transfer completed");
        log_summary(&summary);
        Ok(summary)
    }

    /// Drop every account and end the session.
    pub fn clear_accounts(&mut self) -> DomainResult<()> {
        self.directory.clear_all()?;
        self.session.logout();
        info!("all accounts cleared");
        Ok(())
    }

    fn active_account(&self) -> DomainResult<Account> {
        let id = self.session.require_active().inspect_err(|_| {
            warn!("user not logged in; please login first");
        })?;
        self.directory.lookup(id)?.ok_or_else(|| {
            error!(account = %id, "active account missing from directory");
            DomainError::inconsistency(format!("active account {id} is not in the directory"))
        })
    }
}

fn log_summary(summary: &AccountSummary) {
    info!(account = %summary.id, balance = summary.balance, "Your balance is {}.", summary.balance);
    for line in &summary.owes_to {
        info!("Owing {} to {}.", line.amount, line.peer);
    }
    for line in &summary.owes_from {
        info!("Owing {} from {}.", line.amount, line.peer);
    }
}

fn log_sweep(account: &AccountId, report: &SweepReport) {
    for payment in &report.payments {
        debug!(
            debtor = %account,
            creditor = %payment.creditor,
            paid = payment.paid,
            remaining = payment.remaining,
            "debt repaid from deposit"
        );
    }
}
