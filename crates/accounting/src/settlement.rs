//! Settlement engine: nets mutual debts against cash movement.
//!
//! Both operations validate everything that can fail before the first
//! mutation, so an `Err` leaves the participating accounts untouched.
//! `sweep_debts` is the exception for creditors after the first: callers that
//! need all-or-nothing semantics run it on copies and commit only on `Ok`.

use std::collections::HashMap;
use std::hash::BuildHasher;

use retailbank_core::{AccountId, Amount, DomainError, DomainResult};

use crate::account::Account;

/// Resolves a creditor id to the account that must be credited during a sweep.
pub trait AccountResolver {
    fn resolve(&mut self, id: &AccountId) -> Option<&mut Account>;
}

impl<S: BuildHasher> AccountResolver for HashMap<AccountId, Account, S> {
    fn resolve(&mut self, id: &AccountId) -> Option<&mut Account> {
        self.get_mut(id)
    }
}

/// What a transfer did, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferOutcome {
    /// Portion of the payee's existing debt to the payer that was written off.
    pub debt_netted: Amount,
    /// Cash actually moved from payer to payee.
    pub cash_moved: Amount,
    /// Portion the payer could not cover, recorded as a new debt to the payee.
    pub deficit: Amount,
}

impl TransferOutcome {
    pub fn absorbed_by_debt(&self) -> bool {
        self.cash_moved == 0 && self.deficit == 0
    }
}

/// One creditor touched by a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPayment {
    pub creditor: AccountId,
    pub paid: Amount,
    /// Debt still owed to this creditor after the payment.
    pub remaining: Amount,
}

/// What a sweep did, in payment order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SweepReport {
    pub payments: Vec<SweepPayment>,
}

impl SweepReport {
    pub fn total_paid(&self) -> Amount {
        self.payments.iter().map(|p| p.paid).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

/// Returns the debt `debtor` owes `creditor`, checking both mirrored entries agree.
fn mirrored_debt(debtor: &Account, creditor: &Account) -> DomainResult<Option<Amount>> {
    let owed = debtor.owed_to(creditor.id_typed());
    let recorded = creditor.owed_from(debtor.id_typed());
    if owed != recorded {
        return Err(DomainError::inconsistency(format!(
            "debt from {} to {} is not mirrored ({owed:?} vs {recorded:?})",
            debtor.id_typed(),
            creditor.id_typed()
        )));
    }
    Ok(owed)
}

/// Move `amount` from `payer` to `payee`, settling the payee's debt to the payer first.
///
/// 1. If the payee owes the payer `d`, the payment writes that debt off first:
///    fully when `d <= amount` (the remainder carries on), otherwise it shrinks
///    the debt by `amount` and nothing else happens.
/// 2. The remainder is paid in cash. Whatever exceeds the payer's balance
///    becomes a debt from payer to payee.
///
/// Only the payee-owes-payer direction is netted. A debt the payer already
/// owes the payee is left alone and any deficit is added on top of it.
pub fn transfer(
    payer: &mut Account,
    payee: &mut Account,
    amount: Amount,
) -> DomainResult<TransferOutcome> {
    if amount < 0 {
        return Err(DomainError::invalid(format!(
            "payment amount cannot be negative (got {amount})"
        )));
    }
    if payer.id_typed() == payee.id_typed() {
        return Err(DomainError::invalid(format!(
            "{} cannot pay itself",
            payer.id_typed()
        )));
    }

    let payer_id = payer.id_typed().clone();
    let payee_id = payee.id_typed().clone();

    let prior_debt = mirrored_debt(payee, payer)?;
    let existing_deficit = mirrored_debt(payer, payee)?.unwrap_or(0);

    let mut outcome = TransferOutcome::default();
    let mut remaining = amount;

    if let Some(debt) = prior_debt {
        outcome.debt_netted = debt.min(amount);
        remaining = amount - debt;
    }

    if remaining > 0 {
        let balance = payer.balance();
        if remaining <= balance {
            outcome.cash_moved = remaining;
        } else {
            outcome.cash_moved = balance;
            outcome.deficit = remaining - balance;
        }
    }

    // Overflow is the only failure left; check it before touching anything.
    payee.balance().checked_add(outcome.cash_moved).ok_or_else(|| {
        DomainError::invariant(format!("balance of {payee_id} overflows"))
    })?;
    existing_deficit.checked_add(outcome.deficit).ok_or_else(|| {
        DomainError::invariant(format!("debt from {payer_id} to {payee_id} overflows"))
    })?;

    if outcome.debt_netted > 0 {
        payee.add_owes_to(&payer_id, -outcome.debt_netted)?;
        payer.add_owes_from(&payee_id, -outcome.debt_netted)?;
    }
    if outcome.cash_moved > 0 {
        payer.debit(outcome.cash_moved)?;
        payee.credit(outcome.cash_moved)?;
    }
    if outcome.deficit > 0 {
        payer.add_owes_to(&payee_id, outcome.deficit)?;
        payee.add_owes_from(&payer_id, outcome.deficit)?;
    }

    Ok(outcome)
}

/// Use the account's cash to pay down what it owes, oldest debt first.
///
/// Creditors are visited in the order their debts were first recorded. A debt
/// that fits in the balance is paid off entirely; the first one that does not
/// fit absorbs the rest of the balance and ends the sweep.
///
/// A creditor that cannot be resolved, or whose mirrored entry disagrees, is a
/// `LedgerInconsistency`. Payments made to earlier creditors are not rolled
/// back, so callers wanting atomicity must sweep a copy.
pub fn sweep_debts<R>(account: &mut Account, resolver: &mut R) -> DomainResult<SweepReport>
where
    R: AccountResolver + ?Sized,
{
    let mut report = SweepReport::default();
    if account.balance() <= 0 || account.owes_to().is_empty() {
        return Ok(report);
    }

    let debtor_id = account.id_typed().clone();
    let creditors: Vec<(AccountId, Amount)> = account
        .owes_to()
        .iter()
        .map(|(peer, amount)| (peer.clone(), amount))
        .collect();

    for (creditor_id, debt) in creditors {
        let balance = account.balance();
        if balance <= 0 {
            break;
        }

        let creditor = resolver.resolve(&creditor_id).ok_or_else(|| {
            DomainError::inconsistency(format!(
                "{debtor_id} owes {debt} to {creditor_id}, which does not exist"
            ))
        })?;
        if creditor.id_typed() != &creditor_id {
            return Err(DomainError::inconsistency(format!(
                "resolver returned {} for creditor {creditor_id}",
                creditor.id_typed()
            )));
        }
        mirrored_debt(account, creditor)?;
        let paid = debt.min(balance);
        creditor.balance().checked_add(paid).ok_or_else(|| {
            DomainError::invariant(format!("balance of {creditor_id} overflows"))
        })?;

        account.add_owes_to(&creditor_id, -paid)?;
        creditor.add_owes_from(&debtor_id, -paid)?;
        creditor.credit(paid)?;
        account.debit(paid)?;

        report.payments.push(SweepPayment {
            creditor: creditor_id,
            paid,
            remaining: debt - paid,
        });
    }

    Ok(report)
}
