//! Accounting module (accounts, IOUs and the settlement engine).
//!
//! Pure domain logic only: no IO, no logging, no persistence concerns.

pub mod account;
pub mod debts;
pub mod settlement;

pub use account::{Account, AccountSummary};
pub use debts::{DebtBook, DebtLine};
pub use settlement::{
    AccountResolver, SweepPayment, SweepReport, TransferOutcome, sweep_debts, transfer,
};
