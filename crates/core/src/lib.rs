//! `retailbank-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::AccountId;

/// Money in the smallest currency unit.
///
/// Signed so that negative inputs can be detected and rejected; balances and
/// debts are never negative at rest.
pub type Amount = i64;
