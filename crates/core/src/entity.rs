//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities compare by identity: state such as balances is excluded from
/// equality.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
