use retailbank_core::{AccountId, DomainError, DomainResult};

/// The console session: at most one active account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active: Option<AccountId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the active account, replacing any previous one.
    pub fn login(&mut self, id: AccountId) {
        self.active = Some(id);
    }

    pub fn logout(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&AccountId> {
        self.active.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.active.is_some()
    }

    pub fn require_active(&self) -> DomainResult<&AccountId> {
        self.active.as_ref().ok_or(DomainError::NotLoggedIn)
    }
}
