//! Session state machine: `LoggedOut` -> `LoggedIn(account)` -> `LoggedOut`

use super::AccountId;
use crate::error::{Result, VaultError};

/// Per-caller session. Threaded explicitly through every account operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(AccountId),
}

impl Session {
    pub fn new() -> Self {
        Session::LoggedOut
    }

    /// Only reachable through a successful authentication
    pub(crate) fn login(&mut self, account: AccountId) {
        *self = Session::LoggedIn(account);
    }

    /// Return to `LoggedOut`, handing back the account that was logged in
    pub fn logout(&mut self) -> Option<AccountId> {
        match std::mem::take(self) {
            Session::LoggedIn(account) => Some(account),
            Session::LoggedOut => None,
        }
    }

    pub fn account(&self) -> Result<&AccountId> {
        match self {
            Session::LoggedIn(account) => Ok(account),
            Session::LoggedOut => Err(VaultError::NotAuthenticated),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }
}
