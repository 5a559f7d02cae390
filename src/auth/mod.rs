//! Sign-in state and the gate in front of protected screens.

mod gate;
mod local;

pub use gate::{AuthGate, GateView, LoginRequiredModal};
pub use local::LocalIdentity;

use tokio::sync::watch;

use crate::error::Result;
use crate::models::UserProfile;

/// Snapshot of what the identity provider currently knows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub is_loaded: bool,
    pub is_signed_in: bool,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn signed_out() -> Self {
        Self {
            is_loaded: true,
            is_signed_in: false,
            user: None,
        }
    }

    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            is_loaded: true,
            is_signed_in: true,
            user: Some(user),
        }
    }

    pub fn state(&self) -> AuthState {
        AuthState::from_flags(self.is_loaded, self.is_signed_in)
    }

    pub fn user_id(&self) -> Option<String> {
        self.user
            .as_ref()
            .filter(|_| self.is_signed_in)
            .map(|u| u.id.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    SignedIn,
    SignedOut,
}

impl AuthState {
    pub fn from_flags(is_loaded: bool, is_signed_in: bool) -> Self {
        match (is_loaded, is_signed_in) {
            (false, _) => AuthState::Loading,
            (true, true) => AuthState::SignedIn,
            (true, false) => AuthState::SignedOut,
        }
    }
}

/// The identity capability the UI depends on.
///
/// Updates are pushed through [`IdentityProvider::subscribe`]; the UI never
/// polls for sign-in state.
pub trait IdentityProvider: Send + Sync {
    fn session(&self) -> Session;
    fn subscribe(&self) -> watch::Receiver<Session>;
    fn sign_in(&self, user: UserProfile) -> Result<()>;
    fn sign_out(&self) -> Result<()>;
}
