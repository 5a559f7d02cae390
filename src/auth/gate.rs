use super::AuthState;
use crate::router::Route;

const DEFAULT_CATEGORY: &str = "this content";

/// What a protected route shows for the current auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    Spinner,
    LoginRequired,
    Content,
}

/// Prompt shown in place of protected content while signed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequiredModal {
    category_name: String,
    is_open: bool,
}

impl LoginRequiredModal {
    pub const TITLE: &'static str = "Login Required";
    pub const LOGIN_LABEL: &'static str = "Sign In / Sign Up";
    pub const CONTINUE_LABEL: &'static str = "Continue with General News";
    pub const PERKS: [&'static str; 3] = [
        "Access all news categories",
        "Save articles to bookmarks",
        "Personalized news feed",
    ];

    pub fn new(category_name: Option<&str>) -> Self {
        Self {
            category_name: category_name.unwrap_or(DEFAULT_CATEGORY).to_string(),
            is_open: false,
        }
    }

    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// "Sign In / Sign Up": head to the login screen and close.
    pub fn go_to_login(&mut self) -> Route {
        self.is_open = false;
        Route::Login
    }

    /// "Continue with General News": close and return home, still signed out.
    pub fn continue_without(&mut self) -> Route {
        self.is_open = false;
        Route::Home
    }
}

/// Guard for one mounted protected route.
#[derive(Debug, Clone)]
pub struct AuthGate {
    modal: LoginRequiredModal,
    prompted: bool,
}

impl AuthGate {
    pub fn new(category_name: Option<&str>) -> Self {
        Self {
            modal: LoginRequiredModal::new(category_name),
            prompted: false,
        }
    }

    /// Pure mapping from auth state to what gets rendered.
    pub fn view_for(state: AuthState) -> GateView {
        match state {
            AuthState::Loading => GateView::Spinner,
            AuthState::SignedOut => GateView::LoginRequired,
            AuthState::SignedIn => GateView::Content,
        }
    }

    /// Feed the latest auth state. The modal opens the first time this
    /// mount sees a signed-out state; after the user closes it, it stays
    /// closed.
    pub fn observe(&mut self, state: AuthState) -> GateView {
        let view = Self::view_for(state);
        if view == GateView::LoginRequired && !self.prompted {
            self.prompted = true;
            self.modal.open();
        }
        view
    }

    pub fn modal(&self) -> &LoginRequiredModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut LoginRequiredModal {
        &mut self.modal
    }
}
