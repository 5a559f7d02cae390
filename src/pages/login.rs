use std::sync::OnceLock;

use regex::Regex;

use crate::auth::IdentityProvider;
use crate::models::UserProfile;
use crate::router::Route;

use super::TextInput;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").expect("email pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Name,
    Email,
}

/// Sign-in form for the local identity provider.
#[derive(Debug)]
pub struct LoginPage {
    pub name: TextInput,
    pub email: TextInput,
    field: LoginField,
    error: Option<String>,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self {
            name: TextInput::with_limit(80),
            email: TextInput::with_limit(120),
            field: LoginField::Name,
            error: None,
        }
    }
}

impl LoginPage {
    pub fn field(&self) -> LoginField {
        self.field
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            LoginField::Name => LoginField::Email,
            LoginField::Email => LoginField::Name,
        };
    }

    pub fn active_input(&mut self) -> &mut TextInput {
        match self.field {
            LoginField::Name => &mut self.name,
            LoginField::Email => &mut self.email,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate the form into a profile.
    pub fn profile(&self) -> Result<UserProfile, String> {
        let name = self.name.trimmed();
        let email = self.email.trimmed().to_lowercase();

        if name.is_empty() {
            return Err("Please enter your name.".to_string());
        }
        if !email_regex().is_match(&email) {
            return Err("Please enter a valid email address.".to_string());
        }

        let username = email.split('@').next().unwrap_or_default().to_string();
        Ok(UserProfile {
            id: format!("local:{}", email),
            full_name: Some(name.to_string()),
            first_name: name.split_whitespace().next().map(String::from),
            username: Some(username),
            image_url: None,
            primary_email_address: Some(email),
        })
    }

    /// Sign in and return where to go next, or keep the form with an error.
    pub fn submit(&mut self, identity: &dyn IdentityProvider) -> Option<Route> {
        let profile = match self.profile() {
            Ok(profile) => profile,
            Err(message) => {
                self.error = Some(message);
                return None;
            }
        };
        match identity.sign_in(profile) {
            Ok(()) => {
                self.error = None;
                Some(Route::Home)
            }
            Err(e) => {
                tracing::warn!("Sign in failed: {}", e);
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthState, LocalIdentity};
    use tempfile::TempDir;

    fn filled(name: &str, email: &str) -> LoginPage {
        let mut page = LoginPage::default();
        page.name.set(name);
        page.email.set(email);
        page
    }

    #[test]
    fn test_profile_from_form() {
        let profile = filled("Asha Rao", " Asha@Example.com ").profile().unwrap();
        assert_eq!(profile.id, "local:asha@example.com");
        assert_eq!(profile.first_name.as_deref(), Some("Asha"));
        assert_eq!(profile.username.as_deref(), Some("asha"));
        assert_eq!(profile.display_name(), "Asha Rao");
    }

    #[test]
    fn test_validation_errors() {
        assert!(filled("", "a@b.co").profile().is_err());
        assert!(filled("Asha", "not-an-email").profile().is_err());
        assert!(filled("Asha", "a@b").profile().is_err());
    }

    #[test]
    fn test_field_cycle() {
        let mut page = LoginPage::default();
        page.active_input().push('x');
        page.next_field();
        page.active_input().push('y');
        assert_eq!(page.name.value(), "x");
        assert_eq!(page.email.value(), "y");
    }

    #[test]
    fn test_submit_signs_in() {
        let dir = TempDir::new().unwrap();
        let identity = LocalIdentity::new(dir.path().join("session.toml"));
        let mut page = filled("Asha", "asha@example.com");

        assert_eq!(page.submit(&identity), Some(Route::Home));
        assert_eq!(identity.session().state(), AuthState::SignedIn);
    }

    #[test]
    fn test_invalid_submit_keeps_form() {
        let dir = TempDir::new().unwrap();
        let identity = LocalIdentity::new(dir.path().join("session.toml"));
        let mut page = filled("Asha", "nope");

        assert_eq!(page.submit(&identity), None);
        assert!(page.error().is_some());
        assert_eq!(page.email.value(), "nope");
    }
}
