use crate::auth::IdentityProvider;
use crate::models::UserProfile;
use crate::router::Route;

/// Signed-in user's card. Details come from the identity provider on every
/// render; only the sign-out error is local.
#[derive(Debug, Default)]
pub struct ProfilePage {
    error: Option<String>,
}

impl ProfilePage {
    pub fn details(user: &UserProfile) -> Vec<(&'static str, String)> {
        let mut rows = vec![("Name", user.display_name().to_string())];
        if let Some(username) = user.username.as_deref().filter(|u| !u.is_empty()) {
            rows.push(("Handle", format!("@{}", username)));
        }
        if let Some(email) = user.primary_email_address.as_deref() {
            rows.push(("Email", email.to_string()));
        }
        if let Some(image) = user.image_url.as_deref() {
            rows.push(("Avatar", image.to_string()));
        }
        rows
    }

    pub fn sign_out(&mut self, identity: &dyn IdentityProvider) -> Option<Route> {
        match identity.sign_out() {
            Ok(()) => {
                self.error = None;
                Some(Route::Home)
            }
            Err(e) => {
                tracing::warn!("Sign out failed: {}", e);
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
