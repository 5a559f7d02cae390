/// Screens reachable by path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    Profile,
    Bookmarks,
    ReadLater,
    NotFound(String),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Route::Home,
            "/login" => Route::Login,
            "/profile" => Route::Profile,
            "/bookmarks" => Route::Bookmarks,
            "/read-later" => Route::ReadLater,
            _ => Route::NotFound(path.trim().to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Profile => "/profile",
            Route::Bookmarks => "/bookmarks",
            Route::ReadLater => "/read-later",
            Route::NotFound(path) => path,
        }
    }

    /// Category label for the login prompt, or `None` for public routes.
    pub fn protection(&self) -> Option<&'static str> {
        match self {
            Route::Profile => Some("Profile"),
            Route::Bookmarks => Some("Bookmarks"),
            Route::ReadLater => Some("Read Later"),
            Route::Home | Route::Login | Route::NotFound(_) => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Sign In",
            Route::Profile => "Profile",
            Route::Bookmarks => "Bookmarks",
            Route::ReadLater => "Read Later",
            Route::NotFound(_) => "Not Found",
        }
    }
}
