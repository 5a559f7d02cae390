//! The shell: owns theme, toast, session and the mounted page.

pub mod event;
mod keys;
pub mod notification;
mod tasks;
pub mod theme;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::watch;

use crate::api::ApiClient;
use crate::auth::{AuthGate, GateView, IdentityProvider, Session};
use crate::config::Config;
use crate::models::{Bookmark, ReadLaterItem, Topic};
use crate::pages::{HomePage, LoginPage, ProfilePage, SavedList, TextInput};
use crate::router::Route;
use crate::services::{NewsService, UserService};

use event::{AppEvent, SavedEvent};
pub use notification::{Notification, NotificationKind, NotificationState};
pub use tasks::{Notifier, SavedKind, Tasks};
pub use theme::{PreferenceStore, Theme, ThemeState};

const FEEDBACK_MAX_LEN: usize = 2000;

/// The screen currently mounted under the router.
pub enum Page {
    Home(HomePage),
    Login(LoginPage),
    Profile(ProfilePage),
    Bookmarks(SavedList<Bookmark>),
    ReadLater(SavedList<ReadLaterItem>),
    NotFound,
}

/// Prompts and panels drawn above the page.
#[derive(Debug, Default)]
pub enum Overlay {
    #[default]
    None,
    Feedback(TextInput),
    Goto(TextInput),
    Help,
}

pub struct App {
    pub(crate) route: Route,
    pub(crate) page: Page,
    pub(crate) gate: Option<AuthGate>,
    pub(crate) gate_view: GateView,
    pub(crate) theme: ThemeState,
    pub(crate) notifications: NotificationState,
    pub(crate) session: Session,
    pub(crate) overlay: Overlay,
    pub(crate) ticks: u64,
    page_loaded: bool,
    topic: Topic,
    identity: Arc<dyn IdentityProvider>,
    session_rx: watch::Receiver<Session>,
    api: ApiClient,
    tasks: Tasks,
    events: UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        api: ApiClient,
        identity: Arc<dyn IdentityProvider>,
        preferences: Box<dyn PreferenceStore>,
        env_prefers_dark: bool,
    ) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let tasks = Tasks::new(
            NewsService::new(api.clone()),
            UserService::new(api.clone()),
            tx,
        );
        let mut session_rx = identity.subscribe();
        let session = session_rx.borrow_and_update().clone();
        api.set_user_id(session.user_id());

        let mut app = Self {
            route: Route::Home,
            page: Page::NotFound,
            gate: None,
            gate_view: GateView::Content,
            theme: ThemeState::load(preferences, env_prefers_dark),
            notifications: NotificationState::new(),
            session,
            overlay: Overlay::None,
            ticks: 0,
            page_loaded: false,
            topic: config.default_topic,
            identity,
            session_rx,
            api,
            tasks,
            events,
            should_quit: false,
        };
        app.navigate(Route::Home);
        app
    }

    // ==================== Routing ====================

    /// Mount the page for `route`, wrapped in an auth gate when protected.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigating to {}", route.path());
        self.unmount();

        self.page = match &route {
            Route::Home => Page::Home(HomePage::new(self.topic, self.tasks.notifier())),
            Route::Login => Page::Login(LoginPage::default()),
            Route::Profile => Page::Profile(ProfilePage::default()),
            Route::Bookmarks => Page::Bookmarks(SavedList::new()),
            Route::ReadLater => Page::ReadLater(SavedList::new()),
            Route::NotFound(_) => Page::NotFound,
        };
        self.gate = route.protection().map(|category| AuthGate::new(Some(category)));
        self.route = route;
        self.page_loaded = false;
        self.refresh_gate();
    }

    fn unmount(&mut self) {
        if let Page::Home(home) = &mut self.page {
            self.topic = home.topic();
            home.close_article();
        }
    }

    fn refresh_gate(&mut self) {
        self.gate_view = match self.gate.as_mut() {
            Some(gate) => gate.observe(self.session.state()),
            None => GateView::Content,
        };
        if self.gate_view == GateView::Content && !self.page_loaded {
            self.load_page();
        }
    }

    fn load_page(&mut self) {
        self.page_loaded = true;
        match &mut self.page {
            Page::Home(home) => self.tasks.fetch_news(home.load()),
            Page::Bookmarks(list) => self.tasks.fetch_saved::<Bookmark>(list.load()),
            Page::ReadLater(list) => self.tasks.fetch_saved::<ReadLaterItem>(list.load()),
            Page::Login(_) | Page::Profile(_) | Page::NotFound => {}
        }
    }

    /// "Sign In / Sign Up" on the login-required modal.
    pub fn modal_go_to_login(&mut self) {
        let next = match self.gate.as_mut() {
            Some(gate) if gate.modal().is_open() => gate.modal_mut().go_to_login(),
            _ => return,
        };
        self.navigate(next);
    }

    /// "Continue with General News" on the login-required modal.
    pub fn modal_continue_without(&mut self) {
        let next = match self.gate.as_mut() {
            Some(gate) if gate.modal().is_open() => gate.modal_mut().continue_without(),
            _ => return,
        };
        self.topic = Topic::General;
        self.navigate(next);
    }

    pub fn modal_is_open(&self) -> bool {
        self.gate.as_ref().is_some_and(|g| g.modal().is_open())
    }

    pub fn open_goto(&mut self) {
        self.overlay = Overlay::Goto(TextInput::with_limit(64));
    }

    pub fn submit_goto(&mut self) {
        if let Overlay::Goto(input) = std::mem::take(&mut self.overlay) {
            if !input.is_blank() {
                self.navigate(Route::from_path(input.trimmed()));
            }
        }
    }

    // ==================== Home ====================

    pub fn set_topic(&mut self, topic: Topic) {
        if let Page::Home(home) = &mut self.page {
            if let Some(ticket) = home.set_topic(topic) {
                self.topic = topic;
                self.tasks.fetch_news(ticket);
            }
        }
    }

    pub fn shift_topic(&mut self, forward: bool) {
        let current = match &self.page {
            Page::Home(home) => home.topic(),
            _ => return,
        };
        self.set_topic(if forward { current.next() } else { current.prev() });
    }

    /// Open the highlighted article and fetch its summary, sentiment and thread.
    pub fn open_selected_article(&mut self) {
        if let Page::Home(home) = &mut self.page {
            if let Some(opened) = home.open_selected() {
                self.tasks.fetch_insight(opened.insight, &opened.article);
                if let Some(ticket) = opened.comments {
                    self.tasks.fetch_comments(ticket);
                }
            }
        }
    }

    pub fn close_article(&mut self) {
        if let Page::Home(home) = &mut self.page {
            home.close_article();
        }
    }

    /// Save the highlighted feed article to bookmarks or read-later.
    pub fn save_highlighted<T: SavedKind>(&mut self) {
        if !self.session.is_signed_in {
            self.show_notification(
                format!("Sign in to save articles to {}", T::LABEL),
                NotificationKind::Error,
            );
            return;
        }
        if let Page::Home(home) = &self.page {
            if let Some(item) = home.save_request(self.session.user_id()) {
                self.tasks.save_article::<T>(item);
            }
        }
    }

    pub fn post_comment(&mut self) {
        if let Page::Home(home) = &mut self.page {
            if let Some((ticket, comment)) = home.comments.submit(self.session.user.as_ref()) {
                self.tasks.post_comment(ticket, comment);
            }
        }
    }

    pub fn delete_selected_comment(&mut self) {
        if let Page::Home(home) = &self.page {
            if let Some((article_id, comment_id)) = home.comments.request_delete() {
                self.tasks.delete_comment(article_id, comment_id);
            }
        }
    }

    /// Open the highlighted article or saved entry in the system browser.
    pub fn open_in_browser(&mut self) {
        let url = match &self.page {
            Page::Home(home) => home.highlighted_url().map(String::from),
            Page::Bookmarks(list) => list.selected_item().map(|b| b.url.clone()),
            Page::ReadLater(list) => list.selected_item().map(|r| r.url.clone()),
            _ => None,
        };
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            return;
        };
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open {}: {}", url, e);
            self.show_notification("Could not open the browser", NotificationKind::Error);
        }
    }

    // ==================== Saved lists ====================

    pub fn remove_selected_saved(&mut self) {
        match &mut self.page {
            Page::Bookmarks(list) => {
                if let Some(id) = list.request_remove() {
                    self.tasks.remove_saved::<Bookmark>(id);
                }
            }
            Page::ReadLater(list) => {
                if let Some(id) = list.request_remove() {
                    self.tasks.remove_saved::<ReadLaterItem>(id);
                }
            }
            _ => {}
        }
    }

    /// Put back the entry removed last.
    pub fn undo_remove(&mut self) {
        let user_id = self.session.user_id();
        match &mut self.page {
            Page::Bookmarks(list) => {
                if let Some(item) = list.take_undo(user_id) {
                    self.tasks.add_saved::<Bookmark>(item);
                }
            }
            Page::ReadLater(list) => {
                if let Some(item) = list.take_undo(user_id) {
                    self.tasks.add_saved::<ReadLaterItem>(item);
                }
            }
            _ => {}
        }
    }

    // ==================== Identity ====================

    pub fn submit_login(&mut self) {
        let next = match &mut self.page {
            Page::Login(login) => login.submit(self.identity.as_ref()),
            _ => None,
        };
        if let Some(route) = next {
            self.poll_session();
            self.navigate(route);
        }
    }

    pub fn sign_out(&mut self) {
        let next = match &mut self.page {
            Page::Profile(profile) => profile.sign_out(self.identity.as_ref()),
            _ => None,
        };
        if let Some(route) = next {
            self.poll_session();
            self.navigate(route);
        }
    }

    // ==================== Session ====================

    fn poll_session(&mut self) {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return;
        }
        let session = self.session_rx.borrow_and_update().clone();
        self.api.set_user_id(session.user_id());
        self.session = session;
        self.refresh_gate();
    }

    // ==================== Shell state ====================

    pub fn show_notification(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.notifications.show(message, kind, Instant::now());
    }

    pub fn toggle_theme(&mut self) {
        if let Err(e) = self.theme.toggle() {
            tracing::warn!("Could not persist theme: {}", e);
            self.show_notification("Could not save theme preference", NotificationKind::Error);
        }
    }

    pub fn open_feedback(&mut self) {
        self.overlay = Overlay::Feedback(TextInput::with_limit(FEEDBACK_MAX_LEN));
    }

    /// Submit the feedback prompt. Empty input just closes it.
    pub fn submit_feedback(&mut self) {
        if let Overlay::Feedback(input) = std::mem::take(&mut self.overlay) {
            if !input.is_blank() {
                self.tasks.submit_feedback(input.trimmed().to_string());
            }
        }
    }

    // ==================== Loop integration ====================

    /// Advance timers and pick up pushed state. Called every UI tick.
    pub fn tick(&mut self, now: Instant) {
        self.ticks = self.ticks.wrapping_add(1);
        self.poll_session();
        self.notifications.tick(now);
    }

    /// Apply every task result that has arrived so far.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next task result and apply it.
    pub async fn next_event(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Notify { message, kind } => self.show_notification(message, kind),
            AppEvent::FeedbackSubmitted(Ok(_)) => {
                self.show_notification("Thanks for your feedback!", NotificationKind::Success)
            }
            AppEvent::FeedbackSubmitted(Err(e)) => {
                self.show_notification(e.message, NotificationKind::Error)
            }
            AppEvent::NewsLoaded { ticket, result } => {
                if let Page::Home(home) = &mut self.page {
                    home.apply_news(&ticket, result);
                }
            }
            AppEvent::InsightLoaded {
                ticket,
                summary,
                sentiment,
            } => {
                if let Page::Home(home) = &mut self.page {
                    home.insight.apply(&ticket, summary, sentiment);
                }
            }
            AppEvent::CommentsLoaded { ticket, result } => {
                if let Page::Home(home) = &mut self.page {
                    home.comments.apply_loaded(&ticket, result);
                }
            }
            AppEvent::CommentPosted { ticket, result } => {
                if let Page::Home(home) = &mut self.page {
                    home.comments.apply_posted(&ticket, result);
                }
            }
            AppEvent::CommentDeleted {
                article_id,
                comment_id,
                result,
            } => {
                if let Page::Home(home) = &mut self.page {
                    home.comments.apply_deleted(&article_id, &comment_id, result);
                }
            }
            AppEvent::Bookmarks(event) => {
                if let Page::Bookmarks(list) = &mut self.page {
                    apply_saved(list, event);
                }
            }
            AppEvent::ReadLater(event) => {
                if let Page::ReadLater(list) = &mut self.page {
                    apply_saved(list, event);
                }
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn gate_view(&self) -> GateView {
        self.gate_view
    }
}

fn apply_saved<T: SavedKind>(list: &mut SavedList<T>, event: SavedEvent<T>) {
    match event {
        SavedEvent::Loaded { ticket, result } => list.apply_loaded(&ticket, result),
        SavedEvent::Added { result } => list.apply_added(result),
        SavedEvent::Removed { id, result } => list.apply_removed(&id, result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_with, next, spawn_backend, user, FixedIdentity};
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn backend() -> Router {
        Router::new()
            .route(
                "/api/news/topic/:topic",
                get(|| async {
                    Json(json!({ "source": "api", "count": 1, "articles": [
                        { "id": "a1", "title": "Sample", "source": "Wire", "url": "https://news.example/a1" }
                    ]}))
                }),
            )
            .route(
                "/api/bookmarks/",
                get(|| async {
                    Json(json!({ "count": 2, "bookmarks": [
                        { "_id": "b1", "article_id": "a1", "title": "One", "source": "S", "url": "https://1" },
                        { "_id": "b2", "article_id": "a2", "title": "Two", "source": "S", "url": "https://2" }
                    ]}))
                }),
            )
            .route(
                "/api/bookmarks/:id/",
                delete(|axum::extract::Path(id): axum::extract::Path<String>| async move {
                    if id == "b1" {
                        (StatusCode::OK, Json(json!({ "message": "Bookmark removed" })))
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({ "detail": "Bookmark not found" })))
                    }
                }),
            )
            .route(
                "/api/feedback/",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["message"], "More health news");
                    Json(json!({ "message": "Feedback received" }))
                }),
            )
    }

    #[tokio::test]
    async fn test_signed_out_bookmarks_shows_modal() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);
        next(&mut app).await; // home feed

        app.navigate(Route::from_path("/bookmarks"));

        assert_eq!(app.gate_view(), GateView::LoginRequired);
        assert!(app.modal_is_open());
        assert_eq!(app.gate.as_ref().unwrap().modal().category_name(), "Bookmarks");
        match app.page() {
            Page::Bookmarks(list) => {
                assert!(!list.is_loading());
                assert!(list.items().is_empty());
            }
            _ => panic!("bookmarks page not mounted"),
        }

        app.modal_continue_without();
        assert_eq!(app.route(), &Route::Home);
        assert!(!app.modal_is_open());
        assert!(!app.session().is_signed_in);
    }

    #[tokio::test]
    async fn test_modal_login_button_opens_login() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);

        app.navigate(Route::ReadLater);
        app.modal_go_to_login();
        assert_eq!(app.route(), &Route::Login);
        assert!(!app.modal_is_open());
    }

    #[tokio::test]
    async fn test_gate_waits_for_identity_then_loads() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::loading()));
        let mut app = app_with(&base, identity.clone());
        next(&mut app).await;

        app.navigate(Route::Bookmarks);
        assert_eq!(app.gate_view(), GateView::Spinner);

        identity.set(Session::signed_in(user()));
        app.tick(Instant::now());
        assert_eq!(app.gate_view(), GateView::Content);

        next(&mut app).await;
        match app.page() {
            Page::Bookmarks(list) => assert_eq!(list.items().len(), 2),
            _ => panic!("bookmarks page not mounted"),
        }
    }

    #[tokio::test]
    async fn test_bookmark_delete_round() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_in(user())));
        let mut app = app_with(&base, identity);
        next(&mut app).await;

        app.navigate(Route::Bookmarks);
        next(&mut app).await;

        // b2 is rejected by the backend: list unchanged, error shown.
        if let Page::Bookmarks(list) = &mut app.page {
            list.select_next();
        }
        app.remove_selected_saved();
        next(&mut app).await;
        match app.page() {
            Page::Bookmarks(list) => {
                assert_eq!(list.items().len(), 2);
                assert_eq!(list.error(), Some("Bookmark not found"));
            }
            _ => panic!("bookmarks page not mounted"),
        }

        if let Page::Bookmarks(list) = &mut app.page {
            list.select_prev();
        }
        app.remove_selected_saved();
        next(&mut app).await;
        match app.page() {
            Page::Bookmarks(list) => {
                let ids: Vec<&str> = list.items().iter().map(|b| b.id.as_str()).collect();
                assert_eq!(ids, vec!["b2"]);
            }
            _ => panic!("bookmarks page not mounted"),
        }
    }

    #[tokio::test]
    async fn test_feedback_success_toast() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);
        next(&mut app).await;

        app.open_feedback();
        if let Overlay::Feedback(input) = &mut app.overlay {
            input.set("More health news");
        }
        app.submit_feedback();
        assert!(matches!(app.overlay, Overlay::None));

        next(&mut app).await;
        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.message, "Thanks for your feedback!");
        assert_eq!(toast.kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_feedback_failure_toast() {
        let app_router = Router::new().route(
            "/api/feedback/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "Mongo down" }))) }),
        );
        let base = spawn_backend(app_router).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);
        next(&mut app).await; // home feed fails
        next(&mut app).await; // ...and raises its toast
        assert_eq!(
            app.notifications.current().map(|n| n.kind),
            Some(NotificationKind::Error)
        );

        app.open_feedback();
        if let Overlay::Feedback(input) = &mut app.overlay {
            input.set("hello");
        }
        app.submit_feedback();
        next(&mut app).await;

        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.message, "Mongo down");
        assert_eq!(toast.kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_blank_feedback_not_sent() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);
        next(&mut app).await;

        app.open_feedback();
        app.submit_feedback();
        assert!(matches!(app.overlay, Overlay::None));
        assert!(app.notifications.current().is_none());
    }

    #[tokio::test]
    async fn test_theme_follows_environment_then_toggles() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);

        assert!(app.theme.is_dark());
        app.toggle_theme();
        assert!(!app.theme.is_dark());
        assert_eq!(app.theme.stored().as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn test_login_then_protected_route_loads() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);
        next(&mut app).await;

        app.navigate(Route::Login);
        if let Page::Login(login) = &mut app.page {
            login.name.set("Asha Rao");
            login.email.set("asha@example.com");
        }
        app.submit_login();

        assert_eq!(app.route(), &Route::Home);
        assert!(app.session().is_signed_in);
        assert_eq!(app.api.user_id().as_deref(), Some("local:asha@example.com"));

        app.navigate(Route::Bookmarks);
        assert_eq!(app.gate_view(), GateView::Content);
        assert!(!app.modal_is_open());
    }

    #[tokio::test]
    async fn test_save_while_signed_out_is_refused() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);
        next(&mut app).await;

        app.save_highlighted::<Bookmark>();
        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.message, "Sign in to save articles to Bookmarks");
    }

    #[tokio::test]
    async fn test_goto_prompt_navigates() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);

        app.open_goto();
        if let Overlay::Goto(input) = &mut app.overlay {
            input.set("/read-later");
        }
        app.submit_goto();
        assert_eq!(app.route(), &Route::ReadLater);
        assert!(app.modal_is_open());
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found() {
        let base = spawn_backend(backend()).await;
        let identity = Arc::new(FixedIdentity::new(Session::signed_out()));
        let mut app = app_with(&base, identity);

        app.navigate(Route::from_path("/nope"));
        assert!(matches!(app.page(), Page::NotFound));
        assert_eq!(app.gate_view(), GateView::Content);
    }
}
