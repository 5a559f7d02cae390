//! Helpers shared by the in-module test suites.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use crate::api::ApiClient;
use crate::app::theme::MemoryPreferences;
use crate::app::App;
use crate::auth::{IdentityProvider, Session};
use crate::config::Config;
use crate::error::Result;
use crate::models::{Article, Topic, UserProfile};

/// Serve `app` on an ephemeral localhost port and return its base url.
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn article(id: &str, title: &str) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("{} description", title)),
        content: None,
        image_url: None,
        source: "Test Wire".to_string(),
        url: format!("https://news.example/{}", id),
        published_at: Some("2024-05-01T08:00:00Z".to_string()),
        category: Some(Topic::General),
        sentiment: None,
    }
}

pub fn user() -> UserProfile {
    UserProfile {
        id: "user_1".to_string(),
        full_name: Some("Asha Rao".to_string()),
        username: Some("asha".to_string()),
        primary_email_address: Some("asha@example.com".to_string()),
        ..Default::default()
    }
}

/// Identity provider whose session is set directly by the test.
pub struct FixedIdentity {
    tx: watch::Sender<Session>,
}

impl FixedIdentity {
    pub fn new(session: Session) -> Self {
        let (tx, _rx) = watch::channel(session);
        Self { tx }
    }

    pub fn set(&self, session: Session) {
        self.tx.send_replace(session);
    }
}

impl IdentityProvider for FixedIdentity {
    fn session(&self) -> Session {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    fn sign_in(&self, user: UserProfile) -> Result<()> {
        self.set(Session::signed_in(user));
        Ok(())
    }

    fn sign_out(&self) -> Result<()> {
        self.set(Session::signed_out());
        Ok(())
    }
}

/// App shell against `base`, with in-memory preferences and a dark terminal.
pub fn app_with(base: &str, identity: Arc<FixedIdentity>) -> App {
    let config = Config {
        api_base_url: base.to_string(),
        ..Config::default()
    };
    let api = ApiClient::new(base, Duration::from_secs(5)).unwrap();
    App::new(
        &config,
        api,
        identity,
        Box::new(MemoryPreferences::default()),
        true,
    )
}

/// Apply the next task result, failing the test if none arrives.
pub async fn next(app: &mut App) {
    let received = tokio::time::timeout(Duration::from_secs(5), app.next_event())
        .await
        .expect("task result in time");
    assert!(received, "event channel closed");
}
