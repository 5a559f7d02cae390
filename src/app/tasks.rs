use std::future::Future;

use futures::future;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::ApiResult;
use crate::fetch::Ticket;
use crate::models::{Article, Bookmark, NewComment, NewSavedItem, ReadLaterItem, SavedItem, Topic};
use crate::services::{NewsService, UserService};

use super::event::{AppEvent, SavedEvent};
use super::notification::NotificationKind;

/// Spawns backend calls and reports their results as [`AppEvent`]s.
///
/// Nothing here mutates UI state; results are applied on the UI loop, where
/// stale tickets are discarded.
#[derive(Clone)]
pub struct Tasks {
    news: NewsService,
    users: UserService,
    tx: UnboundedSender<AppEvent>,
}

impl Tasks {
    pub fn new(news: NewsService, users: UserService, tx: UnboundedSender<AppEvent>) -> Self {
        Self { news, users, tx }
    }

    pub fn notifier(&self) -> Notifier {
        Notifier::new(self.tx.clone())
    }

    fn emit(tx: &UnboundedSender<AppEvent>, event: AppEvent) {
        if tx.send(event).is_err() {
            tracing::debug!("UI loop gone; dropping task result");
        }
    }

    pub fn fetch_news(&self, ticket: Ticket<Topic>) {
        let news = self.news.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = news.get_news_by_topic(ticket.key).await;
            Self::emit(&tx, AppEvent::NewsLoaded { ticket, result });
        });
    }

    /// Summary and sentiment for one article, fetched side by side.
    pub fn fetch_insight(&self, ticket: Ticket<String>, article: &Article) {
        let news = self.news.clone();
        let tx = self.tx.clone();
        let url = article.url.clone();
        let content = article.content.clone();
        let description = article.description.clone();
        let text = article.sentiment_text();
        tokio::spawn(async move {
            let (summary, sentiment) = future::join(
                news.get_summary(&url, content.as_deref(), description.as_deref()),
                news.get_sentiment(&text),
            )
            .await;
            Self::emit(
                &tx,
                AppEvent::InsightLoaded {
                    ticket,
                    summary,
                    sentiment,
                },
            );
        });
    }

    pub fn fetch_comments(&self, ticket: Ticket<String>) {
        let users = self.users.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = users.get_comments(&ticket.key).await;
            Self::emit(&tx, AppEvent::CommentsLoaded { ticket, result });
        });
    }

    pub fn post_comment(&self, ticket: Ticket<String>, comment: NewComment) {
        let users = self.users.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = users.post_comment(&comment).await;
            Self::emit(&tx, AppEvent::CommentPosted { ticket, result });
        });
    }

    pub fn delete_comment(&self, article_id: String, comment_id: String) {
        let users = self.users.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = users.delete_comment(&comment_id).await;
            Self::emit(
                &tx,
                AppEvent::CommentDeleted {
                    article_id,
                    comment_id,
                    result,
                },
            );
        });
    }

    pub fn submit_feedback(&self, message: String) {
        let news = self.news.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = news.submit_feedback(&message).await;
            Self::emit(&tx, AppEvent::FeedbackSubmitted(result));
        });
    }

    /// Save an article from the feed; the outcome is only reported as a toast.
    pub fn save_article<T: SavedKind>(&self, item: NewSavedItem) {
        let users = self.users.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let (message, kind) = match T::add(&users, &item).await {
                Ok(_) => (format!("Saved to {}", T::LABEL), NotificationKind::Success),
                Err(e) => (e.message, NotificationKind::Error),
            };
            Self::emit(&tx, AppEvent::Notify { message, kind });
        });
    }

    pub fn fetch_saved<T: SavedKind>(&self, ticket: Ticket<()>) {
        let users = self.users.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = T::list(&users).await;
            Self::emit(&tx, T::wrap(SavedEvent::Loaded { ticket, result }));
        });
    }

    pub fn add_saved<T: SavedKind>(&self, item: NewSavedItem) {
        let users = self.users.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = T::add(&users, &item).await;
            Self::emit(&tx, T::wrap(SavedEvent::Added { result }));
        });
    }

    pub fn remove_saved<T: SavedKind>(&self, id: String) {
        let users = self.users.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = T::remove(&users, &id).await;
            Self::emit(&tx, T::wrap(SavedEvent::Removed { id, result }));
        });
    }
}

/// Handle pages use to raise a toast without owning the shell.
#[derive(Clone)]
pub struct Notifier {
    tx: UnboundedSender<AppEvent>,
}

impl Notifier {
    pub fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }

    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        Tasks::emit(
            &self.tx,
            AppEvent::Notify {
                message: message.into(),
                kind,
            },
        );
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }
}

/// Binds a saved-list item type to its endpoints and event variant.
pub trait SavedKind: SavedItem + Sync {
    const LABEL: &'static str;

    fn list(users: &UserService) -> impl Future<Output = ApiResult<Vec<Self>>> + Send;
    fn add(users: &UserService, item: &NewSavedItem) -> impl Future<Output = ApiResult<Self>> + Send;
    fn remove(users: &UserService, id: &str) -> impl Future<Output = ApiResult<()>> + Send;
    fn wrap(event: SavedEvent<Self>) -> AppEvent;
}

impl SavedKind for Bookmark {
    const LABEL: &'static str = "Bookmarks";

    fn list(users: &UserService) -> impl Future<Output = ApiResult<Vec<Self>>> + Send {
        users.get_bookmarks()
    }

    fn add(users: &UserService, item: &NewSavedItem) -> impl Future<Output = ApiResult<Self>> + Send {
        users.add_bookmark(item)
    }

    fn remove(users: &UserService, id: &str) -> impl Future<Output = ApiResult<()>> + Send {
        users.remove_bookmark(id)
    }

    fn wrap(event: SavedEvent<Self>) -> AppEvent {
        AppEvent::Bookmarks(event)
    }
}

impl SavedKind for ReadLaterItem {
    const LABEL: &'static str = "Read Later";

    fn list(users: &UserService) -> impl Future<Output = ApiResult<Vec<Self>>> + Send {
        users.get_read_later()
    }

    fn add(users: &UserService, item: &NewSavedItem) -> impl Future<Output = ApiResult<Self>> + Send {
        users.add_to_read_later(item)
    }

    fn remove(users: &UserService, id: &str) -> impl Future<Output = ApiResult<()>> + Send {
        users.remove_from_read_later(id)
    }

    fn wrap(event: SavedEvent<Self>) -> AppEvent {
        AppEvent::ReadLater(event)
    }
}
