use crate::api::ApiResult;
use crate::fetch::Ticket;
use crate::models::{Bookmark, Comment, ReadLaterItem, SentimentData, SummaryData, Topic};
use crate::services::{FeedbackStatus, TopicNews};

use super::notification::NotificationKind;

/// Results of one saved-list backend call.
#[derive(Debug)]
pub enum SavedEvent<T> {
    Loaded {
        ticket: Ticket<()>,
        result: ApiResult<Vec<T>>,
    },
    Added {
        result: ApiResult<T>,
    },
    Removed {
        id: String,
        result: ApiResult<()>,
    },
}

/// Everything a background task can report back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    NewsLoaded {
        ticket: Ticket<Topic>,
        result: ApiResult<TopicNews>,
    },
    InsightLoaded {
        ticket: Ticket<String>,
        summary: ApiResult<SummaryData>,
        sentiment: ApiResult<SentimentData>,
    },
    CommentsLoaded {
        ticket: Ticket<String>,
        result: ApiResult<Vec<Comment>>,
    },
    CommentPosted {
        ticket: Ticket<String>,
        result: ApiResult<Comment>,
    },
    CommentDeleted {
        article_id: String,
        comment_id: String,
        result: ApiResult<()>,
    },
    Bookmarks(SavedEvent<Bookmark>),
    ReadLater(SavedEvent<ReadLaterItem>),
    FeedbackSubmitted(ApiResult<FeedbackStatus>),
    Notify {
        message: String,
        kind: NotificationKind,
    },
}
