mod article;
mod comment;
mod feedback;
mod saved;
mod sentiment;
mod summary;
mod user;

pub use article::{Article, Topic};
pub use comment::{Comment, NewComment, RawComment};
pub use feedback::UserFeedback;
pub use saved::{Bookmark, NewSavedItem, RawSavedItem, ReadLaterItem, SavedItem};
pub use sentiment::{SentimentData, SentimentLabel, SentimentSource};
pub use summary::{SummaryData, SummarySource};
pub use user::UserProfile;

/// Render a loosely-typed backend id as a string.
///
/// Mongo-backed endpoints hand back ObjectIds as strings, but older payloads
/// occasionally carry numeric ids. Anything else is treated as missing.
pub(crate) fn id_from_value(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Object(map) => id_from_value(map.get("$oid")),
        _ => None,
    }
}
