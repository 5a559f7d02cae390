use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id_from_value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub article_id: String,
    pub article_title: String,
    pub text: String,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub created_at: String,
}

impl Comment {
    pub fn author(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Anonymous")
    }

    pub fn initial(&self) -> char {
        self.username
            .as_deref()
            .and_then(|name| name.chars().next())
            .unwrap_or('U')
    }

    /// Comments listed by the backend carry no id and cannot be deleted.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// `HH:MM` in local time, or nothing if the timestamp is unreadable.
    /// Timestamps without an offset are stored by the backend in UTC.
    pub fn time_label(&self) -> Option<String> {
        let utc = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .ok()
            .or_else(|| {
                chrono::NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })?;
        Some(utc.with_timezone(&chrono::Local).format("%H:%M").to_string())
    }
}

/// Any comment payload the backend has produced over time.
///
/// Field names drifted between releases (`_id`/`id`/`comment_id`,
/// `user_name`/`username`), so every field is optional here and resolved in
/// [`RawComment::normalize`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<Value>,
    #[serde(default)]
    pub comment_id: Option<Value>,
    #[serde(default)]
    pub article_id: Option<String>,
    #[serde(default)]
    pub article_title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<Value>,
}

impl RawComment {
    /// Map to the canonical shape. `fallback` fills the fields a bare
    /// `{message, comment_id}` acknowledgement leaves out. A missing id
    /// becomes the empty string; see [`Comment::has_id`].
    pub fn normalize(self, fallback: Option<&NewComment>) -> Comment {
        let id = id_from_value(self.id.as_ref())
            .or_else(|| id_from_value(self.mongo_id.as_ref()))
            .or_else(|| id_from_value(self.comment_id.as_ref()))
            .unwrap_or_default();

        let created_at = match self.created_at {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Object(map)) => map
                .get("$date")
                .and_then(|d| d.as_str())
                .map(String::from)
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            _ => chrono::Utc::now().to_rfc3339(),
        };

        Comment {
            id,
            article_id: self
                .article_id
                .or_else(|| fallback.map(|c| c.article_id.clone()))
                .unwrap_or_default(),
            article_title: self
                .article_title
                .or_else(|| fallback.map(|c| c.article_title.clone()))
                .unwrap_or_default(),
            text: self
                .text
                .or_else(|| fallback.map(|c| c.text.clone()))
                .unwrap_or_default(),
            user_id: self.user_id.or_else(|| fallback.and_then(|c| c.user_id.clone())),
            username: self
                .username
                .or(self.user_name)
                .or_else(|| fallback.and_then(|c| c.user_name.clone())),
            created_at,
        }
    }
}

/// Body posted to `/api/comments/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub article_id: String,
    pub article_title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl NewComment {
    pub fn new(article_id: impl Into<String>, article_title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            article_id: article_id.into(),
            article_title: article_title.into(),
            text: text.into(),
            user_id: None,
            user_name: None,
            user_email: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawComment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_backend_shape_is_remapped() {
        let comment = raw(json!({
            "_id": "c1",
            "article_id": "a1",
            "article_title": "Sample",
            "user_name": "asha",
            "text": "Nice",
            "created_at": "2024-05-01T08:00:00"
        }))
        .normalize(None);

        assert_eq!(comment.id, "c1");
        assert!(comment.has_id());
        assert_eq!(comment.username.as_deref(), Some("asha"));
        assert_eq!(comment.created_at, "2024-05-01T08:00:00");
        assert!(comment.time_label().is_some());
    }

    #[test]
    fn test_naive_time_is_utc() {
        let at = |created_at: &str| {
            raw(json!({ "text": "x", "created_at": created_at }))
                .normalize(None)
                .time_label()
        };
        let expected = chrono::DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string();

        assert_eq!(at("2024-05-01T08:00:00Z").as_deref(), Some(expected.as_str()));
        assert_eq!(at("2024-05-01T08:00:00.123456").as_deref(), Some(expected.as_str()));
        assert_eq!(at("2024-05-01T10:00:00+02:00").as_deref(), Some(expected.as_str()));
        assert_eq!(at("yesterday"), None);
    }

    #[test]
    fn test_ack_shape_uses_fallback() {
        let posted = NewComment::new("a1", "Sample", "Great read!");
        let comment = raw(json!({ "message": "Comment added successfully", "comment_id": "c9" }))
            .normalize(Some(&posted));

        assert_eq!(comment.id, "c9");
        assert_eq!(comment.article_id, "a1");
        assert_eq!(comment.article_title, "Sample");
        assert_eq!(comment.text, "Great read!");
        assert!(!comment.created_at.is_empty());
    }

    #[test]
    fn test_missing_id_is_kept_without_id() {
        let comment = raw(json!({ "text": "hello", "user_name": "asha", "user_email": null }))
            .normalize(None);
        assert_eq!(comment.text, "hello");
        assert_eq!(comment.id, "");
        assert!(!comment.has_id());
    }

    #[test]
    fn test_author_defaults() {
        let comment = raw(json!({ "id": "c2", "text": "x" })).normalize(None);
        assert_eq!(comment.author(), "Anonymous");
        assert_eq!(comment.initial(), 'U');
    }

    #[test]
    fn test_new_comment_body() {
        let body = serde_json::to_value(NewComment::new("a1", "Sample", "Hi")).unwrap();
        assert_eq!(body, json!({ "article_id": "a1", "article_title": "Sample", "text": "Hi" }));
    }
}
