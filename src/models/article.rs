use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::SentimentData;

/// News categories the backend can serve a feed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    #[default]
    General,
    Nation,
    Business,
    Technology,
    Sports,
    Entertainment,
    Health,
}

impl Topic {
    pub const ALL: [Topic; 7] = [
        Topic::General,
        Topic::Nation,
        Topic::Business,
        Topic::Technology,
        Topic::Sports,
        Topic::Entertainment,
        Topic::Health,
    ];

    /// Path segment used by `/api/news/topic/{topic}`
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::General => "general",
            Topic::Nation => "nation",
            Topic::Business => "business",
            Topic::Technology => "technology",
            Topic::Sports => "sports",
            Topic::Entertainment => "entertainment",
            Topic::Health => "health",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Topic::General => "General",
            Topic::Nation => "Nation",
            Topic::Business => "Business",
            Topic::Technology => "Technology",
            Topic::Sports => "Sports",
            Topic::Entertainment => "Entertainment",
            Topic::Health => "Health",
        }
    }

    pub fn next(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "source_name")]
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub category: Option<Topic>,
    #[serde(default)]
    pub sentiment: Option<SentimentData>,
}

impl Article {
    /// Canonicalize an article straight after deserialization.
    ///
    /// Feed articles are keyed by url on the backend; when no explicit id is
    /// present the url stands in for it.
    pub fn normalize(mut self) -> Self {
        self.id = self.id.trim().to_string();
        if self.id.is_empty() {
            self.id = self.url.clone();
        }
        if self.title.trim().is_empty() {
            self.title = "Untitled".to_string();
        }
        if self.source.trim().is_empty() {
            self.source = url::Url::parse(&self.url)
                .ok()
                .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
                .unwrap_or_else(|| "Unknown source".to_string());
        }
        self
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }

    /// Text handed to sentiment analysis: title plus whatever body we have.
    pub fn sentiment_text(&self) -> String {
        let body = self
            .description
            .as_deref()
            .or(self.content.as_deref())
            .unwrap_or_default();
        if body.is_empty() {
            self.title.clone()
        } else {
            format!("{}. {}", self.title, body)
        }
    }

    /// Plain-text article body for the detail pane.
    pub fn body_text(&self, width: usize) -> Option<String> {
        let raw = self.content.as_deref().or(self.description.as_deref())?;
        let text = html2text::from_read(raw.as_bytes(), width.max(20)).ok()?;
        let cleaned = text
            .lines()
            .map(|l| l.trim_end())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}

/// GNews sends `source` as `{ name, url }`; the backend flattens it to a
/// string. Accept both.
fn source_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Object(map)) => map
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    })
}
