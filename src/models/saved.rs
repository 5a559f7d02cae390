use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{id_from_value, Article};

/// Shared surface of the two user-curated lists.
pub trait SavedItem: Clone + std::fmt::Debug + Send + 'static {
    fn from_raw(raw: RawSavedItem) -> Option<Self>;
    fn from_created(id: String, item: &NewSavedItem) -> Self;
    fn id(&self) -> &str;
    fn article_id(&self) -> &str;
    fn title(&self) -> &str;
    fn source(&self) -> &str;
    fn url(&self) -> &str;
    fn image_url(&self) -> Option<&str>;
    fn created_at(&self) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub article_id: String,
    pub title: String,
    pub source: String,
    pub url: String,
    pub image_url: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadLaterItem {
    pub id: String,
    pub article_id: String,
    pub title: String,
    pub source: String,
    pub url: String,
    pub image_url: Option<String>,
    pub created_at: Option<String>,
}

/// Wire shape of a bookmark or read-later entry, before the id is settled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSavedItem {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<Value>,
    #[serde(default)]
    pub article_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<Value>,
}

impl RawSavedItem {
    /// `_id` wins over `id`; an entry with neither cannot be deleted later
    /// and is dropped.
    fn canonical_id(&self) -> Option<String> {
        id_from_value(self.mongo_id.as_ref()).or_else(|| id_from_value(self.id.as_ref()))
    }

    fn created_at(&self) -> Option<String> {
        match self.created_at.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("$date").and_then(|d| d.as_str()).map(String::from),
            _ => None,
        }
    }
}

/// Body posted to create either kind of saved entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSavedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub article_id: String,
    pub title: String,
    pub source: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewSavedItem {
    pub fn from_article(article: &Article, user_id: Option<String>) -> Self {
        Self {
            user_id,
            article_id: article.id.clone(),
            title: article.title.clone(),
            source: article.source.clone(),
            url: article.url.clone(),
            image_url: article.image_url.clone(),
        }
    }
}

impl SavedItem for Bookmark {
    fn from_raw(raw: RawSavedItem) -> Option<Self> {
        let id = raw.canonical_id()?;
        let created_at = raw.created_at();
        Some(Self {
            article_id: raw.article_id.unwrap_or_default(),
            title: raw.title.unwrap_or_else(|| "Untitled".to_string()),
            source: raw.source.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            image_url: raw.image_url,
            created_at,
            id,
        })
    }

    fn from_created(id: String, item: &NewSavedItem) -> Self {
        Self {
            id,
            article_id: item.article_id.clone(),
            title: item.title.clone(),
            source: item.source.clone(),
            url: item.url.clone(),
            image_url: item.image_url.clone(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn article_id(&self) -> &str {
        &self.article_id
    }

    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl SavedItem for ReadLaterItem {
    fn from_raw(raw: RawSavedItem) -> Option<Self> {
        let id = raw.canonical_id()?;
        let created_at = raw.created_at();
        Some(Self {
            article_id: raw.article_id.unwrap_or_default(),
            title: raw.title.unwrap_or_else(|| "Untitled".to_string()),
            source: raw.source.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            image_url: raw.image_url,
            created_at,
            id,
        })
    }

    fn from_created(id: String, item: &NewSavedItem) -> Self {
        Self {
            id,
            article_id: item.article_id.clone(),
            title: item.title.clone(),
            source: item.source.clone(),
            url: item.url.clone(),
            image_url: item.image_url.clone(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn article_id(&self) -> &str {
        &self.article_id
    }

    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}
