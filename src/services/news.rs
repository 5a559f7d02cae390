use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiResult};
use crate::models::{Article, SentimentData, SummaryData, Topic, UserFeedback};

#[derive(Debug, Clone, PartialEq)]
pub struct TopicNews {
    pub articles: Vec<Article>,
    /// Always false; the backend exposes no demo-mode signal.
    pub is_demo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackStatus {
    pub status: String,
}

#[derive(Deserialize)]
struct TopicNewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Serialize)]
struct SummaryRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct SentimentRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct SentimentResponse {
    result: SentimentData,
}

#[derive(Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

/// News feed, summaries, sentiment and feedback.
#[derive(Clone)]
pub struct NewsService {
    api: ApiClient,
}

impl NewsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_news_by_topic(&self, topic: Topic) -> ApiResult<TopicNews> {
        let response: TopicNewsResponse = self
            .api
            .get(&format!("/api/news/topic/{}", topic.as_str()))
            .await
            .inspect_err(|e| tracing::warn!("Failed to fetch news for topic {}: {}", topic.as_str(), e))?;

        tracing::debug!(
            "Topic {}: {} articles (reported {:?}, source {:?})",
            topic.as_str(),
            response.articles.len(),
            response.count,
            response.source
        );

        let articles = response
            .articles
            .into_iter()
            .map(Article::normalize)
            .filter(|a| !a.url.trim().is_empty())
            .collect();

        Ok(TopicNews {
            articles,
            is_demo: false,
        })
    }

    /// Ask for a summary. Full `content` is preferred; `description` lets the
    /// backend fall back when the source is paywalled.
    pub async fn get_summary(
        &self,
        url: &str,
        content: Option<&str>,
        description: Option<&str>,
    ) -> ApiResult<SummaryData> {
        let body = SummaryRequest {
            url,
            content: content.filter(|c| !c.trim().is_empty()),
            description: description.filter(|d| !d.trim().is_empty()),
        };
        self.api.post("/api/summary/", &body).await
    }

    pub async fn get_sentiment(&self, text: &str) -> ApiResult<SentimentData> {
        let response: SentimentResponse = self
            .api
            .post("/api/sentiment/", &SentimentRequest { text })
            .await?;
        Ok(response.result)
    }

    pub async fn submit_feedback(&self, message: &str) -> ApiResult<FeedbackStatus> {
        let response: MessageResponse = self
            .api
            .post("/api/feedback/", &UserFeedback::new(message))
            .await?;
        Ok(FeedbackStatus {
            status: response.message,
        })
    }
}
