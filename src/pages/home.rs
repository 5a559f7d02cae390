use crate::api::ApiResult;
use crate::app::Notifier;
use crate::fetch::{RequestTracker, Ticket};
use crate::models::{Article, NewSavedItem, SentimentData, SummaryData, Topic};
use crate::services::TopicNews;

use super::{step, CommentSection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeFocus {
    #[default]
    Articles,
    Comments,
    CommentInput,
}

/// Summary and sentiment for the open article.
#[derive(Debug, Default)]
pub struct InsightPanel {
    pub summary: Option<SummaryData>,
    pub summary_error: Option<String>,
    pub sentiment: Option<SentimentData>,
    pub sentiment_error: Option<String>,
    tracker: RequestTracker<String>,
}

impl InsightPanel {
    pub fn begin(&mut self, article_id: &str) -> Ticket<String> {
        self.summary = None;
        self.summary_error = None;
        self.sentiment = None;
        self.sentiment_error = None;
        self.tracker.begin(article_id.to_string())
    }

    pub fn apply(
        &mut self,
        ticket: &Ticket<String>,
        summary: ApiResult<SummaryData>,
        sentiment: ApiResult<SentimentData>,
    ) {
        if !self.tracker.finish(ticket) {
            tracing::debug!("Dropping stale insight for {}", ticket.key);
            return;
        }
        match summary {
            Ok(data) => self.summary = Some(data),
            Err(e) => self.summary_error = Some(e.message),
        }
        match sentiment {
            Ok(data) => self.sentiment = Some(data),
            Err(e) => self.sentiment_error = Some(e.message),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_pending()
    }

    pub fn cancel(&mut self) {
        self.tracker.cancel();
    }
}

/// Requests to issue after opening an article.
#[derive(Debug)]
pub struct OpenedArticle {
    pub article: Article,
    pub insight: Ticket<String>,
    pub comments: Option<Ticket<String>>,
}

/// Topic feed with an article detail pane.
pub struct HomePage {
    topic: Topic,
    articles: Vec<Article>,
    is_loading: bool,
    selected: usize,
    open: Option<Article>,
    focus: HomeFocus,
    news: RequestTracker<Topic>,
    notifier: Notifier,
    pub insight: InsightPanel,
    pub comments: CommentSection,
}

impl HomePage {
    pub fn new(topic: Topic, notifier: Notifier) -> Self {
        Self {
            topic,
            articles: Vec::new(),
            is_loading: false,
            selected: 0,
            open: None,
            focus: HomeFocus::Articles,
            news: RequestTracker::new(),
            notifier,
            insight: InsightPanel::default(),
            comments: CommentSection::default(),
        }
    }

    pub fn load(&mut self) -> Ticket<Topic> {
        self.is_loading = true;
        self.news.begin(self.topic)
    }

    /// Switch feeds; returns a ticket when the topic actually changed.
    pub fn set_topic(&mut self, topic: Topic) -> Option<Ticket<Topic>> {
        if topic == self.topic && (self.is_loading || !self.articles.is_empty()) {
            return None;
        }
        self.topic = topic;
        self.articles.clear();
        self.selected = 0;
        self.close_article();
        Some(self.load())
    }

    pub fn apply_news(&mut self, ticket: &Ticket<Topic>, result: ApiResult<TopicNews>) {
        if !self.news.finish(ticket) {
            tracing::debug!("Dropping stale feed for {}", ticket.key.as_str());
            return;
        }
        self.is_loading = false;
        match result {
            Ok(news) => {
                self.articles = news.articles;
                self.selected = 0;
            }
            Err(e) => {
                self.articles.clear();
                self.notifier.error(e.message);
            }
        }
    }

    pub fn open_selected(&mut self) -> Option<OpenedArticle> {
        let article = self.articles.get(self.selected)?.clone();
        let insight = self.insight.begin(&article.id);
        let comments = self.comments.mount(&article.id, &article.title);
        self.open = Some(article.clone());
        self.focus = HomeFocus::Articles;
        Some(OpenedArticle {
            article,
            insight,
            comments,
        })
    }

    pub fn close_article(&mut self) {
        self.open = None;
        self.focus = HomeFocus::Articles;
        self.insight.cancel();
        self.comments.unmount();
    }

    /// Body for a bookmark / read-later request from the highlighted article.
    pub fn save_request(&self, user_id: Option<String>) -> Option<NewSavedItem> {
        let article = self.open.as_ref().or_else(|| self.articles.get(self.selected))?;
        Some(NewSavedItem::from_article(article, user_id))
    }

    pub fn highlighted_url(&self) -> Option<&str> {
        self.open
            .as_ref()
            .or_else(|| self.articles.get(self.selected))
            .map(|a| a.url.as_str())
    }

    pub fn select_next(&mut self) {
        self.selected = step(self.selected, self.articles.len(), 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = step(self.selected, self.articles.len(), -1);
    }

    pub fn cycle_focus(&mut self) {
        if self.open.is_none() {
            self.focus = HomeFocus::Articles;
            return;
        }
        self.focus = match self.focus {
            HomeFocus::Articles => HomeFocus::Comments,
            HomeFocus::Comments => HomeFocus::CommentInput,
            HomeFocus::CommentInput => HomeFocus::Articles,
        };
    }

    pub fn set_focus(&mut self, focus: HomeFocus) {
        if self.open.is_some() || focus == HomeFocus::Articles {
            self.focus = focus;
        }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn open_article(&self) -> Option<&Article> {
        self.open.as_ref()
    }

    pub fn focus(&self) -> HomeFocus {
        self.focus
    }
}
