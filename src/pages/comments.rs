use crate::api::ApiResult;
use crate::fetch::{RequestTracker, Ticket};
use crate::models::{Comment, NewComment, UserProfile};

use super::{step, TextInput};

const COMMENT_MAX_LEN: usize = 1000;

/// Comment thread for one article.
///
/// Methods that need the backend return what to send; the caller spawns the
/// request and later feeds the outcome back through the `apply_*` methods.
#[derive(Debug)]
pub struct CommentSection {
    article_id: String,
    article_title: String,
    comments: Vec<Comment>,
    is_loading: bool,
    is_submitting: bool,
    error: Option<String>,
    pub input: TextInput,
    selected: usize,
    tracker: RequestTracker<String>,
    posting: RequestTracker<String>,
}

impl Default for CommentSection {
    fn default() -> Self {
        Self {
            article_id: String::new(),
            article_title: String::new(),
            comments: Vec::new(),
            is_loading: false,
            is_submitting: false,
            error: None,
            input: TextInput::with_limit(COMMENT_MAX_LEN),
            selected: 0,
            tracker: RequestTracker::new(),
            posting: RequestTracker::new(),
        }
    }
}

impl CommentSection {
    /// Point the section at an article. Returns a ticket when the thread
    /// must be (re)fetched.
    pub fn mount(&mut self, article_id: &str, article_title: &str) -> Option<Ticket<String>> {
        if article_id == self.article_id && self.is_loading {
            return None;
        }
        self.article_id = article_id.to_string();
        self.article_title = article_title.to_string();
        self.comments.clear();
        self.selected = 0;
        self.error = None;
        self.is_loading = true;
        self.is_submitting = false;
        self.posting.cancel();
        self.input.clear();
        Some(self.tracker.begin(article_id.to_string()))
    }

    pub fn apply_loaded(&mut self, ticket: &Ticket<String>, result: ApiResult<Vec<Comment>>) {
        if !self.tracker.finish(ticket) {
            tracing::debug!("Dropping stale comments for {}", ticket.key);
            return;
        }
        self.is_loading = false;
        match result {
            Ok(comments) => {
                self.comments = comments;
                self.error = None;
            }
            Err(e) => {
                self.comments.clear();
                self.error = Some(e.message);
            }
        }
        self.selected = 0;
    }

    /// Build the comment to post, or `None` if there is nothing to send.
    /// The ticket is invalidated by the next mount, even of the same article.
    pub fn submit(&mut self, author: Option<&UserProfile>) -> Option<(Ticket<String>, NewComment)> {
        if self.input.is_blank() || self.is_submitting || self.article_id.is_empty() {
            return None;
        }
        self.is_submitting = true;
        self.error = None;

        let mut comment = NewComment::new(&self.article_id, &self.article_title, self.input.trimmed());
        if let Some(user) = author {
            comment.user_id = Some(user.id.clone());
            comment.user_name = Some(user.display_name().to_string());
            comment.user_email = user.primary_email_address.clone();
        }
        Some((self.posting.begin(self.article_id.clone()), comment))
    }

    pub fn apply_posted(&mut self, ticket: &Ticket<String>, result: ApiResult<Comment>) {
        if !self.posting.finish(ticket) {
            tracing::debug!("Dropping comment posted to an earlier view of {}", ticket.key);
            return;
        }
        self.is_submitting = false;
        match result {
            Ok(comment) => {
                self.comments.insert(0, comment);
                self.selected = 0;
                self.input.clear();
            }
            Err(e) => self.error = Some(e.message),
        }
    }

    /// `(article_id, comment_id)` of the highlighted comment, if it has an id.
    pub fn request_delete(&self) -> Option<(String, String)> {
        let comment = self.comments.get(self.selected).filter(|c| c.has_id())?;
        Some((self.article_id.clone(), comment.id.clone()))
    }

    pub fn apply_deleted(&mut self, article_id: &str, comment_id: &str, result: ApiResult<()>) {
        if article_id != self.article_id {
            return;
        }
        match result {
            Ok(()) => {
                self.comments.retain(|c| c.id != comment_id);
                self.selected = self.selected.min(self.comments.len().saturating_sub(1));
            }
            Err(e) => self.error = Some(e.message),
        }
    }

    pub fn select_next(&mut self) {
        self.selected = step(self.selected, self.comments.len(), 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = step(self.selected, self.comments.len(), -1);
    }

    pub fn unmount(&mut self) {
        self.tracker.cancel();
        self.posting.cancel();
        self.is_loading = false;
        self.is_submitting = false;
    }

    pub fn article_id(&self) -> &str {
        &self.article_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
