use crate::api::ApiResult;
use crate::fetch::{RequestTracker, Ticket};
use crate::models::{NewSavedItem, SavedItem};

use super::step;

/// Bookmarks or read-later queue.
#[derive(Debug)]
pub struct SavedList<T> {
    items: Vec<T>,
    is_loading: bool,
    error: Option<String>,
    selected: usize,
    pending_removal: Option<String>,
    last_removed: Option<NewSavedItem>,
    tracker: RequestTracker<()>,
}

impl<T> Default for SavedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
            selected: 0,
            pending_removal: None,
            last_removed: None,
            tracker: RequestTracker::default(),
        }
    }
}

impl<T: SavedItem> SavedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self) -> Ticket<()> {
        self.is_loading = true;
        self.error = None;
        self.tracker.begin(())
    }

    pub fn apply_loaded(&mut self, ticket: &Ticket<()>, result: ApiResult<Vec<T>>) {
        if !self.tracker.finish(ticket) {
            return;
        }
        self.is_loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                self.items.clear();
                self.error = Some(e.message);
            }
        }
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    pub fn apply_added(&mut self, result: ApiResult<T>) {
        match result {
            Ok(item) => {
                self.items.push(item);
                self.error = None;
            }
            Err(e) => self.error = Some(e.message),
        }
    }

    /// Id of the highlighted entry, if no other removal is in flight.
    pub fn request_remove(&mut self) -> Option<String> {
        if self.pending_removal.is_some() {
            return None;
        }
        let id = self.items.get(self.selected)?.id().to_string();
        self.pending_removal = Some(id.clone());
        Some(id)
    }

    pub fn apply_removed(&mut self, id: &str, result: ApiResult<()>) {
        if self.pending_removal.as_deref() == Some(id) {
            self.pending_removal = None;
        }
        match result {
            Ok(()) => {
                if let Some(pos) = self.items.iter().position(|item| item.id() == id) {
                    let removed = self.items.remove(pos);
                    self.last_removed = Some(NewSavedItem {
                        user_id: None,
                        article_id: removed.article_id().to_string(),
                        title: removed.title().to_string(),
                        source: removed.source().to_string(),
                        url: removed.url().to_string(),
                        image_url: removed.image_url().map(String::from),
                    });
                }
                self.error = None;
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
            }
            Err(e) => self.error = Some(e.message),
        }
    }

    /// Re-create the most recently removed entry.
    pub fn take_undo(&mut self, user_id: Option<String>) -> Option<NewSavedItem> {
        let mut item = self.last_removed.take()?;
        item.user_id = user_id;
        Some(item)
    }

    pub fn select_next(&mut self) {
        self.selected = step(self.selected, self.items.len(), 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = step(self.selected, self.items.len(), -1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        self.last_removed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::{Bookmark, ReadLaterItem};

    fn bookmark(id: &str) -> Bookmark {
        Bookmark {
            id: id.to_string(),
            article_id: format!("article-{}", id),
            title: format!("Title {}", id),
            source: "Wire".to_string(),
            url: format!("https://news.example/{}", id),
            image_url: None,
            created_at: None,
        }
    }

    fn loaded(ids: &[&str]) -> SavedList<Bookmark> {
        let mut list = SavedList::new();
        let ticket = list.load();
        list.apply_loaded(&ticket, Ok(ids.iter().map(|id| bookmark(id)).collect()));
        list
    }

    #[test]
    fn test_load_shows_skeleton_until_result() {
        let mut list: SavedList<Bookmark> = SavedList::new();
        let ticket = list.load();
        assert!(list.is_loading());
        list.apply_loaded(&ticket, Ok(vec![bookmark("b1")]));
        assert!(!list.is_loading());
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn test_load_failure_is_empty_with_error() {
        let mut list: SavedList<ReadLaterItem> = SavedList::new();
        let ticket = list.load();
        list.apply_loaded(&ticket, Err(ApiError::new("Failed to fetch")));
        assert!(!list.is_loading());
        assert!(list.items().is_empty());
        assert_eq!(list.error(), Some("Failed to fetch"));
    }

    #[test]
    fn test_remove_success_prunes_exactly_one() {
        let mut list = loaded(&["b0", "b1", "b2"]);
        list.select_next();
        let id = list.request_remove().unwrap();
        assert_eq!(id, "b1");

        // Nothing changes until the backend answers.
        assert_eq!(list.items().len(), 3);

        list.apply_removed(&id, Ok(()));
        let ids: Vec<&str> = list.items().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b0", "b2"]);
        assert_eq!(list.items()[0], bookmark("b0"));
        assert_eq!(list.items()[1], bookmark("b2"));
        assert_eq!(list.error(), None);
    }

    #[test]
    fn test_remove_failure_leaves_list() {
        let mut list = loaded(&["b0", "b1"]);
        list.select_next();
        let id = list.request_remove().unwrap();
        list.apply_removed(&id, Err(ApiError::new("Bookmark not found")));

        assert_eq!(list.items().len(), 2);
        assert_eq!(list.error(), Some("Bookmark not found"));
        assert!(!list.can_undo());
    }

    #[test]
    fn test_one_removal_at_a_time() {
        let mut list = loaded(&["b0", "b1"]);
        assert!(list.request_remove().is_some());
        assert!(list.request_remove().is_none());
    }

    #[test]
    fn test_added_item_is_appended() {
        let mut list = loaded(&["b0"]);
        list.apply_added(Ok(bookmark("b9")));
        assert_eq!(list.items().last().unwrap().id, "b9");

        list.apply_added(Err(ApiError::new("Already bookmarked")));
        assert_eq!(list.items().len(), 2);
        assert_eq!(list.error(), Some("Already bookmarked"));
    }

    #[test]
    fn test_undo_rebuilds_removed_entry() {
        let mut list = loaded(&["b0"]);
        let id = list.request_remove().unwrap();
        list.apply_removed(&id, Ok(()));
        assert!(list.can_undo());

        let item = list.take_undo(Some("u1".into())).unwrap();
        assert_eq!(item.article_id, "article-b0");
        assert_eq!(item.user_id.as_deref(), Some("u1"));
        assert!(!list.can_undo());
    }

    #[test]
    fn test_stale_load_ignored() {
        let mut list: SavedList<Bookmark> = SavedList::new();
        let first = list.load();
        let second = list.load();
        list.apply_loaded(&first, Ok(vec![bookmark("old")]));
        assert!(list.items().is_empty());
        list.apply_loaded(&second, Ok(vec![bookmark("new")]));
        assert_eq!(list.items()[0].id, "new");
    }
}
