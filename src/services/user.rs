use serde::Deserialize;

use crate::api::{ApiClient, ApiError, ApiResult, FALLBACK_ERROR_MESSAGE};
use crate::models::{
    id_from_value, Bookmark, Comment, NewComment, NewSavedItem, RawComment, RawSavedItem,
    ReadLaterItem, SavedItem,
};

#[derive(Deserialize)]
struct BookmarksResponse {
    #[serde(default)]
    bookmarks: Vec<RawSavedItem>,
}

#[derive(Deserialize)]
struct ReadLaterResponse {
    #[serde(default)]
    items: Vec<RawSavedItem>,
}

#[derive(Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: Vec<RawComment>,
}

#[derive(Deserialize)]
struct CreatedResponse {
    #[serde(default)]
    bookmark_id: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<serde_json::Value>,
}

impl CreatedResponse {
    fn id(&self) -> ApiResult<String> {
        id_from_value(self.bookmark_id.as_ref())
            .or_else(|| id_from_value(self.id.as_ref()))
            .or_else(|| id_from_value(self.mongo_id.as_ref()))
            .ok_or_else(|| {
                tracing::warn!("Create response carried no id");
                ApiError::new(FALLBACK_ERROR_MESSAGE)
            })
    }
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

fn normalize_all<T: SavedItem>(raw: Vec<RawSavedItem>) -> Vec<T> {
    let total = raw.len();
    let items: Vec<T> = raw.into_iter().filter_map(T::from_raw).collect();
    if items.len() < total {
        tracing::warn!("Dropped {} saved entries without an id", total - items.len());
    }
    items
}

/// Bookmarks, read-later queue and comments.
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // ==================== Bookmarks ====================

    pub async fn get_bookmarks(&self) -> ApiResult<Vec<Bookmark>> {
        let response: BookmarksResponse = self.api.get("/api/bookmarks/").await?;
        Ok(normalize_all(response.bookmarks))
    }

    pub async fn add_bookmark(&self, item: &NewSavedItem) -> ApiResult<Bookmark> {
        let response: CreatedResponse = self.api.post("/api/bookmarks/", item).await?;
        Ok(Bookmark::from_created(response.id()?, item))
    }

    pub async fn remove_bookmark(&self, id: &str) -> ApiResult<()> {
        self.api.delete(&format!("/api/bookmarks/{}/", segment(id))).await
    }

    // ==================== Read later ====================

    pub async fn get_read_later(&self) -> ApiResult<Vec<ReadLaterItem>> {
        let response: ReadLaterResponse = self.api.get("/api/read-later/").await?;
        Ok(normalize_all(response.items))
    }

    pub async fn add_to_read_later(&self, item: &NewSavedItem) -> ApiResult<ReadLaterItem> {
        let response: CreatedResponse = self.api.post("/api/read-later/", item).await?;
        Ok(ReadLaterItem::from_created(response.id()?, item))
    }

    pub async fn remove_from_read_later(&self, id: &str) -> ApiResult<()> {
        self.api.delete(&format!("/api/read-later/{}/", segment(id))).await
    }

    // ==================== Comments ====================

    pub async fn get_comments(&self, article_id: &str) -> ApiResult<Vec<Comment>> {
        let response: CommentsResponse = self
            .api
            .get(&format!("/api/comments/{}/", segment(article_id)))
            .await?;
        let comments: Vec<Comment> = response
            .comments
            .into_iter()
            .map(|raw| raw.normalize(None))
            .collect();
        let without_id = comments.iter().filter(|c| !c.has_id()).count();
        if without_id > 0 {
            tracing::debug!("{} comments on {} carry no id", without_id, article_id);
        }
        Ok(comments)
    }

    pub async fn post_comment(&self, comment: &NewComment) -> ApiResult<Comment> {
        let raw: RawComment = self.api.post("/api/comments/", comment).await?;
        let created = raw.normalize(Some(comment));
        if !created.has_id() {
            tracing::warn!("Comment response carried no id");
        }
        Ok(created)
    }

    pub async fn delete_comment(&self, comment_id: &str) -> ApiResult<()> {
        self.api
            .delete(&format!("/api/comments/{}/", segment(comment_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_backend;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn service(app: Router) -> UserService {
        let base = spawn_backend(app).await;
        UserService::new(ApiClient::new(&base, Duration::from_secs(5)).unwrap())
    }

    fn new_item() -> NewSavedItem {
        NewSavedItem {
            user_id: Some("u1".into()),
            article_id: "a1".into(),
            title: "Sample".into(),
            source: "Wire".into(),
            url: "https://news.example/a1".into(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_bookmarks_mongo_ids_are_normalized() {
        let app = Router::new().route(
            "/api/bookmarks/",
            get(|| async {
                Json(json!({
                    "count": 3,
                    "bookmarks": [
                        { "_id": "m1", "article_id": "a1", "title": "One", "source": "S", "url": "https://1" },
                        { "_id": "m2", "article_id": "a2", "title": "Two", "source": "S", "url": "https://2" },
                        { "id": "p3", "article_id": "a3", "title": "Three", "source": "S", "url": "https://3" }
                    ]
                }))
            }),
        );
        let items = service(app).await.get_bookmarks().await.unwrap();
        let ids: Vec<&str> = items.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "p3"]);
    }

    #[tokio::test]
    async fn test_add_bookmark_uses_returned_id() {
        let app = Router::new().route(
            "/api/bookmarks/",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["article_id"], "a1");
                assert_eq!(body["user_id"], "u1");
                Json(json!({ "message": "Bookmark added", "bookmark_id": "new-b" }))
            }),
        );
        let bookmark = service(app).await.add_bookmark(&new_item()).await.unwrap();
        assert_eq!(bookmark.id, "new-b");
        assert_eq!(bookmark.title, "Sample");
    }

    #[tokio::test]
    async fn test_duplicate_bookmark_surfaces_detail() {
        let app = Router::new().route(
            "/api/bookmarks/",
            post(|| async {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Already bookmarked" })))
            }),
        );
        let err = service(app).await.add_bookmark(&new_item()).await.unwrap_err();
        assert_eq!(err.message, "Already bookmarked");
    }

    #[tokio::test]
    async fn test_read_later_round() {
        let app = Router::new()
            .route(
                "/api/read-later/",
                get(|| async {
                    Json(json!({ "count": 1, "items": [{ "_id": "r1", "title": "Later", "source": "S", "url": "https://r" }] }))
                })
                .post(|| async { Json(json!({ "message": "Saved", "id": "r2" })) }),
            )
            .route(
                "/api/read-later/:id/",
                delete(|Path(id): Path<String>| async move {
                    if id == "r1" {
                        StatusCode::OK
                    } else {
                        StatusCode::NOT_FOUND
                    }
                }),
            );
        let svc = service(app).await;

        let items = svc.get_read_later().await.unwrap();
        assert_eq!(items[0].id, "r1");

        let created = svc.add_to_read_later(&new_item()).await.unwrap();
        assert_eq!(created.id, "r2");

        assert!(svc.remove_from_read_later("r1").await.is_ok());
        assert!(svc.remove_from_read_later("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_comments_are_remapped() {
        let app = Router::new().route(
            "/api/comments/:article_id/",
            get(|Path(article_id): Path<String>| async move {
                Json(json!({
                    "count": 2,
                    "comments": [
                        { "_id": "c2", "article_id": article_id, "article_title": "T", "user_name": "asha", "text": "Second", "created_at": "2024-05-01T09:00:00" },
                        { "id": "c1", "article_id": article_id, "article_title": "T", "username": "ravi", "text": "First", "created_at": "2024-05-01T08:00:00" }
                    ]
                }))
            }),
        );
        let comments = service(app).await.get_comments("a1").await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, "c2");
        assert_eq!(comments[0].username.as_deref(), Some("asha"));
        assert_eq!(comments[1].username.as_deref(), Some("ravi"));
        assert!(comments.iter().all(|c| c.article_id == "a1"));
    }

    #[tokio::test]
    async fn test_listed_comments_without_ids_are_kept() {
        let app = Router::new().route(
            "/api/comments/:article_id/",
            get(|Path(article_id): Path<String>| async move {
                Json(json!({
                    "count": 2,
                    "comments": [
                        { "article_id": article_id, "article_title": "T", "user_name": "asha", "user_email": null, "text": "Second", "created_at": "2024-05-01T09:00:00.654321" },
                        { "article_id": article_id, "article_title": "T", "user_name": "ravi", "user_email": null, "text": "First", "created_at": "2024-05-01T08:00:00.123456" }
                    ]
                }))
            }),
        );
        let comments = service(app).await.get_comments("a1").await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "Second");
        assert_eq!(comments[1].author(), "ravi");
        assert!(comments.iter().all(|c| !c.has_id()));
        assert!(comments.iter().all(|c| c.time_label().is_some()));
    }

    #[tokio::test]
    async fn test_post_comment_from_acknowledgement() {
        let app = Router::new().route(
            "/api/comments/",
            post(|| async { Json(json!({ "message": "Comment added successfully", "comment_id": "c7" })) }),
        );
        let posted = NewComment::new("a1", "Sample", "Great read!");
        let comment = service(app).await.post_comment(&posted).await.unwrap();
        assert_eq!(comment.id, "c7");
        assert_eq!(comment.text, "Great read!");
        assert_eq!(comment.article_id, "a1");
    }

    #[tokio::test]
    async fn test_ids_are_percent_encoded() {
        let app = Router::new().route(
            "/api/comments/:article_id/",
            get(|Path(article_id): Path<String>| async move {
                Json(json!({ "count": 0, "comments": [], "echo": article_id }))
            }),
        );
        // A url-shaped article id must stay one path segment.
        let comments = service(app)
            .await
            .get_comments("https://news.example/a?b=1")
            .await
            .unwrap();
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn test_delete_comment_failure() {
        let app = Router::new().route(
            "/api/comments/:id/",
            delete(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Invalid comment ID format" }))) }),
        );
        let err = service(app).await.delete_comment("bad").await.unwrap_err();
        assert_eq!(err.message, "Invalid comment ID format");
    }
}
