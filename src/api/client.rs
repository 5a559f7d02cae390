use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

const USER_AGENT_STRING: &str = concat!("newsaura/", env!("CARGO_PKG_VERSION"));
const USER_ID_HEADER: &str = "X-User-Id";

pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
const TIMEOUT_ERROR_MESSAGE: &str = "The request timed out. Please try again.";

/// The only failure shape callers ever see: a message fit for the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    fn from_transport(err: reqwest::Error) -> Self {
        tracing::warn!("Transport error: {}", err);
        let message = if err.is_timeout() {
            TIMEOUT_ERROR_MESSAGE
        } else {
            FALLBACK_ERROR_MESSAGE
        };
        Self {
            message: message.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Best-effort extraction of a server-provided message from an error body.
///
/// Looks at `detail`, `message` and `error` in that order. FastAPI
/// validation failures put a list under `detail`; the first entry's `msg`
/// is used then.
pub fn get_error_message(status: Option<StatusCode>, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let from_body = parsed.as_ref().and_then(|json| {
        ["detail", "message", "error"].iter().find_map(|key| match json.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Array(items) => items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(|m| m.as_str())
                .map(String::from),
            Value::Object(inner) => inner
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from),
            _ => None,
        })
    });

    if let Some(message) = from_body {
        return message;
    }

    match status {
        Some(StatusCode::REQUEST_TIMEOUT) | Some(StatusCode::GATEWAY_TIMEOUT) => {
            TIMEOUT_ERROR_MESSAGE.to_string()
        }
        _ => FALLBACK_ERROR_MESSAGE.to_string(),
    }
}

/// Thin JSON client for the NewsAura backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    user_id: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach (or clear) the signed-in user's id on every later request.
    pub fn set_user_id(&self, user_id: Option<String>) {
        if let Ok(mut slot) = self.user_id.write() {
            *slot = user_id;
        }
    }

    pub fn user_id(&self) -> Option<String> {
        self.user_id.read().ok().and_then(|slot| slot.clone())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.request(Method::GET, path);
        self.send_json(Method::GET, path, request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.request(Method::POST, path).json(body);
        self.send_json(Method::POST, path, request).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.request(Method::DELETE, path);
        self.send(Method::DELETE, path, request).await.map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);
        if let Some(user_id) = self.user_id() {
            request = request.header(USER_ID_HEADER, user_id);
        }
        request
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let bytes = self.send(method.clone(), path, request).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("{} {} returned an unexpected body: {}", method, path, e);
            ApiError::new(FALLBACK_ERROR_MESSAGE)
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<Vec<u8>> {
        tracing::debug!("{} {}", method, path);

        let response = request.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let message = get_error_message(Some(status), &text);
            tracing::warn!("{} {} failed with {}: {}", method, path, status, message);
            return Err(ApiError {
                message,
                status: Some(status.as_u16()),
            });
        }

        Ok(body.to_vec())
    }
}
