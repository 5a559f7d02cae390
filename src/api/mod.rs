mod client;

pub use client::{get_error_message, ApiClient, ApiError, ApiResult, FALLBACK_ERROR_MESSAGE};
