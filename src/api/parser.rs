// src/api/parser.rs
//! Turning raw Notion responses into typed results or categorized errors.

use super::client::ApiResponse;
use super::types::{NotionErrorBody, PaginatedResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::Page;
use reqwest::StatusCode;
use serde_json::Value;

/// Decodes a successful response body, or maps a failed one to an error.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_failure(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

/// Maps a failed response to one of the API error categories.
///
/// Unauthorized, not-found and rate-limited responses get fixed messages;
/// anything else keeps Notion's own code and message when the body is a
/// Notion error document.
fn parse_failure(body: &str, status: StatusCode, url: &str) -> AppError {
    log::debug!("HTTP {} from {}: {}", status, url, preview(body));

    let (code, message) = match status {
        StatusCode::UNAUTHORIZED => (
            NotionErrorCode::Unauthorized,
            "Invalid Notion token (401 Unauthorized)".to_string(),
        ),
        StatusCode::NOT_FOUND => (
            NotionErrorCode::ObjectNotFound,
            "Database or page not found (404 Not Found)".to_string(),
        ),
        StatusCode::TOO_MANY_REQUESTS => (
            NotionErrorCode::RateLimited,
            "Rate limit exceeded (429 Too Many Requests)".to_string(),
        ),
        _ => {
            let error_body = serde_json::from_str::<NotionErrorBody>(body).ok();
            let code = error_body
                .as_ref()
                .and_then(|b| b.code.as_deref())
                .map(NotionErrorCode::from_api_response)
                .unwrap_or_else(|| NotionErrorCode::from_http_status(status.as_u16()));
            let detail = error_body
                .and_then(|b| b.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
            (
                code,
                format!("Notion API error: {} {}", status.as_u16(), detail),
            )
        }
    };

    AppError::NotionService {
        code,
        message,
        status,
    }
}

/// Truncates a body for logs and error messages without splitting a character.
fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, AppError> {
    parse_api_response(result)
}

pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Page>, AppError> {
    parse_api_response(result)
}

/// Block children stay raw JSON; nothing downstream renders them.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Value>, AppError> {
    parse_api_response(result)
}
