//! HTTP helpers for the JSON users API. The users client goes through these so
//! request setup and error mapping stay in one place. No timeout or retry is
//! applied: a call runs until the transport resolves or fails, and the caller
//! decides what the user sees.

use crate::errors::AppError;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Maximum number of error body characters kept for diagnostics.
const MAX_ERROR_CHARS: usize = 200;

/// Fetches and decodes JSON from `url`.
///
/// # Errors
/// `Network` when the request cannot be sent, `Http` on a non-OK status and
/// `Parse` when the body does not decode into `T`.
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    let response = client.get(url).send().await.map_err(map_request_error)?;

    handle_json_response(response).await
}

/// Posts `body` as JSON and decodes the JSON response.
///
/// # Errors
/// `Serialization` when the body cannot be encoded, otherwise as [`get_json`].
pub async fn post_json_response<B: Serialize, T: DeserializeOwned>(
    client: &Client,
    url: &str,
    body: &B,
) -> Result<T, AppError> {
    let payload = serde_json::to_vec(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

    let response = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await
        .map_err(map_request_error)?;

    handle_json_response(response).await
}

/// Joins an explicit base URL and a path with exactly one slash between them.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn map_request_error(err: reqwest::Error) -> AppError {
    AppError::Network(format!("Unable to reach the server: {err}"))
}

/// Decodes OK responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Trims and truncates HTTP error bodies.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
