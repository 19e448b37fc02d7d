use crate::{mock::store::UserTable, users::NewUser, GIT_COMMIT_HASH};
use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

// axum handler for health
pub async fn health() -> impl IntoResponse {
    let body = Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "build": GIT_COMMIT_HASH,
    }));

    let short_hash = GIT_COMMIT_HASH.get(0..7).unwrap_or("");

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!(
        "{}:{}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_hash
    )) {
        headers.insert("X-App", value);
    }

    (headers, body)
}

pub async fn list_users(table: Extension<Arc<UserTable>>) -> impl IntoResponse {
    Json(table.list().await)
}

pub async fn get_user(Path(id): Path<String>, table: Extension<Arc<UserTable>>) -> Response {
    match table.get(id.trim()).await {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn create_user(
    table: Extension<Arc<UserTable>>,
    Json(payload): Json<NewUser>,
) -> impl IntoResponse {
    let created = table.insert(payload).await;
    debug!(user_id = %created.id, "user stored");
    (StatusCode::CREATED, Json(created))
}
