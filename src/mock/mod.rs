//! A stand-in for the `users` REST backend the pages talk to.
//!
//! It keeps the collection in memory, assigns ids, and answers the three
//! requests the pages make. It does not enforce uniqueness or validate
//! records; that is left to the pages.

pub(crate) mod handlers;
pub mod store;

pub use store::UserTable;

use crate::config::USERS_PATH;
use anyhow::Result;
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

#[must_use]
pub fn router(table: Arc<UserTable>) -> Router {
    Router::new()
        .route(
            USERS_PATH,
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(&format!("{USERS_PATH}/:id"), get(handlers::get_user))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(CorsLayer::permissive())
                .layer(Extension(table)),
        )
        .route("/health", get(handlers::health).options(handlers::health))
}

/// Serves `table` on an already bound listener until ctrl-c.
///
/// # Errors
/// Returns an error if the server fails.
pub async fn serve(listener: TcpListener, table: Arc<UserTable>) -> Result<()> {
    let app = router(table);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Gracefully shutdown");
            }
        })
        .await?;

    Ok(())
}

/// Start the mock backend
/// # Errors
/// Return error if the port cannot be bound or the server fails
pub async fn start(port: u16) -> Result<()> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], port))).await?;

    info!("Listening on {}", listener.local_addr()?);

    serve(listener, Arc::new(UserTable::new())).await
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
