//! HTTP server hosting the compiled web console.
//!
//! Besides the static files it answers `/health` and `/config.js`. The latter
//! hands the browser the API base URL so one build of the console can target
//! any backend. Requests get a ULID `x-request-id` when the client sent none.

use anyhow::Result;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Extension, Router,
};
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer,
    services::{ServeDir, ServeFile},
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;

pub mod handlers;

/// Values exposed to the browser through `/config.js`. Public by nature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebConfig {
    pub api_base_url: String,
}

/// Build the router for `dist`.
///
/// Unknown paths fall back to `index.html` so client-side routes survive a reload.
#[must_use]
pub fn router(dist: PathBuf, config: WebConfig) -> Router {
    let index = dist.join("index.html");
    let static_files = ServeDir::new(dist).fallback(ServeFile::new(index));

    Router::new()
        .route(
            "/health",
            get(handlers::health).options(handlers::health),
        )
        .route("/config.js", get(handlers::config_js))
        .fallback_service(static_files)
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
                .layer(Extension(Arc::new(config))),
        )
}

/// Serve the console on `port` until Ctrl-C.
/// # Errors
/// Returns an error if the port cannot be bound or the server fails
pub async fn new(port: u16, dist: PathBuf, config: WebConfig) -> Result<()> {
    let app = router(dist, config);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {err}");
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, request_id)
}
