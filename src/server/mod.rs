//! HTTP server exposing CPU usage at `/stats`.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | HTML page with the usage list |
//! | `GET /index.js` | Browser poller |
//! | `GET /styles.css` | Stylesheet |
//! | `GET /favicon.ico` | 204, no icon |
//! | `GET /stats` | `{"usages": {...}}` |
//! | anything else | 404 "Invalid request." |

mod assets;

pub use assets::{INDEX_HTML, INDEX_JS, STYLES_CSS};

use std::net::SocketAddr;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use crate::cpu::CpuSampler;
use crate::models::StatsResponse;

/// Shared state for the route handlers.
#[derive(Clone)]
pub struct ServerState {
    pub sampler: CpuSampler,
}

/// Build the router. Exposed separately so tests can serve it on port 0.
pub fn router(sampler: CpuSampler) -> Router {
    // The stats endpoint may be polled by pages served from elsewhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home_handler))
        .route("/index.js", get(js_handler))
        .route("/styles.css", get(css_handler))
        .route("/favicon.ico", get(favicon_handler))
        .route("/stats", get(stats_handler))
        .fallback(invalid_handler)
        .layer(cors)
        .with_state(ServerState { sampler })
}

/// Bind `addr` and serve in a background task.
///
/// Returns the task handle and the address actually bound, which differs
/// from `addr` when port 0 was requested.
pub async fn start_stats_server_on(
    addr: SocketAddr,
    sampler: CpuSampler,
) -> color_eyre::Result<(JoinHandle<()>, SocketAddr)> {
    let app = router(sampler);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Stats server listening on http://{}", actual_addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Stats server error: {}", e);
        }
    });

    Ok((handle, actual_addr))
}

async fn home_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        INDEX_JS,
    )
}

async fn css_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], STYLES_CSS)
}

async fn favicon_handler() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

async fn stats_handler(State(state): State<ServerState>) -> Response {
    match state.sampler.sample().await {
        Ok(usages) => Json(StatsResponse::new(usages)).into_response(),
        Err(e) => {
            tracing::warn!(
                code = e.error_code(),
                category = %e.category(),
                "CPU sample failed: {}",
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                "Failed to read cpu statistics.",
            )
                .into_response()
        }
    }
}

async fn invalid_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "Invalid request.",
    )
}
