//! Dashboard — Axum web server hosting the debt form.
//!
//! Serves a REST API and a self-contained HTML page that edits the form,
//! manages the debt list, saves/loads documents and draws the chart.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    response::Html,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use routes::AppState;

/// The embedded dashboard HTML (compiled into the binary).
const DASHBOARD_HTML: &str = include_str!("templates/index.html");

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard address {addr}"))?;
    info!(addr, "Dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received.");
        })
        .await
        .context("Dashboard server error")
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/form", get(routes::get_form))
        .route("/api/settings", put(routes::put_settings))
        .route("/api/debts", get(routes::list_debts).post(routes::submit_debt))
        .route(
            "/api/debts/:id",
            put(routes::update_debt).delete(routes::delete_debt),
        )
        .route("/api/simulate", post(routes::simulate))
        .route("/api/chart.svg", get(routes::chart_svg))
        .route("/api/save", post(routes::save))
        .route("/api/load", post(routes::load))
        .route("/health", get(routes::health))
        .route("/", get(serve_dashboard))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML dashboard.
async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
