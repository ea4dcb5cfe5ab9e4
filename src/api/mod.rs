//! Cragpulse HTTP API
//!
//! Server-rendered pages plus the JSON view models behind them, built with Axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /history` - Recent change history
//! - `GET /pulse` - Community statistics
//!
//! ## View models
//! - `GET /api/v1/history` - History rows and presentation diagnostics
//! - `GET /api/v1/pulse` - Pulse panels and snapshot age
//!
//! ## Fragments
//! - `POST /api/v1/render/history` - Render posted changesets
//! - `POST /api/v1/render/media` - Render a posted media gallery
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use cragpulse::api::{serve, AppState};
//! use cragpulse::config::Config;
//! use cragpulse::pulse::PulseCache;
//! use cragpulse::render::{Renderer, SquarePreviewLoader};
//! use cragpulse::source::StaticSource;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!
//!     let fixtures = Arc::new(StaticSource::from_dir(Path::new("fixtures"))?);
//!     let pulse = Arc::new(PulseCache::new(
//!         fixtures.clone(),
//!         fixtures.clone(),
//!         config.pulse.revalidate(),
//!     ));
//!     let images = Arc::new(SquarePreviewLoader::new(config.media.base_url.clone()));
//!
//!     let state = AppState::new(fixtures, pulse, Arc::new(Renderer::new()?), images, config.api.clone());
//!     serve(state, &config.api).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/history", get(routes::history::history_json))
        .route("/pulse", get(routes::pulse::pulse_json))
        .route("/render/history", post(routes::render::render_history))
        .route("/render/media", post(routes::render::render_media));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let timeout = TimeoutLayer::new(state.config.request_timeout());
    let shared_state = Arc::new(state);

    Router::new()
        .route("/history", get(routes::history::history_page))
        .route("/pulse", get(routes::pulse::pulse_page))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        // Slow upstream reads answer 408 instead of holding the connection
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Allow the configured origins, or any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the HTTP server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Cragpulse listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Cragpulse shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
