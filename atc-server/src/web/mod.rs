//! Web server — axum REST API for the overlay.
//!
//! Shared state is the engine behind a mutex: the poll loop is the only
//! snapshot writer, handlers either read or apply operator actions, so the
//! single-writer fold over events is preserved under the lock.

use std::sync::{Arc, Mutex};

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use atc_core::Engine;

pub mod routes;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub engine: Mutex<Engine>,
}

impl AppState {
    pub fn new(airport_code: &str) -> Self {
        AppState {
            engine: Mutex::new(Engine::new(airport_code)),
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/states", axum::routing::get(routes::api_states))
        .route("/api/overlay", axum::routing::get(routes::api_overlay))
        .route("/api/airport", axum::routing::post(routes::api_set_airport))
        .route("/api/airports", axum::routing::get(routes::api_airports))
        .route("/api/commands", axum::routing::get(routes::api_commands))
        .route(
            "/api/commands/:id/accept",
            axum::routing::post(routes::api_command_accept),
        )
        .route(
            "/api/commands/:id/reject",
            axum::routing::post(routes::api_command_reject),
        )
        .with_state(state)
        .layer(cors)
}

/// Start the web server.
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) {
    let app = build_router(state);
    let addr = format!("{host}:{port}");

    tracing::info!("overlay server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
