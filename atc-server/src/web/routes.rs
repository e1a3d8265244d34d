//! REST API route handlers.
//!
//! All derived output is read from the in-memory engine; operator actions
//! (accept/reject, airport switch) are the only mutations reachable here.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use atc_core::airports;

use crate::upstream::now_epoch;
use crate::web::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct SetAirportBody {
    code: String,
}

#[derive(Deserialize)]
pub struct AirportParams {
    q: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/states — latest augmented snapshots, wire field names unchanged.
pub async fn api_states(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let engine = state.engine.lock().unwrap();
    Json(engine.states())
}

/// GET /api/overlay — full render-ready output for the UI.
pub async fn api_overlay(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let engine = state.engine.lock().unwrap();
    Json(engine.render(now_epoch()))
}

/// POST /api/airport — switch the monitored airport, resetting the engine.
pub async fn api_set_airport(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetAirportBody>,
) -> impl IntoResponse {
    let mut engine = state.engine.lock().unwrap();
    engine.set_airport(&body.code);
    let active = engine.airport().code;
    info!("active airport switched to {active}");
    Json(json!({ "active": active }))
}

/// GET /api/airports — searchable list of supported airports.
pub async fn api_airports(Query(params): Query<AirportParams>) -> impl IntoResponse {
    let hits: Vec<_> = airports::search(params.q.as_deref().unwrap_or(""))
        .into_iter()
        .map(|a| {
            json!({
                "code": a.code,
                "name": a.name,
                "country": a.country,
                "lat": a.lat,
                "lon": a.lon,
            })
        })
        .collect();
    Json(json!(hits))
}

/// GET /api/commands — visible command feed, most recent first.
pub async fn api_commands(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let engine = state.engine.lock().unwrap();
    let visible: Vec<_> = engine.feed().visible().into_iter().cloned().collect();
    Json(visible)
}

/// POST /api/commands/:id/accept
pub async fn api_command_accept(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let mut engine = state.engine.lock().unwrap();
    match engine.acknowledge(id) {
        Ok(()) => Json(json!({ "id": id, "status": "accepted" })).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))).into_response(),
    }
}

/// POST /api/commands/:id/reject
pub async fn api_command_reject(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let mut engine = state.engine.lock().unwrap();
    match engine.reject(id) {
        Ok(()) => Json(json!({ "id": id, "status": "rejected" })).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))).into_response(),
    }
}
