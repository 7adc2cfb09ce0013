//! Health check endpoint

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::ApiState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether a voice session is running
    pub voice: bool,
    /// Notes currently held via the API
    pub held_notes: Vec<u8>,
    /// MIDI target in `host:port` form
    pub midi_target: String,
}

/// Liveness probe - is the gateway running?
async fn status(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        voice: state.voice_available,
        held_notes: state.held.snapshot(),
        midi_target: state.midi.address(),
    })
}

/// Build the health router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new().route("/status", get(status)).with_state(state)
}
