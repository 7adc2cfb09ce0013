//! MIDI forwarding endpoints
//!
//! The web UI deals in plain note and controller numbers; all routes
//! forward fire-and-forget. A transport failure still answers 200 with
//! `delivered: false` so the UI can surface an offline synth without
//! treating it as an API error.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use super::ApiState;

/// Note endpoint request body
#[derive(Deserialize)]
pub struct NoteRequest {
    /// MIDI note number
    pub note: u8,

    /// Velocity for note-on, defaults to the gateway standard
    pub velocity: Option<u8>,

    /// Whether to strike or release the note
    pub action: NoteAction,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoteAction {
    On,
    Off,
}

/// Control change endpoint request body
#[derive(Deserialize)]
pub struct CcRequest {
    /// Controller number
    pub cc: u8,

    /// Controller value, clamped to 0-127
    pub value: u8,
}

/// Response for the note endpoint
#[derive(Serialize)]
pub struct SendResponse {
    pub status: &'static str,
    pub delivered: bool,
}

/// Response for the cc endpoint, echoing what was sent
#[derive(Serialize)]
pub struct CcResponse {
    pub status: &'static str,
    pub cc: u8,
    pub value: u8,
    pub delivered: bool,
}

/// Response for the panic endpoint
#[derive(Serialize)]
pub struct PanicResponse {
    pub status: &'static str,
    pub notes_off: usize,
    pub delivered: bool,
}

/// Build the MIDI forwarding router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/note", post(note))
        .route("/cc", post(control_change))
        .route("/panic", post(panic))
        .with_state(state)
}

/// Strike or release a note, tracking it in the held-note registry
async fn note(State(state): State<Arc<ApiState>>, Json(req): Json<NoteRequest>) -> Json<SendResponse> {
    let note = req.note & 0x7F;

    let delivered = match req.action {
        NoteAction::On => {
            let velocity = req.velocity.unwrap_or(crate::command::DEFAULT_VELOCITY);
            match state.midi.note_on(note, velocity).await {
                Ok(()) => {
                    state.held.hold(note);
                    true
                }
                Err(e) => {
                    tracing::warn!(note, error = %e, "note on not delivered");
                    false
                }
            }
        }
        NoteAction::Off => {
            // Forget the note even if the send fails: a dead transport
            // means nothing is sounding anyway.
            state.held.release(note);
            match state.midi.note_off(note).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(note, error = %e, "note off not delivered");
                    false
                }
            }
        }
    };

    Json(SendResponse {
        status: "ok",
        delivered,
    })
}

/// Forward a control change with the value clamped to the MIDI range
async fn control_change(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<CcRequest>,
) -> Json<CcResponse> {
    let cc = req.cc & 0x7F;
    let value = req.value.min(127);

    let delivered = match state.midi.control_change(cc, value).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(cc, value, error = %e, "cc not delivered");
            false
        }
    };

    Json(CcResponse {
        status: "ok",
        cc,
        value,
        delivered,
    })
}

/// Silence every held note
async fn panic(State(state): State<Arc<ApiState>>) -> Json<PanicResponse> {
    let held_before = state.held.len();

    match state.held.panic(&state.midi).await {
        Ok(released) => Json(PanicResponse {
            status: "ok",
            notes_off: released,
            delivered: true,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "panic not fully delivered");
            Json(PanicResponse {
                status: "ok",
                notes_off: held_before,
                delivered: false,
            })
        }
    }
}
