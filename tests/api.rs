//! HTTP API integration tests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

use rockit_gateway::api::ApiServerBuilder;
use rockit_gateway::{HeldNotes, MidiSender};

mod common;
use common::{next_frame, sender_to, spawn_midi_listener};

/// Build the full production router against a given sender
fn build_router(midi: MidiSender, held: Arc<HeldNotes>) -> Router {
    ApiServerBuilder::new(midi, held).build().router()
}

fn json_request(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

#[tokio::test]
async fn note_on_sends_and_tracks_the_note() {
    let (addr, mut rx) = spawn_midi_listener().await;
    let held = Arc::new(HeldNotes::new());
    let app = build_router(sender_to(addr), held.clone());

    let response = app
        .oneshot(json_request(
            "/api/note",
            &serde_json::json!({"note": 60, "velocity": 90, "action": "on"}),
        ))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["delivered"], true);

    assert_eq!(next_frame(&mut rx).await, [0x90, 60, 90]);
    assert_eq!(held.snapshot(), vec![60]);
}

#[tokio::test]
async fn note_off_releases_the_note() {
    let (addr, mut rx) = spawn_midi_listener().await;
    let held = Arc::new(HeldNotes::new());
    held.hold(60);
    let app = build_router(sender_to(addr), held.clone());

    let response = app
        .oneshot(json_request(
            "/api/note",
            &serde_json::json!({"note": 60, "action": "off"}),
        ))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(next_frame(&mut rx).await, [0x80, 60, 0]);
    assert!(held.is_empty());
}

#[tokio::test]
async fn note_on_uses_default_velocity() {
    let (addr, mut rx) = spawn_midi_listener().await;
    let app = build_router(sender_to(addr), Arc::new(HeldNotes::new()));

    app.oneshot(json_request(
        "/api/note",
        &serde_json::json!({"note": 67, "action": "on"}),
    ))
    .await
    .expect("request failed");

    assert_eq!(next_frame(&mut rx).await, [0x90, 67, 100]);
}

#[tokio::test]
async fn cc_values_are_clamped() {
    let (addr, mut rx) = spawn_midi_listener().await;
    let app = build_router(sender_to(addr), Arc::new(HeldNotes::new()));

    let response = app
        .oneshot(json_request(
            "/api/cc",
            &serde_json::json!({"cc": 74, "value": 200}),
        ))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["cc"], 74);
    assert_eq!(body["value"], 127);
    assert_eq!(next_frame(&mut rx).await, [0xB0, 74, 127]);
}

#[tokio::test]
async fn panic_reports_how_many_notes_were_silenced() {
    let (addr, mut rx) = spawn_midi_listener().await;
    let held = Arc::new(HeldNotes::new());
    held.hold(60);
    held.hold(64);
    let app = build_router(sender_to(addr), held.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/panic")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["notes_off"], 2);
    assert_eq!(body["delivered"], true);
    assert!(held.is_empty());

    // Two note-offs then All Notes Off
    next_frame(&mut rx).await;
    next_frame(&mut rx).await;
    assert_eq!(next_frame(&mut rx).await, [0xB0, 123, 0]);
}

#[tokio::test]
async fn unreachable_synth_still_answers_ok_with_delivered_false() {
    // Nothing listens here; the send times out
    let midi = MidiSender::new("10.255.255.1", 50000, Duration::from_millis(200));
    let app = build_router(midi, Arc::new(HeldNotes::new()));

    let response = app
        .oneshot(json_request(
            "/api/cc",
            &serde_json::json!({"cc": 74, "value": 64}),
        ))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["delivered"], false);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (addr, _rx) = spawn_midi_listener().await;
    let app = build_router(sender_to(addr), Arc::new(HeldNotes::new()));

    // "action" is missing
    let response = app
        .oneshot(json_request("/api/note", &serde_json::json!({"note": 60})))
        .await
        .expect("request failed");

    assert!(response.status().is_client_error(), "got {}", response.status());
}

#[tokio::test]
async fn status_reports_gateway_state() {
    let (addr, _rx) = spawn_midi_listener().await;
    let held = Arc::new(HeldNotes::new());
    held.hold(62);
    let app = build_router(sender_to(addr), held);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/status")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["voice"], false);
    assert_eq!(body["held_notes"], serde_json::json!([62]));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let (addr, _rx) = spawn_midi_listener().await;
    let app = build_router(sender_to(addr), Arc::new(HeldNotes::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/status")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap_or_default()),
        Some("*")
    );
}
