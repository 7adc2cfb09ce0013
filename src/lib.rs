//! Rockit Gateway - Voice and web control for the Rockit hardware synthesizer
//!
//! This library provides the core functionality for the gateway:
//! - Voice session loop (wake word, capture, recognition, dispatch)
//! - Keyword command interpreter and per-parameter state
//! - Raw TCP MIDI transport client (3-byte messages, fire-and-forget)
//! - HTTP bridge offering the same MIDI forwarding to browsers and scripts
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   Interfaces                        │
//! │     Voice (recognizer sidecar)  │  HTTP / web UI    │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                Rockit Gateway                       │
//! │  Session Loop │ Interpreter │ Params │ Held Notes   │
//! └────────────────────┬────────────────────────────────┘
//!                      │ TCP, 3 raw bytes per message
//! ┌────────────────────▼────────────────────────────────┐
//! │            Rockit synth (MIDI listener)             │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod command;
pub mod config;
pub mod daemon;
pub mod error;
pub mod midi;
pub mod params;
pub mod registry;
pub mod voice;

pub use command::{Action, Modifier, Note, Param, interpret};
pub use config::Config;
pub use daemon::Daemon;
pub use error::{Error, Result};
pub use midi::MidiSender;
pub use params::ParameterStore;
pub use registry::HeldNotes;
pub use voice::{
    Feedback, HttpRecognizer, MopidyPlayback, NullFeedback, NullPlayback, PixelRing,
    PlaybackControl, Recognizer, SessionState, UnavailableRecognizer, VoiceSession,
};
