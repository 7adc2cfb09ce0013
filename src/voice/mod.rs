//! Voice control pipeline
//!
//! Wake word, capture, recognition, and dispatch. The heavy lifting
//! (audio capture, the speech model) lives in a recognizer sidecar
//! process reached over HTTP; this module owns the session loop that
//! drives it and turns recognized text into MIDI.

mod feedback;
mod playback;
mod recognizer;
mod session;

use async_trait::async_trait;

pub use feedback::{NullFeedback, PixelRing};
pub use playback::{MopidyPlayback, NullPlayback};
pub use recognizer::{HttpRecognizer, UnavailableRecognizer};
pub use session::{SessionState, VoiceSession};

use crate::Result;

/// Speech recognition capability
///
/// Implementations are free to block for a long time in `wait_for_wake`;
/// the session loop races it against shutdown.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Recognizer name for logging
    fn name(&self) -> &'static str;

    /// Verify the recognizer is reachable and ready
    ///
    /// # Errors
    ///
    /// Returns `Recognition` if the capability is unavailable. The voice
    /// session treats that as fatal to itself and does not start.
    async fn initialize(&self) -> Result<()>;

    /// Block until the wake word is heard
    async fn wait_for_wake(&self) -> Result<()>;

    /// Capture one utterance after the wake word
    async fn capture(&self) -> Result<()>;

    /// Recognize the captured utterance and return its text
    async fn recognize(&self) -> Result<String>;
}

/// Music playback that should get out of the way while we listen
///
/// Best-effort: failures are logged and never block the session.
#[async_trait]
pub trait PlaybackControl: Send + Sync {
    /// Pause playback if something is playing. Returns whether a pause
    /// was actually issued.
    async fn pause_if_playing(&self) -> Result<bool>;
}

/// Visual feedback about what the session is doing
///
/// Best-effort: failures are logged and never block the session.
#[async_trait]
pub trait Feedback: Send + Sync {
    /// Show the "processing" state
    async fn think(&self) -> Result<()>;

    /// Show the "heard you" state
    async fn speak(&self) -> Result<()>;

    /// Clear the display
    async fn off(&self) -> Result<()>;
}
