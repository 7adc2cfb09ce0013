//! The voice session loop

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::command::{self, Action};
use crate::midi::MidiSender;
use crate::params::ParameterStore;
use crate::registry::HeldNotes;

use super::{Feedback, PlaybackControl, Recognizer};

/// How long a voice-triggered note sounds before its note-off
pub const NOTE_HOLD: Duration = Duration::from_millis(500);

/// Pause before retrying after a recognizer error
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// What the session loop is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created but not yet running
    Idle,
    /// Blocking on the wake word
    WaitingForWake,
    /// Pausing music and capturing an utterance
    Listening,
    /// Turning captured audio into text
    Recognizing,
    /// Executing the interpreted action
    Dispatching,
    /// Loop has exited
    Stopped,
}

/// Drives wake -> capture -> recognize -> dispatch until shutdown
pub struct VoiceSession {
    recognizer: Box<dyn Recognizer>,
    playback: Box<dyn PlaybackControl>,
    feedback: Box<dyn Feedback>,
    midi: MidiSender,
    held: Arc<HeldNotes>,
    params: ParameterStore,
    state: SessionState,
}

impl VoiceSession {
    #[must_use]
    pub fn new(
        recognizer: Box<dyn Recognizer>,
        playback: Box<dyn PlaybackControl>,
        feedback: Box<dyn Feedback>,
        midi: MidiSender,
        held: Arc<HeldNotes>,
    ) -> Self {
        Self {
            recognizer,
            playback,
            feedback,
            midi,
            held,
            params: ParameterStore::new(),
            state: SessionState::Idle,
        }
    }

    fn set_state(&mut self, next: SessionState) {
        tracing::trace!(from = ?self.state, to = ?next, "session state");
        self.state = next;
    }

    /// Run the session loop until `shutdown` fires
    ///
    /// A recognizer that fails to initialize is fatal to this loop only;
    /// the rest of the gateway keeps serving HTTP.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> SessionState {
        if let Err(e) = self.recognizer.initialize().await {
            tracing::error!(
                recognizer = self.recognizer.name(),
                error = %e,
                "recognizer unavailable, voice session not started"
            );
            return SessionState::Stopped;
        }

        tracing::info!(recognizer = self.recognizer.name(), "voice session started");

        loop {
            self.set_state(SessionState::WaitingForWake);

            // Shutdown is only checked here: everything between wake and
            // dispatch is short, and a mid-command abort would leave a
            // note ringing.
            let woke = tokio::select! {
                () = Self::wait_for_shutdown(&mut shutdown) => break,
                res = self.recognizer.wait_for_wake() => res,
            };

            if let Err(e) = woke {
                tracing::warn!(error = %e, "wake word wait failed, backing off");
                tokio::time::sleep(ERROR_BACKOFF).await;
                continue;
            }

            self.handle_wake().await;
        }

        tracing::info!("voice session stopped");
        self.set_state(SessionState::Stopped);
        self.state
    }

    async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
        // Closed sender counts as shutdown too
        let _ = shutdown.wait_for(|stop| *stop).await;
    }

    /// One wake-to-dispatch cycle. Errors end the cycle, not the loop.
    ///
    /// The light ring thinks while the utterance is captured and
    /// recognized, speaks once text comes back, and goes dark when the
    /// cycle ends either way.
    async fn handle_wake(&mut self) {
        self.set_state(SessionState::Listening);
        tracing::debug!("wake word heard");

        if let Err(e) = self.playback.pause_if_playing().await {
            tracing::debug!(error = %e, "playback pause failed, continuing");
        }
        if let Err(e) = self.feedback.think().await {
            tracing::debug!(error = %e, "feedback failed, continuing");
        }

        let text = match self.capture_and_recognize().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "recognition failed");
                if let Err(e) = self.feedback.off().await {
                    tracing::debug!(error = %e, "feedback failed, continuing");
                }
                tokio::time::sleep(ERROR_BACKOFF).await;
                return;
            }
        };

        tracing::info!(text = %text, "utterance recognized");
        if let Err(e) = self.feedback.speak().await {
            tracing::debug!(error = %e, "feedback failed, continuing");
        }

        self.set_state(SessionState::Dispatching);
        self.dispatch(command::interpret(&text)).await;

        if let Err(e) = self.feedback.off().await {
            tracing::debug!(error = %e, "feedback failed, continuing");
        }
    }

    async fn capture_and_recognize(&mut self) -> crate::Result<String> {
        self.recognizer.capture().await?;
        self.set_state(SessionState::Recognizing);
        self.recognizer.recognize().await
    }

    /// Turn an action into MIDI. Transport errors are logged and dropped;
    /// the synth being offline should not kill voice control.
    async fn dispatch(&mut self, action: Action) {
        match action {
            Action::PlayNote(note) => {
                tracing::info!(note, "playing note");
                if let Err(e) = self.midi.note_on(note, command::DEFAULT_VELOCITY).await {
                    tracing::warn!(error = %e, "note on failed");
                    return;
                }
                tokio::time::sleep(NOTE_HOLD).await;
                if let Err(e) = self.midi.note_off(note).await {
                    tracing::warn!(error = %e, "note off failed");
                }
            }
            Action::StopAll => match self.held.panic(&self.midi).await {
                Ok(released) => tracing::info!(released, "silenced synth"),
                Err(e) => tracing::warn!(error = %e, "stop failed"),
            },
            Action::Adjust(param, modifier) => {
                let value = self.params.adjust(param, modifier);
                tracing::info!(param = param.name(), value, "adjusting parameter");
                if let Err(e) = self.midi.control_change(param.cc(), value).await {
                    tracing::warn!(error = %e, "control change failed");
                }
            }
            Action::NoMatch => {
                tracing::info!("utterance matched no command");
            }
        }
    }
}
