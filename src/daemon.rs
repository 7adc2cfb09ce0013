//! Daemon - the main gateway service
//!
//! Wires the MIDI transport, held-note registry, voice session, and HTTP
//! API together and runs until interrupted.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::ApiServerBuilder;
use crate::config::Config;
use crate::midi::MidiSender;
use crate::registry::HeldNotes;
use crate::voice::{
    Feedback, HttpRecognizer, MopidyPlayback, NullFeedback, NullPlayback, PixelRing,
    PlaybackControl, Recognizer, UnavailableRecognizer, VoiceSession,
};
use crate::{Error, Result};

/// The Rockit gateway daemon
pub struct Daemon {
    config: Config,
    midi: MidiSender,
    held: Arc<HeldNotes>,
}

impl Daemon {
    /// Create a new daemon instance
    #[must_use]
    pub fn new(config: Config) -> Self {
        let midi = MidiSender::new(
            config.midi.host.clone(),
            config.midi.port,
            config.midi.send_timeout,
        );

        Self {
            config,
            midi,
            held: Arc::new(HeldNotes::new()),
        }
    }

    /// Pick a recognizer from configuration
    fn recognizer(&self) -> Result<Box<dyn Recognizer>> {
        match &self.config.voice.recognizer_url {
            Some(url) => Ok(Box::new(HttpRecognizer::new(
                url.clone(),
                self.config.voice.wake_word.clone(),
            )?)),
            None => Ok(Box::new(UnavailableRecognizer)),
        }
    }

    /// Pick a playback controller from configuration
    fn playback(&self) -> Box<dyn PlaybackControl> {
        match &self.config.voice.mopidy_rpc_url {
            Some(url) => Box::new(MopidyPlayback::new(url.clone())),
            None => Box::new(NullPlayback),
        }
    }

    /// Pick a feedback device from configuration
    fn feedback(&self) -> Box<dyn Feedback> {
        match &self.config.voice.pixel_ring_url {
            Some(url) => Box::new(PixelRing::new(url.clone())),
            None => Box::new(NullFeedback),
        }
    }

    /// Run the gateway until interrupted
    ///
    /// # Errors
    ///
    /// Returns error if the API server cannot start
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            midi_target = %self.midi.address(),
            api_port = self.config.api_server.port,
            voice = self.config.voice.enabled,
            "starting rockit gateway"
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let voice_task = if self.config.voice.enabled {
            let session = VoiceSession::new(
                self.recognizer()?,
                self.playback(),
                self.feedback(),
                self.midi.clone(),
                self.held.clone(),
            );
            Some(tokio::spawn(session.run(shutdown_rx.clone())))
        } else {
            None
        };

        let api = ApiServerBuilder::new(self.midi.clone(), self.held.clone())
            .port(self.config.api_server.port)
            .voice_available(voice_task.is_some())
            .static_dir(self.config.api_server.static_dir.clone())
            .build();
        let api_task = api.spawn();

        tokio::signal::ctrl_c()
            .await
            .map_err(|e| Error::Config(format!("failed to install signal handler: {e}")))?;

        tracing::info!("shutdown requested");
        let _ = shutdown_tx.send(true);

        // Don't leave notes ringing on the synth
        match self.held.panic(&self.midi).await {
            Ok(released) if released > 0 => {
                tracing::info!(released, "silenced held notes on shutdown");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "shutdown panic failed"),
        }

        if let Some(task) = voice_task {
            let _ = task.await;
        }
        api_task.abort();

        tracing::info!("rockit gateway stopped");
        Ok(())
    }
}
