//! Configuration management for the Rockit gateway

pub mod file;

use std::path::PathBuf;
use std::time::Duration;

/// Rockit gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// MIDI target (the Rockit's TCP listener)
    pub midi: MidiConfig,

    /// HTTP API server configuration
    pub api_server: ApiServerConfig,

    /// Voice pipeline configuration
    pub voice: VoiceConfig,
}

/// MIDI target configuration
#[derive(Debug, Clone)]
pub struct MidiConfig {
    /// Host the Rockit's TCP MIDI listener runs on
    pub host: String,

    /// Port of the TCP MIDI listener
    pub port: u16,

    /// Per-message send timeout
    pub send_timeout: Duration,
}

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Path to static files directory (web UI)
    pub static_dir: Option<PathBuf>,
}

/// Voice pipeline configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Enable the voice session
    pub enabled: bool,

    /// Wake word the recognizer listens for
    pub wake_word: String,

    /// Recognizer sidecar base URL, e.g. `http://localhost:5050`
    pub recognizer_url: Option<String>,

    /// Mopidy JSON-RPC endpoint for pause-on-wake
    pub mopidy_rpc_url: Option<String>,

    /// Pixel ring HTTP endpoint for visual feedback
    pub pixel_ring_url: Option<String>,
}

impl Config {
    /// Load configuration with priority: env > TOML file > defaults
    pub fn load() -> Self {
        Self::load_with_options(false)
    }

    /// Load configuration with explicit voice disable option
    pub fn load_with_options(disable_voice: bool) -> Self {
        let fc = file::load_config_file();

        let midi = MidiConfig {
            host: std::env::var("ROCKIT_MIDI_HOST")
                .ok()
                .or(fc.midi.host)
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: std::env::var("ROCKIT_MIDI_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .or(fc.midi.port)
                .unwrap_or(50000),
            send_timeout: Duration::from_millis(
                std::env::var("ROCKIT_SEND_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .or(fc.midi.send_timeout_ms)
                    .unwrap_or(1000),
            ),
        };

        let api_server = ApiServerConfig {
            port: std::env::var("ROCKIT_API_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|s| s.parse().ok())
                .or(fc.server.port)
                .unwrap_or(8090),
            static_dir: std::env::var("ROCKIT_STATIC_DIR")
                .ok()
                .or(fc.server.static_dir)
                .map(PathBuf::from),
        };

        let voice_disabled_env = std::env::var("ROCKIT_DISABLE_VOICE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let enabled = if disable_voice || voice_disabled_env {
            false
        } else {
            fc.voice.enabled.unwrap_or(true)
        };
        if disable_voice {
            tracing::info!("voice explicitly disabled via --disable-voice");
        }

        let voice = VoiceConfig {
            enabled,
            wake_word: std::env::var("ROCKIT_WAKE_WORD")
                .ok()
                .or(fc.voice.wake_word)
                .unwrap_or_else(|| "respeaker".to_string()),
            recognizer_url: std::env::var("ROCKIT_RECOGNIZER_URL")
                .ok()
                .or(fc.voice.recognizer_url),
            mopidy_rpc_url: std::env::var("ROCKIT_MOPIDY_RPC_URL")
                .ok()
                .or(fc.voice.mopidy_rpc_url),
            pixel_ring_url: std::env::var("ROCKIT_PIXEL_RING_URL")
                .ok()
                .or(fc.voice.pixel_ring_url),
        };

        Self {
            midi,
            api_server,
            voice,
        }
    }
}
