//! TOML configuration file loading
//!
//! Supports `~/.config/rockit/gateway.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct GatewayConfigFile {
    /// MIDI target configuration
    #[serde(default)]
    pub midi: MidiFileConfig,

    /// HTTP API server configuration
    #[serde(default)]
    pub server: ServerFileConfig,

    /// Voice pipeline configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,
}

/// MIDI target configuration
#[derive(Debug, Default, Deserialize)]
pub struct MidiFileConfig {
    /// Host the Rockit's TCP MIDI listener runs on
    pub host: Option<String>,

    /// Port of the TCP MIDI listener
    pub port: Option<u16>,

    /// Per-message send timeout in milliseconds
    pub send_timeout_ms: Option<u64>,
}

/// HTTP API server configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// API server port
    pub port: Option<u16>,

    /// Path to static files directory (web UI)
    pub static_dir: Option<String>,
}

/// Voice pipeline configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// Enable the voice session
    pub enabled: Option<bool>,

    /// Wake word the recognizer listens for
    pub wake_word: Option<String>,

    /// Recognizer sidecar base URL
    pub recognizer_url: Option<String>,

    /// Mopidy JSON-RPC endpoint for pause-on-wake
    pub mopidy_rpc_url: Option<String>,

    /// Pixel ring HTTP endpoint for visual feedback
    pub pixel_ring_url: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `GatewayConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> GatewayConfigFile {
    let Some(path) = config_file_path() else {
        return GatewayConfigFile::default();
    };

    if !path.exists() {
        return GatewayConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                GatewayConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            GatewayConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/rockit/gateway.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("rockit").join("gateway.toml"))
}
