//! Music playback pause-on-wake

use async_trait::async_trait;

use crate::error::Result;

use super::PlaybackControl;

/// Response envelope from Mopidy's JSON-RPC endpoint
#[derive(serde::Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
}

/// Pauses a Mopidy music server so speech isn't captured over music
pub struct MopidyPlayback {
    client: reqwest::Client,
    rpc_url: String,
}

impl MopidyPlayback {
    #[must_use]
    pub fn new(rpc_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            rpc_url,
        }
    }

    async fn call(&self, method: &str) -> Result<Option<serde_json::Value>> {
        let response = self
            .client
            .post(&self.rpc_url)
            .json(&serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: RpcResponse = response.json().await?;
        Ok(body.result)
    }
}

#[async_trait]
impl PlaybackControl for MopidyPlayback {
    async fn pause_if_playing(&self) -> Result<bool> {
        let state = self.call("core.playback.get_state").await?;
        let playing = state
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .is_some_and(|s| s == "playing");

        if playing {
            self.call("core.playback.pause").await?;
            tracing::debug!("paused music playback");
        }

        Ok(playing)
    }
}

/// No playback server configured
pub struct NullPlayback;

#[async_trait]
impl PlaybackControl for NullPlayback {
    async fn pause_if_playing(&self) -> Result<bool> {
        Ok(false)
    }
}
