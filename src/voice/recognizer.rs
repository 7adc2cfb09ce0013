//! HTTP recognizer sidecar client

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::Recognizer;

/// Response from the sidecar's `/recognize` endpoint
#[derive(serde::Deserialize)]
struct RecognizeResponse {
    text: String,
}

/// Client for the speech recognizer sidecar
///
/// The sidecar owns the microphone and the speech model and exposes a
/// small HTTP surface: `GET /status`, `POST /wake` (long-poll until the
/// wake word is heard), `POST /capture`, `POST /recognize`.
pub struct HttpRecognizer {
    client: reqwest::Client,
    base_url: String,
    wake_word: String,
}

impl HttpRecognizer {
    /// Create a client for the sidecar at `base_url`
    ///
    /// # Errors
    ///
    /// Returns error if `base_url` is empty
    pub fn new(base_url: String, wake_word: String) -> Result<Self> {
        if base_url.is_empty() {
            return Err(Error::Config("recognizer URL must not be empty".to_string()));
        }

        // No request timeout: /wake long-polls for as long as the room
        // stays quiet.
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            wake_word,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl Recognizer for HttpRecognizer {
    fn name(&self) -> &'static str {
        "http-sidecar"
    }

    async fn initialize(&self) -> Result<()> {
        let response = self
            .client
            .get(self.url("/status"))
            .send()
            .await
            .map_err(|e| Error::Recognition(format!("sidecar unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Recognition(format!(
                "sidecar not ready: {}",
                response.status()
            )));
        }

        tracing::info!(url = %self.base_url, wake_word = %self.wake_word, "recognizer ready");
        Ok(())
    }

    async fn wait_for_wake(&self) -> Result<()> {
        let response = self
            .client
            .post(self.url("/wake"))
            .json(&serde_json::json!({ "wake_word": self.wake_word }))
            .send()
            .await
            .map_err(|e| Error::Recognition(format!("wake poll failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Recognition(format!(
                "wake poll returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn capture(&self) -> Result<()> {
        let response = self
            .client
            .post(self.url("/capture"))
            .send()
            .await
            .map_err(|e| Error::Recognition(format!("capture failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Recognition(format!(
                "capture returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn recognize(&self) -> Result<String> {
        let response = self
            .client
            .post(self.url("/recognize"))
            .send()
            .await
            .map_err(|e| Error::Recognition(format!("recognize failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Recognition(format!(
                "recognize returned {}",
                response.status()
            )));
        }

        let body: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| Error::Recognition(format!("bad recognize response: {e}")))?;

        Ok(body.text)
    }
}

/// Placeholder used when no recognizer is configured
///
/// `initialize` always fails, so the session loop logs once and exits
/// without taking the rest of the gateway down.
pub struct UnavailableRecognizer;

#[async_trait]
impl Recognizer for UnavailableRecognizer {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn initialize(&self) -> Result<()> {
        Err(Error::Recognition(
            "no recognizer configured (set ROCKIT_RECOGNIZER_URL)".to_string(),
        ))
    }

    async fn wait_for_wake(&self) -> Result<()> {
        Err(Error::Recognition("recognizer unavailable".to_string()))
    }

    async fn capture(&self) -> Result<()> {
        Err(Error::Recognition("recognizer unavailable".to_string()))
    }

    async fn recognize(&self) -> Result<String> {
        Err(Error::Recognition("recognizer unavailable".to_string()))
    }
}
