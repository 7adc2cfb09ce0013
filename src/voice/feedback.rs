//! Visual session feedback

use async_trait::async_trait;

use crate::Result;

use super::Feedback;

/// Drives a `ReSpeaker` pixel ring through its HTTP bridge
pub struct PixelRing {
    client: reqwest::Client,
    base_url: String,
}

impl PixelRing {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post(&self, path: &str) -> Result<()> {
        self.client
            .post(format!("{}{path}", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl Feedback for PixelRing {
    async fn think(&self) -> Result<()> {
        self.post("/think").await
    }

    async fn speak(&self) -> Result<()> {
        self.post("/speak").await
    }

    async fn off(&self) -> Result<()> {
        self.post("/off").await
    }
}

/// No feedback device attached
pub struct NullFeedback;

#[async_trait]
impl Feedback for NullFeedback {
    async fn think(&self) -> Result<()> {
        Ok(())
    }

    async fn speak(&self) -> Result<()> {
        Ok(())
    }

    async fn off(&self) -> Result<()> {
        Ok(())
    }
}
