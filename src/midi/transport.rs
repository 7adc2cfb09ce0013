//! Fire-and-forget TCP MIDI client

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::error::{Error, Result};

use super::{CC_ALL_NOTES_OFF, CONTROL_CHANGE, NOTE_OFF, NOTE_ON};

/// Sends single MIDI messages to the Rockit over raw TCP.
///
/// Each call opens a fresh connection, writes three bytes, and closes.
/// The whole exchange is bounded by `timeout`; a synth that is offline
/// costs at most one timeout, never a hang.
#[derive(Debug, Clone)]
pub struct MidiSender {
    host: String,
    port: u16,
    timeout: Duration,
}

impl MidiSender {
    /// Create a sender targeting `host:port` with the given send timeout
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Target address in `host:port` form
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Send a raw three-byte MIDI message
    ///
    /// Data bytes are masked to the 0-127 MIDI data range.
    ///
    /// # Errors
    ///
    /// Returns `Transport` on connect failure, write failure, or timeout;
    /// callers decide whether that is fatal (it usually is not).
    pub async fn send(&self, status: u8, data1: u8, data2: u8) -> Result<()> {
        let addr = self.address();
        let frame = [status, data1 & 0x7F, data2 & 0x7F];

        let exchange = async {
            let mut stream = TcpStream::connect(&addr).await?;
            stream.write_all(&frame).await?;
            stream.shutdown().await?;
            Ok::<(), std::io::Error>(())
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(())) => {
                tracing::debug!(status, data1, data2, "midi sent");
                Ok(())
            }
            Ok(Err(e)) => Err(Error::Transport(format!("send to {addr} failed: {e}"))),
            Err(_) => Err(Error::Transport(format!(
                "send to {addr} timed out after {:?}",
                self.timeout
            ))),
        }
    }

    /// Send Note On (channel 1) with the given velocity
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the message cannot be delivered
    pub async fn note_on(&self, note: u8, velocity: u8) -> Result<()> {
        self.send(NOTE_ON, note, velocity).await
    }

    /// Send Note Off (channel 1)
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the message cannot be delivered
    pub async fn note_off(&self, note: u8) -> Result<()> {
        self.send(NOTE_OFF, note, 0).await
    }

    /// Send a Control Change (channel 1)
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the message cannot be delivered
    pub async fn control_change(&self, controller: u8, value: u8) -> Result<()> {
        self.send(CONTROL_CHANGE, controller, value).await
    }

    /// Send the All Notes Off channel mode message
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the message cannot be delivered
    pub async fn all_notes_off(&self) -> Result<()> {
        self.control_change(CC_ALL_NOTES_OFF, 0).await
    }
}
