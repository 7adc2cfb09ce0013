//! Shared test utilities

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use rockit_gateway::MidiSender;

/// A raw MIDI message as the synth would receive it
pub type Frame = [u8; 3];

/// Start a fake synth that records every 3-byte message it receives
///
/// Connections are read to completion one at a time so frames arrive on
/// the channel in the order they were sent.
pub async fn spawn_midi_listener() -> (SocketAddr, mpsc::UnboundedReceiver<Frame>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let mut frame = [0_u8; 3];
            if stream.read_exact(&mut frame).await.is_ok() {
                if tx.send(frame).is_err() {
                    break;
                }
            }
        }
    });

    (addr, rx)
}

/// Sender wired to a test listener with a short timeout
pub fn sender_to(addr: SocketAddr) -> MidiSender {
    MidiSender::new(addr.ip().to_string(), addr.port(), Duration::from_secs(1))
}

/// Receive the next frame, failing the test after a grace period
pub async fn next_frame(rx: &mut mpsc::UnboundedReceiver<Frame>) -> Frame {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a frame")
        .expect("listener task stopped")
}
