//! MIDI transport integration tests

use std::time::{Duration, Instant};

use rockit_gateway::{Error, MidiSender};

mod common;
use common::{next_frame, sender_to, spawn_midi_listener};

#[tokio::test]
async fn delivers_raw_three_byte_frames() {
    let (addr, mut rx) = spawn_midi_listener().await;
    let midi = sender_to(addr);

    midi.note_on(60, 100).await.expect("note on failed");
    assert_eq!(next_frame(&mut rx).await, [0x90, 60, 100]);

    midi.note_off(60).await.expect("note off failed");
    assert_eq!(next_frame(&mut rx).await, [0x80, 60, 0]);
}

#[tokio::test]
async fn preserves_send_order_across_connections() {
    let (addr, mut rx) = spawn_midi_listener().await;
    let midi = sender_to(addr);

    midi.note_on(64, 100).await.expect("note on failed");
    midi.control_change(74, 90).await.expect("cc failed");
    midi.all_notes_off().await.expect("panic failed");

    assert_eq!(next_frame(&mut rx).await, [0x90, 64, 100]);
    assert_eq!(next_frame(&mut rx).await, [0xB0, 74, 90]);
    assert_eq!(next_frame(&mut rx).await, [0xB0, 123, 0]);
}

#[tokio::test]
async fn masks_data_bytes_to_midi_range() {
    let (addr, mut rx) = spawn_midi_listener().await;
    let midi = sender_to(addr);

    midi.send(0x90, 200, 255).await.expect("send failed");
    assert_eq!(next_frame(&mut rx).await, [0x90, 200 & 0x7F, 255 & 0x7F]);
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    // Bind then drop to get a port nothing is listening on
    let reserved = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let port = reserved.local_addr().expect("no local addr").port();
    drop(reserved);

    let midi = MidiSender::new("127.0.0.1", port, Duration::from_secs(1));

    let err = midi.note_on(60, 100).await.expect_err("send should fail");
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn send_time_is_bounded_by_the_timeout() {
    // Non-routable address: connect neither succeeds nor is refused
    let midi = MidiSender::new("10.255.255.1", 50000, Duration::from_millis(200));

    let start = Instant::now();
    let result = midi.note_on(60, 100).await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(Error::Transport(_))));
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
}
