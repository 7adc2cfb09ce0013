//! MIDI message construction and delivery
//!
//! The Rockit listens on a plain TCP socket and expects exactly three raw
//! bytes per connection: status, data1, data2. There is no framing, no
//! handshake, and no reply. Each message gets its own short-lived
//! connection.

mod transport;

pub use transport::MidiSender;

/// Note On status byte, channel 1
pub const NOTE_ON: u8 = 0x90;

/// Note Off status byte, channel 1
pub const NOTE_OFF: u8 = 0x80;

/// Control Change status byte, channel 1
pub const CONTROL_CHANGE: u8 = 0xB0;

/// Channel mode message: All Notes Off
pub const CC_ALL_NOTES_OFF: u8 = 123;
