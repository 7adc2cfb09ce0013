//! Held-note registry
//!
//! Notes struck over HTTP stay sounding until a matching note-off, so the
//! gateway remembers what is ringing and can silence exactly that set on
//! panic. The lock guards the set only; MIDI sends happen outside it.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::midi::MidiSender;

/// Set of MIDI notes currently sounding on the synth
#[derive(Debug, Default)]
pub struct HeldNotes {
    notes: Mutex<HashSet<u8>>,
}

impl HeldNotes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a note as sounding. Returns false if it already was.
    pub fn hold(&self, note: u8) -> bool {
        self.lock().insert(note)
    }

    /// Forget a note. Returns false if it was not held.
    pub fn release(&self, note: u8) -> bool {
        self.lock().remove(&note)
    }

    /// Number of notes currently held
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Notes currently held, in ascending order
    pub fn snapshot(&self) -> Vec<u8> {
        let mut notes: Vec<u8> = self.lock().iter().copied().collect();
        notes.sort_unstable();
        notes
    }

    /// Silence every held note and clear the registry
    ///
    /// Sends one Note Off per held note plus the All Notes Off channel
    /// mode message, and returns how many notes were released. This is a
    /// safety reset: every send is attempted even when earlier ones fail,
    /// so a flaky link never leaves the tail of the set ringing.
    ///
    /// # Errors
    ///
    /// Returns `Transport` reporting how many sends failed, after all of
    /// them have been attempted. The registry is cleared either way.
    pub async fn panic(&self, midi: &MidiSender) -> Result<usize> {
        let notes = {
            let mut held = self.lock();
            let notes: Vec<u8> = held.iter().copied().collect();
            held.clear();
            notes
        };

        let mut failed = 0_usize;
        for note in &notes {
            if let Err(e) = midi.note_off(*note).await {
                tracing::warn!(note = *note, error = %e, "panic note off not delivered");
                failed += 1;
            }
        }
        if let Err(e) = midi.all_notes_off().await {
            tracing::warn!(error = %e, "all notes off not delivered");
            failed += 1;
        }

        if failed > 0 {
            return Err(Error::Transport(format!(
                "{failed} of {} panic sends failed",
                notes.len() + 1
            )));
        }
        Ok(notes.len())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<u8>> {
        // a poisoned set of note numbers is still usable
        self.notes.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
