//! Last-sent parameter values
//!
//! The Rockit never reports its state back, so relative adjustments work
//! against this local shadow of what the gateway last sent. Every
//! parameter starts at mid-range.

use std::collections::HashMap;

use crate::command::{Modifier, Param};

/// Seed value for every parameter at startup
pub const INITIAL_VALUE: u8 = 64;

/// Tracks the last value sent for each synth parameter
#[derive(Debug)]
pub struct ParameterStore {
    values: HashMap<Param, u8>,
}

impl ParameterStore {
    /// Create a store with every parameter at [`INITIAL_VALUE`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Param::ALL.iter().map(|p| (*p, INITIAL_VALUE)).collect(),
        }
    }

    /// Last value sent for a parameter
    #[must_use]
    pub fn get(&self, param: Param) -> u8 {
        self.values.get(&param).copied().unwrap_or(INITIAL_VALUE)
    }

    /// Record a value, clamped to the MIDI data range
    pub fn set(&mut self, param: Param, value: u8) {
        self.values.insert(param, value.min(127));
    }

    /// Apply a modifier and return the new value to send
    pub fn adjust(&mut self, param: Param, modifier: Modifier) -> u8 {
        let next = modifier.apply(self.get(param));
        self.set(param, next);
        next
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
