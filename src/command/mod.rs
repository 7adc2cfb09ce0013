//! Keyword command interpreter
//!
//! Turns a recognized utterance into a single [`Action`]. Interpretation
//! is pure keyword spotting over lowercased whitespace tokens; grammar
//! and word order carry no meaning beyond the precedence rules below:
//!
//! 1. A "play" or "note" token makes it a note command. The first note
//!    name in the utterance picks the pitch, defaulting to middle C.
//! 2. A "stop" or "mute" token silences everything.
//! 3. Otherwise the last parameter name mentioned is adjusted by the
//!    last modifier mentioned (or nudged up when no modifier is given).

mod vocab;

/// MIDI note used when a play command names no pitch (middle C)
pub const DEFAULT_NOTE: u8 = 60;

/// Velocity used for all gateway-originated Note On messages
pub const DEFAULT_VELOCITY: u8 = 100;

/// Step size, out of 127, for relative up/down adjustments
pub const ADJUST_STEP: u8 = 20;

/// Natural notes of the middle octave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Note {
    /// MIDI note number (middle octave, C4 = 60)
    #[must_use]
    pub fn midi(self) -> u8 {
        match self {
            Self::C => 60,
            Self::D => 62,
            Self::E => 64,
            Self::F => 65,
            Self::G => 67,
            Self::A => 69,
            Self::B => 71,
        }
    }
}

/// Addressable Rockit synth parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Cutoff,
    Resonance,
    Attack,
    Decay,
    Sustain,
    Release,
    Envelope,
    Glide,
    Volume,
    Mix,
}

impl Param {
    /// Every addressable parameter
    pub const ALL: [Self; 10] = [
        Self::Cutoff,
        Self::Resonance,
        Self::Attack,
        Self::Decay,
        Self::Sustain,
        Self::Release,
        Self::Envelope,
        Self::Glide,
        Self::Volume,
        Self::Mix,
    ];

    /// Control Change number assigned by the Rockit firmware
    #[must_use]
    pub fn cc(self) -> u8 {
        match self {
            Self::Cutoff => 74,
            Self::Resonance => 71,
            Self::Attack => 73,
            Self::Decay => 75,
            Self::Sustain => 86,
            Self::Release => 70,
            Self::Envelope => 85,
            Self::Glide => 90,
            Self::Volume => 7,
            Self::Mix => 72,
        }
    }

    /// Lowercase name for logging
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cutoff => "cutoff",
            Self::Resonance => "resonance",
            Self::Attack => "attack",
            Self::Decay => "decay",
            Self::Sustain => "sustain",
            Self::Release => "release",
            Self::Envelope => "envelope",
            Self::Glide => "glide",
            Self::Volume => "volume",
            Self::Mix => "mix",
        }
    }
}

/// How a spoken command changes a parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Relative nudge up by [`ADJUST_STEP`]
    Up,
    /// Relative nudge down by [`ADJUST_STEP`]
    Down,
    Max,
    Min,
    Zero,
    Half,
    On,
    Off,
}

impl Modifier {
    /// Apply to a current value, clamped to the MIDI data range
    #[must_use]
    pub fn apply(self, current: u8) -> u8 {
        match self {
            Self::Up => current.saturating_add(ADJUST_STEP).min(127),
            Self::Down => current.saturating_sub(ADJUST_STEP),
            Self::Max | Self::On => 127,
            Self::Min | Self::Zero | Self::Off => 0,
            Self::Half => 64,
        }
    }
}

/// What an utterance asks the gateway to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Strike a note (MIDI note number)
    PlayNote(u8),
    /// Silence all sounding notes
    StopAll,
    /// Change one parameter
    Adjust(Param, Modifier),
    /// Nothing recognizable in the utterance
    NoMatch,
}

/// Interpret a recognized utterance
#[must_use]
pub fn interpret(text: &str) -> Action {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .collect();

    if tokens.iter().any(|t| *t == "play" || *t == "note") {
        let note = tokens
            .iter()
            .find_map(|t| vocab::note(t))
            .map_or(DEFAULT_NOTE, Note::midi);
        return Action::PlayNote(note);
    }

    if tokens.iter().any(|t| *t == "stop" || *t == "mute") {
        return Action::StopAll;
    }

    // Last mention wins, so "no, volume down" does what was meant.
    let param = tokens.iter().rev().find_map(|t| vocab::param(t));
    if let Some(param) = param {
        let modifier = tokens
            .iter()
            .rev()
            .find_map(|t| vocab::modifier(t))
            .unwrap_or(Modifier::Up);
        return Action::Adjust(param, modifier);
    }

    Action::NoMatch
}
