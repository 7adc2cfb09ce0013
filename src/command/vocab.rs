//! Spoken-word vocabularies for the command interpreter
//!
//! Recognizers are sloppy with single-letter note names, so common
//! homophones map to the same note.

use super::{Modifier, Note, Param};

/// Look up a note name token, including recognizer homophones
pub(super) fn note(token: &str) -> Option<Note> {
    Some(match token {
        "c" | "see" | "sea" => Note::C,
        "d" | "dee" => Note::D,
        "e" => Note::E,
        "f" => Note::F,
        "g" => Note::G,
        "a" => Note::A,
        "b" | "be" | "bee" => Note::B,
        _ => return None,
    })
}

/// Look up a synth parameter name token
pub(super) fn param(token: &str) -> Option<Param> {
    Some(match token {
        "cutoff" | "filter" => Param::Cutoff,
        "resonance" => Param::Resonance,
        "attack" => Param::Attack,
        "decay" => Param::Decay,
        "sustain" => Param::Sustain,
        "release" => Param::Release,
        "envelope" => Param::Envelope,
        "glide" => Param::Glide,
        "volume" => Param::Volume,
        "mix" => Param::Mix,
        _ => return None,
    })
}

/// Look up a modifier token
pub(super) fn modifier(token: &str) -> Option<Modifier> {
    Some(match token {
        "up" | "more" | "raise" | "increase" => Modifier::Up,
        "down" | "less" | "lower" | "decrease" => Modifier::Down,
        "max" | "maximum" | "full" => Modifier::Max,
        "min" | "minimum" => Modifier::Min,
        "zero" => Modifier::Zero,
        "half" | "middle" => Modifier::Half,
        "on" => Modifier::On,
        "off" => Modifier::Off,
        _ => return None,
    })
}
