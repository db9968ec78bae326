// Core value types: notes and generation parameters.
//
// A Note is the generator's only output: pitch, velocity, timing, duration,
// plus an informational octave used for display names. Notes are plain
// values — immutable once created, no identity. GenerationParameters is the
// one input: style, tempo, duration, plus key/time-signature fields kept
// for interface compatibility but not consumed by the algorithm.

use crate::error::GenerateError;
use crate::style::MusicStyle;
use serde::{Deserialize, Serialize};

/// Pitch-class names for display, C through B.
const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A single generated note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Semantic MIDI note number. Nominally 0–127 but not clamped here;
    /// consumers that need a hard range clamp at their boundary.
    pub pitch: i32,
    /// Loudness in [0, 1] by intent (not enforced).
    pub velocity: f64,
    /// Onset in seconds from the start of the piece. Always >= 0.
    pub start_time: f64,
    /// Length in seconds. Always > 0.
    pub duration: f64,
    /// Informational octave, used only for display name derivation.
    pub octave: i32,
}

impl Note {
    /// Frequency in Hz (equal temperament, A4 = 440 Hz).
    pub fn frequency(&self) -> f64 {
        440.0 * 2f64.powf(f64::from(self.pitch - 69) / 12.0)
    }

    /// Display name, e.g. "C4" or "F#3".
    pub fn name(&self) -> String {
        let pc = self.pitch.rem_euclid(12) as usize;
        format!("{}{}", PITCH_NAMES[pc], self.octave)
    }
}

/// Input to a generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub style: MusicStyle,
    /// Tempo in beats per minute. Must be positive.
    pub tempo: f64,
    /// Total piece duration in seconds. Must be positive.
    pub duration: f64,
    /// Informational only; not consumed by the algorithm.
    pub key: String,
    /// Informational only; not consumed by the algorithm.
    pub time_signature: String,
}

impl GenerationParameters {
    pub fn new(style: MusicStyle, tempo: f64, duration: f64) -> Self {
        GenerationParameters {
            style,
            tempo,
            duration,
            key: "C".to_string(),
            time_signature: "4/4".to_string(),
        }
    }

    /// Fail-fast precondition check. The beat-stepping math is undefined
    /// for non-positive tempo or duration, so these are rejected up front
    /// rather than producing degenerate output.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !(self.tempo.is_finite() && self.tempo > 0.0) {
            return Err(GenerateError::InvalidTempo(self.tempo));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(GenerateError::InvalidDuration(self.duration));
        }
        Ok(())
    }

    /// Beats per second at this tempo.
    pub fn beats_per_second(&self) -> f64 {
        self.tempo / 60.0
    }

    /// Length of one beat in seconds.
    pub fn beat_length(&self) -> f64 {
        60.0 / self.tempo
    }

    /// Total number of beats in the piece (fractional).
    pub fn total_beats(&self) -> f64 {
        self.beats_per_second() * self.duration
    }
}
