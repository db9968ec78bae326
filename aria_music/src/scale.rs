// Scale and chord-progression tables.
//
// A scale is an ordered set of semitone offsets from a root pitch; it
// defines the pitch classes the melody may use. A progression is an ordered
// cycle of scale-degree indices (not semitones) defining the harmonic
// backbone. Both are fixed design tables — each style binds to exactly one
// scale and one progression, nothing is computed.
//
// Used by melody.rs for pitch selection and harmony.rs for triad roots.

use crate::style::MusicStyle;
use serde::{Deserialize, Serialize};

/// The scale interval sets the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    Major,
    Minor,
    Pentatonic,
    Blues,
    Dorian,
    Mixolydian,
}

impl Scale {
    /// Semitone offsets from the root, ascending, all in [0, 11].
    pub fn intervals(self) -> &'static [i32] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
        }
    }

    /// Number of degrees in the scale (5–7).
    pub fn degree_count(self) -> usize {
        self.intervals().len()
    }

    /// Semitone offset of a scale degree; degrees wrap modulo the scale.
    pub fn degree_semitone(self, degree: usize) -> i32 {
        let intervals = self.intervals();
        intervals[degree % intervals.len()]
    }

    /// The scale a style draws its melody and harmony from.
    pub fn for_style(style: MusicStyle) -> Scale {
        match style {
            MusicStyle::Ambient | MusicStyle::Cinematic => Scale::Dorian,
            MusicStyle::Classical => Scale::Major,
            MusicStyle::Electronic => Scale::Minor,
            MusicStyle::Jazz => Scale::Mixolydian,
            MusicStyle::Rock => Scale::Pentatonic,
        }
    }
}

/// The chord cycle for a style, as scale-degree indices.
///
/// Indices are resolved modulo the scale length, so a degree like 6 is
/// valid even against a five-note scale.
pub fn progression_for(style: MusicStyle) -> &'static [usize] {
    match style {
        MusicStyle::Ambient => &[0, 3, 6, 4],    // i, bIII, bVI, iv
        MusicStyle::Classical => &[0, 5, 3, 4],  // I, vi, IV, V
        MusicStyle::Electronic => &[0, 6, 3, 4], // i, bVI, bIII, iv
        MusicStyle::Jazz => &[0, 3, 4, 5],       // I, IV, V, vi
        MusicStyle::Rock => &[0, 5, 3, 4],       // I, vi, IV, V
        MusicStyle::Cinematic => &[0, 4, 1, 5],  // i, iv, bII, v
    }
}
