// Musical styles and their generation constants.
//
// Each of the six styles is a closed enum variant bound to one exhaustively
// enumerated `StyleProfile`: how densely the melody fires, how far it may
// stray from the base octave, and how velocity and note length scale. The
// constants live in one table per style rather than scattered conditionals
// so the six definitions stay auditable side by side.
//
// Octave ranges are intentionally an enumerated (min, span) pair per style;
// there is no general formula behind them.

use serde::{Deserialize, Serialize};

/// The six supported musical styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicStyle {
    Ambient,
    Classical,
    Electronic,
    Jazz,
    Rock,
    Cinematic,
}

/// Per-style generation constants.
///
/// `octave_min`/`octave_span` define the melodic octave-offset range: an
/// offset is drawn as `(hash % span) + min`, giving e.g. {-1, 0, 1} for
/// `(-1, 3)` or {0, 1} for `(0, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Chance that a given sub-beat step emits a melody note, in (0, 1].
    pub note_probability: f64,
    /// Lowest octave offset the melody may take.
    pub octave_min: i32,
    /// Number of distinct octave offsets, starting at `octave_min`.
    pub octave_span: u32,
    /// Multiplier applied to the base randomized velocity.
    pub velocity_scale: f64,
    /// Multiplier applied to the base randomized note duration.
    pub duration_scale: f64,
}

impl StyleProfile {
    /// Map a hash value into this style's octave-offset range.
    pub fn octave_offset(&self, hash: u32) -> i32 {
        (hash % self.octave_span) as i32 + self.octave_min
    }
}

impl MusicStyle {
    pub const ALL: [MusicStyle; 6] = [
        MusicStyle::Ambient,
        MusicStyle::Classical,
        MusicStyle::Electronic,
        MusicStyle::Jazz,
        MusicStyle::Rock,
        MusicStyle::Cinematic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MusicStyle::Ambient => "ambient",
            MusicStyle::Classical => "classical",
            MusicStyle::Electronic => "electronic",
            MusicStyle::Jazz => "jazz",
            MusicStyle::Rock => "rock",
            MusicStyle::Cinematic => "cinematic",
        }
    }

    /// Parse a style name (case-insensitive). Used by the CLI.
    pub fn from_name(name: &str) -> Option<MusicStyle> {
        match name.to_lowercase().as_str() {
            "ambient" => Some(MusicStyle::Ambient),
            "classical" => Some(MusicStyle::Classical),
            "electronic" => Some(MusicStyle::Electronic),
            "jazz" => Some(MusicStyle::Jazz),
            "rock" => Some(MusicStyle::Rock),
            "cinematic" => Some(MusicStyle::Cinematic),
            _ => None,
        }
    }

    /// Stable per-style identifier fed to the degree scorer.
    ///
    /// Only stability and distinctness matter; the scorer divides this by
    /// 100 to form one input component.
    pub fn influence_id(self) -> u8 {
        self as u8
    }

    /// The generation constants for this style.
    pub fn profile(self) -> StyleProfile {
        match self {
            MusicStyle::Ambient => StyleProfile {
                note_probability: 0.3,
                octave_min: -1,
                octave_span: 3, // -1, 0, 1
                velocity_scale: 0.6,
                duration_scale: 2.0, // longer, washy notes
            },
            MusicStyle::Classical => StyleProfile {
                note_probability: 0.6,
                octave_min: -1,
                octave_span: 4, // -1, 0, 1, 2
                velocity_scale: 0.8,
                duration_scale: 1.0,
            },
            MusicStyle::Electronic => StyleProfile {
                note_probability: 0.7,
                octave_min: -1,
                octave_span: 3, // -1, 0, 1
                velocity_scale: 0.9,
                duration_scale: 0.5, // short, clipped notes
            },
            MusicStyle::Jazz => StyleProfile {
                note_probability: 0.5,
                octave_min: 0,
                octave_span: 2, // 0, 1
                velocity_scale: 0.7,
                duration_scale: 1.2,
            },
            MusicStyle::Rock => StyleProfile {
                note_probability: 0.8,
                octave_min: 0,
                octave_span: 2, // 0, 1
                velocity_scale: 1.0, // full range
                duration_scale: 0.8,
            },
            MusicStyle::Cinematic => StyleProfile {
                note_probability: 0.4,
                octave_min: -2,
                octave_span: 4, // -2, -1, 0, 1
                velocity_scale: 0.75,
                duration_scale: 1.5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_defined_for_all_styles() {
        for style in MusicStyle::ALL {
            let p = style.profile();
            assert!(
                p.note_probability > 0.0 && p.note_probability <= 1.0,
                "{}: probability out of (0, 1]",
                style.name()
            );
            assert!(p.octave_span > 0, "{}: empty octave range", style.name());
            assert!(p.velocity_scale > 0.0);
            assert!(p.duration_scale > 0.0);
        }
    }

    #[test]
    fn octave_ranges_match_design_table() {
        let expect = |style: MusicStyle, offsets: &[i32]| {
            let p = style.profile();
            let got: Vec<i32> = (0..p.octave_span).map(|h| p.octave_offset(h)).collect();
            assert_eq!(got, offsets, "{}", style.name());
        };
        expect(MusicStyle::Ambient, &[-1, 0, 1]);
        expect(MusicStyle::Classical, &[-1, 0, 1, 2]);
        expect(MusicStyle::Electronic, &[-1, 0, 1]);
        expect(MusicStyle::Jazz, &[0, 1]);
        expect(MusicStyle::Rock, &[0, 1]);
        expect(MusicStyle::Cinematic, &[-2, -1, 0, 1]);
    }

    #[test]
    fn octave_offset_stays_in_range() {
        for style in MusicStyle::ALL {
            let p = style.profile();
            for hash in [0u32, 1, 99, 1_000_000, u32::MAX] {
                let off = p.octave_offset(hash);
                assert!(off >= p.octave_min);
                assert!(off < p.octave_min + p.octave_span as i32);
            }
        }
    }

    #[test]
    fn influence_ids_are_distinct() {
        let ids: Vec<u8> = MusicStyle::ALL.iter().map(|s| s.influence_id()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len(), "influence ids must be injective");
    }

    #[test]
    fn name_round_trips() {
        for style in MusicStyle::ALL {
            assert_eq!(MusicStyle::from_name(style.name()), Some(style));
        }
        assert_eq!(MusicStyle::from_name("ROCK"), Some(MusicStyle::Rock));
        assert_eq!(MusicStyle::from_name("polka"), None);
    }
}
