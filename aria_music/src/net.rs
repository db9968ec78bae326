// The degree scorer: a fixed random-weight transform that biases which
// scale degree the melody lands on at each beat.
//
// This is deliberately not a learning system. The 4x4 weight matrix is
// drawn once, from a `SeedRng`, when the engine is constructed, and never
// changes afterwards. The forward pass sums every input-weight product and
// squashes through a logistic sigmoid, yielding a value in (0, 1) that is
// scaled into a scale-degree index. The inputs are slow sinusoids of the
// beat position plus a per-style bias, so degree choice drifts smoothly
// over the piece instead of jumping at random.
//
// The matrix is read-only after construction; concurrent generations may
// share it without synchronization.

use crate::scale::Scale;
use crate::style::MusicStyle;
use aria_prng::SeedRng;

/// Fixed 4x4 weight matrix plus sigmoid activation.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeNet {
    weights: [[f64; 4]; 4],
}

impl DegreeNet {
    /// Draw a fresh weight matrix, each entry uniform in [-1, 1).
    pub fn from_rng(rng: &mut SeedRng) -> Self {
        let mut weights = [[0.0; 4]; 4];
        for row in &mut weights {
            for w in row.iter_mut() {
                *w = rng.range_f64(-1.0, 1.0);
            }
        }
        DegreeNet { weights }
    }

    /// Use an exact weight matrix. Tests inject known weights here instead
    /// of relying on construction-time randomness.
    pub fn from_weights(weights: [[f64; 4]; 4]) -> Self {
        DegreeNet { weights }
    }

    /// The four-component input for a beat: two slow sinusoids, the style
    /// bias, and the beat's position within a four-beat measure.
    fn input_vector(beat: f64, style: MusicStyle) -> [f64; 4] {
        [
            (beat * 0.1).sin(),
            (beat * 0.05).cos(),
            f64::from(style.influence_id()) / 100.0,
            (beat % 4.0) / 4.0,
        ]
    }

    /// Forward pass: full input-weight sum, then logistic sigmoid.
    /// Output is always in (0, 1).
    pub fn activate(&self, beat: f64, style: MusicStyle) -> f64 {
        let input = Self::input_vector(beat, style);
        let mut sum = 0.0;
        for (i, x) in input.iter().enumerate() {
            for w in &self.weights[i] {
                sum += x * w;
            }
        }
        1.0 / (1.0 + (-sum).exp())
    }

    /// Pick a scale-degree index for this beat, clamped into the scale.
    pub fn select_degree(&self, beat: f64, style: MusicStyle, scale: Scale) -> usize {
        let output = self.activate(beat, style);
        let index = (output * scale.degree_count() as f64).floor() as usize;
        index.min(scale.degree_count() - 1)
    }
}
