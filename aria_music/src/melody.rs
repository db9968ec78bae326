// Melody generation: a walk over the timeline in quarter-beat steps.
//
// Each step makes four independent decisions — emit or rest, octave offset,
// velocity, duration — each drawn from its own `mix32` hash stream keyed by
// the step index plus a per-decision offset. Sharing one hash function this
// way keeps the streams decorrelated while every decision stays a pure
// function of the step index, so a piece is reproducible beat by beat.
//
// The scale degree itself comes from the engine's `DegreeNet`, not a hash
// stream: it drifts smoothly with the beat position rather than jumping.

use crate::engine::CancelToken;
use crate::error::GenerateError;
use crate::net::DegreeNet;
use crate::note::{GenerationParameters, Note};
use crate::scale::Scale;
use aria_prng::mix32;

/// Resolution of the melody walk, in beats.
pub const STEP_BEATS: f64 = 0.25;

/// Melody pitches are offsets from middle C.
const MELODY_ROOT: i32 = 60;

/// Octave reported on melody notes before the per-note offset.
const BASE_OCTAVE: i32 = 4;

// Additive seed offsets separating the per-step decision streams. The
// presence decision uses the base stream (offset 0).
const OCTAVE_STREAM: u32 = 2000;
const VELOCITY_STREAM: u32 = 3000;
const DURATION_STREAM: u32 = 4000;

/// Base note lengths in beats: 16th, 8th, quarter, half.
const DURATION_MULTIPLIERS: [f64; 4] = [0.25, 0.5, 1.0, 2.0];

/// Generate the melody line for one piece.
///
/// Walks step indices from 0 while `step * 0.25 < total_beats`; the beat
/// bound is the sole termination condition. Checks the cancellation token
/// every step and returns `Cancelled` with no partial output.
pub fn generate_melody(
    params: &GenerationParameters,
    net: &DegreeNet,
    cancel: &CancelToken,
) -> Result<Vec<Note>, GenerateError> {
    let profile = params.style.profile();
    let scale = Scale::for_style(params.style);
    let beats_per_second = params.beats_per_second();
    let total_beats = params.total_beats();
    let threshold = (profile.note_probability * 100.0).round() as u32;

    let mut notes = Vec::new();
    for step in 0u32.. {
        let beat = f64::from(step) * STEP_BEATS;
        if beat >= total_beats {
            break;
        }
        if cancel.is_cancelled() {
            return Err(GenerateError::Cancelled);
        }
        if mix32(step) % 100 >= threshold {
            continue;
        }

        let degree = net.select_degree(beat, params.style, scale);
        let octave_offset = profile.octave_offset(mix32(step + OCTAVE_STREAM));
        let pitch = MELODY_ROOT + scale.degree_semitone(degree) + octave_offset * 12;

        // Base velocity lands in [60/127, 99/127], then the style scales it.
        let base_velocity = f64::from(mix32(step + VELOCITY_STREAM) % 40 + 60) / 127.0;
        let velocity = base_velocity * profile.velocity_scale;

        let multiplier = DURATION_MULTIPLIERS[(mix32(step + DURATION_STREAM) % 4) as usize];
        let duration = params.beat_length() * multiplier * profile.duration_scale;

        notes.push(Note {
            pitch,
            velocity,
            start_time: beat / beats_per_second,
            duration,
            octave: BASE_OCTAVE + octave_offset,
        });
    }

    Ok(notes)
}
