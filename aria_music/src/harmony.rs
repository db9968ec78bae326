// Harmony generation: sustained triads over fixed chord windows.
//
// The piece is divided into four-beat windows; each window sounds one
// root/third/fifth triad drawn from the style's chord progression, an
// octave below the melody register. Harmony is generated independently of
// the melody — the two lines only meet in the engine's final merge.

use crate::engine::CancelToken;
use crate::error::GenerateError;
use crate::note::{GenerationParameters, Note};
use crate::scale::{Scale, progression_for};

/// Beats per chord window.
pub const CHORD_BEATS: f64 = 4.0;

/// Harmony pitches sit an octave below the melody's middle-C root.
const HARMONY_ROOT: i32 = 48;

/// Octave reported on harmony notes.
const HARMONY_OCTAVE: i32 = 3;

const ROOT_VELOCITY: f64 = 0.5;
const UPPER_VELOCITY: f64 = 0.4;

/// Length of one chord window in seconds at the given tempo.
pub fn chord_window(params: &GenerationParameters) -> f64 {
    params.beat_length() * CHORD_BEATS
}

/// Generate the harmony line: one triad per complete chord window.
///
/// Only whole windows are emitted — a trailing partial window produces
/// nothing. Checks the cancellation token once per window.
pub fn generate_harmony(
    params: &GenerationParameters,
    cancel: &CancelToken,
) -> Result<Vec<Note>, GenerateError> {
    let scale = Scale::for_style(params.style);
    let progression = progression_for(params.style);
    let window = chord_window(params);
    let window_count = (params.duration / window).floor() as usize;

    let mut notes = Vec::with_capacity(window_count * 3);
    for index in 0..window_count {
        if cancel.is_cancelled() {
            return Err(GenerateError::Cancelled);
        }
        let start_time = index as f64 * window;
        let root_degree = progression[index % progression.len()];
        let root_pitch = HARMONY_ROOT + scale.degree_semitone(root_degree);

        // Triad: root, then third and fifth stacked above it by scale steps.
        let voices = [
            (root_pitch, ROOT_VELOCITY),
            (root_pitch + scale.degree_semitone(root_degree + 2), UPPER_VELOCITY),
            (root_pitch + scale.degree_semitone(root_degree + 4), UPPER_VELOCITY),
        ];
        for (pitch, velocity) in voices {
            notes.push(Note {
                pitch,
                velocity,
                start_time,
                duration: window,
                octave: HARMONY_OCTAVE,
            });
        }
    }

    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::MusicStyle;

    fn generate(style: MusicStyle, tempo: f64, duration: f64) -> Vec<Note> {
        let params = GenerationParameters::new(style, tempo, duration);
        generate_harmony(&params, &CancelToken::new()).unwrap()
    }

    #[test]
    fn classical_ten_seconds_gives_five_windows() {
        // 120 BPM -> 2 s windows -> floor(10 / 2) = 5 windows of 3 notes.
        let notes = generate(MusicStyle::Classical, 120.0, 10.0);
        assert_eq!(notes.len(), 15);
    }

    #[test]
    fn partial_trailing_window_is_dropped() {
        // 9 s at 120 BPM: 4 whole 2 s windows, 1 s left over.
        let notes = generate(MusicStyle::Classical, 120.0, 9.0);
        assert_eq!(notes.len(), 12);
    }

    #[test]
    fn starts_are_exact_window_multiples() {
        let params = GenerationParameters::new(MusicStyle::Jazz, 120.0, 10.0);
        let window = chord_window(&params);
        let notes = generate_harmony(&params, &CancelToken::new()).unwrap();
        for (i, note) in notes.iter().enumerate() {
            let expected = (i / 3) as f64 * window;
            assert_eq!(note.start_time, expected);
            assert_eq!(note.duration, window);
        }
    }

    #[test]
    fn each_window_is_a_root_third_fifth_triad() {
        for style in MusicStyle::ALL {
            let scale = Scale::for_style(style);
            let progression = progression_for(style);
            let notes = generate(style, 120.0, 16.0);
            assert_eq!(notes.len() % 3, 0);

            for (w, triad) in notes.chunks(3).enumerate() {
                let root_degree = progression[w % progression.len()];
                let root = 48 + scale.degree_semitone(root_degree);
                assert_eq!(triad[0].pitch, root, "{}", style.name());
                assert_eq!(
                    triad[1].pitch,
                    root + scale.degree_semitone(root_degree + 2)
                );
                assert_eq!(
                    triad[2].pitch,
                    root + scale.degree_semitone(root_degree + 4)
                );
                // All three share the window's span.
                assert!(triad.iter().all(|n| n.start_time == triad[0].start_time));
                assert!(triad.iter().all(|n| n.duration == triad[0].duration));
                assert!(triad.iter().all(|n| n.octave == 3));
            }
        }
    }

    #[test]
    fn triad_velocities() {
        let notes = generate(MusicStyle::Rock, 120.0, 8.0);
        for triad in notes.chunks(3) {
            assert_eq!(triad[0].velocity, 0.5);
            assert_eq!(triad[1].velocity, 0.4);
            assert_eq!(triad[2].velocity, 0.4);
        }
    }

    #[test]
    fn piece_shorter_than_a_window_yields_silence() {
        // 1 s piece, 2 s window: no complete window fits.
        let notes = generate(MusicStyle::Ambient, 120.0, 1.0);
        assert!(notes.is_empty());
    }

    #[test]
    fn cancellation_yields_no_partial_output() {
        let params = GenerationParameters::new(MusicStyle::Ambient, 120.0, 10.0);
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = generate_harmony(&params, &cancel);
        assert_eq!(result, Err(GenerateError::Cancelled));
    }

    #[test]
    fn deterministic() {
        let a = generate(MusicStyle::Cinematic, 90.0, 20.0);
        let b = generate(MusicStyle::Cinematic, 90.0, 20.0);
        assert_eq!(a, b);
    }
}
