// Standard MIDI File export of a finished note sequence.
//
// The exporter treats the note list as opaque, already-finalized output:
// it never reorders or regenerates, only encodes. Each note becomes a
// note-on/note-off pair; absolute second offsets map to MIDI ticks via the
// piece tempo. Output is SMF Format 1: one tempo track plus one note track.
//
// Uses the `midly` crate for MIDI writing.

use crate::note::Note;
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;
use thiserror::Error;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Largest tempo value a MIDI tempo meta event can carry (u24 microseconds
/// per quarter note).
const MAX_TEMPO_MICROS: f64 = 16_777_215.0;

#[derive(Debug, Error)]
pub enum MidiError {
    #[error("failed to write MIDI file: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode notes as MIDI and write to a file.
pub fn write_midi(notes: &[Note], tempo_bpm: f64, path: &Path) -> Result<(), MidiError> {
    let smf = notes_to_smf(notes, tempo_bpm);
    smf.save(path)?;
    Ok(())
}

/// Encode notes as an in-memory SMF.
pub fn notes_to_smf(notes: &[Note], tempo_bpm: f64) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track.
    let tempo_micros = (60_000_000.0 / tempo_bpm).min(MAX_TEMPO_MICROS) as u32;
    let mut tempo_track: Track<'static> = Vec::new();
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_micros))),
    });
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(tempo_track);

    // Track 1: every note on one channel. Collect absolute-tick on/off
    // events, order them (offs before ons on the same tick, so re-struck
    // pitches release cleanly), then delta-encode.
    let ticks_per_second = f64::from(TICKS_PER_QUARTER) * tempo_bpm / 60.0;
    let mut events: Vec<(u32, bool, u8, u8)> = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        let key = note.pitch.clamp(0, 127) as u8;
        let vel = (note.velocity * 127.0).round().clamp(0.0, 127.0) as u8;
        let on_tick = (note.start_time * ticks_per_second).round() as u32;
        let off_tick = ((note.start_time + note.duration) * ticks_per_second).round() as u32;
        events.push((on_tick, true, key, vel));
        events.push((off_tick, false, key, 0));
    }
    events.sort_by_key(|&(tick, is_on, _, _)| (tick, is_on));

    let channel = u4::new(0);
    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::TrackName(b"Aria")),
    });
    // Acoustic grand piano.
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange { program: u7::new(0) },
        },
    });

    let mut last_tick: u32 = 0;
    for (tick, is_on, key, vel) in events {
        let delta = tick - last_tick;
        last_tick = tick;
        let message = if is_on {
            MidiMessage::NoteOn {
                key: u7::new(key),
                vel: u7::new(vel),
            }
        } else {
            MidiMessage::NoteOff {
                key: u7::new(key),
                vel: u7::new(0),
            }
        };
        track.push(TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi { channel, message },
        });
    }
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}
