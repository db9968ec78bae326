// Aria Music Generator
//
// A procedural composer that turns a handful of style parameters (musical
// style, tempo, total duration) into an ordered, harmonically coherent note
// sequence. Every decision derives from deterministic hash streams and a
// fixed random-weight scorer, so a seeded engine reproduces a piece exactly.
//
// Architecture:
// - style.rs: The six musical styles and their generation constants
//   (note density, octave spread, velocity/duration scaling)
// - scale.rs: Scale interval tables and chord progressions per style
// - note.rs: Core value types (Note, GenerationParameters)
// - net.rs: Fixed-weight linear-plus-sigmoid scorer that biases
//   scale-degree selection per beat
// - melody.rs: Sub-beat melody walk (emission gating, pitch/velocity/
//   duration from independent hash streams)
// - harmony.rs: Chord-window harmony (root/third/fifth triads over the
//   style's progression)
// - engine.rs: Orchestration — merge, sort, cancellation, background
//   generation, simulated latency
// - midi.rs: Standard MIDI File export of a finished note sequence
// - error.rs: Error types
//
// The generator layers melody and harmony independently and only merges
// them at the end; neither depends on the other's output.

pub mod engine;
pub mod error;
pub mod harmony;
pub mod melody;
pub mod midi;
pub mod net;
pub mod note;
pub mod scale;
pub mod style;
