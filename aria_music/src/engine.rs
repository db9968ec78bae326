// The music engine: orchestrates melody and harmony into one piece.
//
// The engine owns the only process-lifetime state in the generator: the
// fixed weight matrix of its `DegreeNet`, drawn once at construction.
// Everything else is local to a generation call, so one engine may serve
// concurrent generations — the matrix is read-only after construction.
//
// Generation is one logical long-running operation per call. The caller
// can run it inline (`generate`), pass a token to abort it mid-flight
// (`generate_cancellable`), or push it onto a background thread and keep a
// handle (`spawn_generate`). A cancelled call reports `Cancelled`; it never
// exposes a partially built sequence.
//
// An optional simulated-latency pause stands in for "processing time"
// before computation starts. It is off by default so tests run
// synchronously; hosts that want the original feel can inject a duration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use aria_prng::SeedRng;

use crate::error::GenerateError;
use crate::harmony::generate_harmony;
use crate::melody::generate_melody;
use crate::net::DegreeNet;
use crate::note::{GenerationParameters, Note};

/// Granularity at which the simulated-latency pause rechecks cancellation.
const LATENCY_SLICE: Duration = Duration::from_millis(10);

/// Shared cancellation flag for an in-flight generation.
///
/// Clones share the flag. Once cancelled, a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Request cancellation of the generation holding this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// The composition engine.
pub struct MusicEngine {
    net: DegreeNet,
    simulated_latency: Option<Duration>,
}

impl MusicEngine {
    /// Engine with a weight matrix drawn from the system clock.
    ///
    /// Each construction gets a different matrix (and so a different
    /// melodic character); use `with_seed` or `with_weights` when
    /// reproducibility matters.
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::with_seed(nanos)
    }

    /// Engine whose weight matrix derives deterministically from a seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = SeedRng::new(seed);
        MusicEngine {
            net: DegreeNet::from_rng(&mut rng),
            simulated_latency: None,
        }
    }

    /// Engine with an exact, injected weight matrix.
    pub fn with_weights(weights: [[f64; 4]; 4]) -> Self {
        MusicEngine {
            net: DegreeNet::from_weights(weights),
            simulated_latency: None,
        }
    }

    /// Inject an artificial pause before computation begins. `None` (the
    /// default) disables it.
    pub fn set_simulated_latency(&mut self, latency: Option<Duration>) {
        self.simulated_latency = latency;
    }

    /// Generate a complete piece for the given parameters.
    ///
    /// Melody and harmony are generated independently, concatenated
    /// (melody first), and stably sorted by onset — tied onsets keep that
    /// concatenation order. Two calls with identical parameters on the
    /// same engine produce identical output.
    pub fn generate(&self, params: &GenerationParameters) -> Result<Vec<Note>, GenerateError> {
        self.generate_cancellable(params, &CancelToken::new())
    }

    /// Like `generate`, but aborts with `GenerateError::Cancelled` as soon
    /// as the token fires. No partial sequence is ever returned.
    pub fn generate_cancellable(
        &self,
        params: &GenerationParameters,
        cancel: &CancelToken,
    ) -> Result<Vec<Note>, GenerateError> {
        params.validate()?;
        if let Some(latency) = self.simulated_latency {
            pause(latency, cancel)?;
        }

        let mut notes = generate_melody(params, &self.net, cancel)?;
        notes.extend(generate_harmony(params, cancel)?);
        notes.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        Ok(notes)
    }
}

/// Run a generation on a background thread.
///
/// The returned handle can cancel the run or block for its result. The
/// engine is shared, not copied, so the spawned run uses the same weight
/// matrix as inline calls.
pub fn spawn_generate(engine: &Arc<MusicEngine>, params: GenerationParameters) -> GenerationHandle {
    let engine = Arc::clone(engine);
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let thread = thread::spawn(move || engine.generate_cancellable(&params, &token));
    GenerationHandle {
        cancel,
        thread: Some(thread),
    }
}

impl Default for MusicEngine {
    fn default() -> Self {
        MusicEngine::new()
    }
}

/// Sleep in short slices so a cancellation lands promptly.
fn pause(latency: Duration, cancel: &CancelToken) -> Result<(), GenerateError> {
    let mut remaining = latency;
    while remaining > Duration::ZERO {
        if cancel.is_cancelled() {
            return Err(GenerateError::Cancelled);
        }
        let slice = remaining.min(LATENCY_SLICE);
        thread::sleep(slice);
        remaining -= slice;
    }
    if cancel.is_cancelled() {
        return Err(GenerateError::Cancelled);
    }
    Ok(())
}

/// Handle to a background generation, in the spirit of a thread handle:
/// cancel it, or join it for the result.
pub struct GenerationHandle {
    cancel: CancelToken,
    thread: Option<JoinHandle<Result<Vec<Note>, GenerateError>>>,
}

impl GenerationHandle {
    /// Request cancellation. The run reports `Cancelled` through `join`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Block until the generation finishes and take its result.
    ///
    /// A worker that died without producing a result reports `Cancelled`.
    pub fn join(mut self) -> Result<Vec<Note>, GenerateError> {
        match self.thread.take() {
            Some(thread) => thread.join().unwrap_or_else(|_| Err(GenerateError::Cancelled)),
            None => Err(GenerateError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony;
    use crate::melody;
    use crate::style::MusicStyle;

    fn test_weights() -> [[f64; 4]; 4] {
        [
            [0.5, -0.3, 0.8, -0.1],
            [-0.6, 0.2, 0.4, 0.7],
            [0.1, -0.9, 0.3, 0.5],
            [-0.2, 0.6, -0.4, 0.9],
        ]
    }

    fn classical_10s() -> GenerationParameters {
        GenerationParameters::new(MusicStyle::Classical, 120.0, 10.0)
    }

    #[test]
    fn identical_calls_are_byte_identical() {
        let engine = MusicEngine::with_seed(7);
        let a = engine.generate(&classical_10s()).unwrap();
        let b = engine.generate(&classical_10s()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn same_seed_same_piece_across_engines() {
        let a = MusicEngine::with_seed(123).generate(&classical_10s()).unwrap();
        let b = MusicEngine::with_seed(123).generate(&classical_10s()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn output_sorted_by_onset() {
        let engine = MusicEngine::with_weights(test_weights());
        for style in MusicStyle::ALL {
            let params = GenerationParameters::new(style, 100.0, 15.0);
            let notes = engine.generate(&params).unwrap();
            for pair in notes.windows(2) {
                assert!(
                    pair[0].start_time <= pair[1].start_time,
                    "{}: out of order",
                    style.name()
                );
            }
        }
    }

    #[test]
    fn merge_is_melody_then_harmony_on_ties() {
        // mix32(0) == 0, so the melody always emits at step 0; the first
        // harmony triad also starts at 0. Stable sort must keep the melody
        // note first. Harmony velocities are exactly 0.5/0.4; a scaled
        // melody velocity ((h % 40 + 60)/127 * scale) never lands on either.
        let engine = MusicEngine::with_weights(test_weights());
        let notes = engine.generate(&classical_10s()).unwrap();
        let first = &notes[0];
        assert_eq!(first.start_time, 0.0);
        assert!(first.velocity != 0.5 && first.velocity != 0.4);
    }

    #[test]
    fn total_count_is_melody_plus_harmony() {
        // Scenario: classical @ 120 for 10 s -> 5 windows * 3 = 15 harmony
        // notes, plus however many of the 80 steps emitted.
        let engine = MusicEngine::with_weights(test_weights());
        let params = classical_10s();
        let token = CancelToken::new();
        let melody = melody::generate_melody(&params, &engine.net, &token).unwrap();
        let harmony = harmony::generate_harmony(&params, &token).unwrap();
        assert_eq!(harmony.len(), 15);
        assert!(melody.len() <= 80);

        let all = engine.generate(&params).unwrap();
        assert_eq!(all.len(), melody.len() + harmony.len());
    }

    #[test]
    fn rejects_zero_tempo_and_duration() {
        let engine = MusicEngine::with_seed(1);
        let mut params = classical_10s();
        params.tempo = 0.0;
        assert!(matches!(
            engine.generate(&params),
            Err(GenerateError::InvalidTempo(_))
        ));

        let mut params = classical_10s();
        params.duration = 0.0;
        assert!(matches!(
            engine.generate(&params),
            Err(GenerateError::InvalidDuration(_))
        ));
    }

    #[test]
    fn precancelled_token_aborts_immediately() {
        let engine = MusicEngine::with_seed(1);
        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(
            engine.generate_cancellable(&classical_10s(), &cancel),
            Err(GenerateError::Cancelled)
        );
    }

    #[test]
    fn spawned_run_matches_inline_run() {
        let engine = Arc::new(MusicEngine::with_seed(42));
        let inline = engine.generate(&classical_10s()).unwrap();
        let handle = spawn_generate(&engine, classical_10s());
        let spawned = handle.join().unwrap();
        assert_eq!(inline, spawned);
    }

    #[test]
    fn cancelling_a_spawned_run_reports_cancelled() {
        let mut engine = MusicEngine::with_seed(42);
        // A generous pause keeps the run inside its latency window until
        // the cancel lands.
        engine.set_simulated_latency(Some(Duration::from_secs(5)));
        let engine = Arc::new(engine);
        let handle = spawn_generate(&engine, classical_10s());
        handle.cancel();
        assert_eq!(handle.join(), Err(GenerateError::Cancelled));
    }

    #[test]
    fn concurrent_generations_share_the_engine() {
        let engine = Arc::new(MusicEngine::with_seed(9));
        let a = spawn_generate(&engine, classical_10s());
        let b = spawn_generate(&engine, classical_10s());
        let (a, b) = (a.join().unwrap(), b.join().unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn validation_precedes_latency_pause() {
        let mut engine = MusicEngine::with_seed(1);
        engine.set_simulated_latency(Some(Duration::from_secs(60)));
        let mut params = classical_10s();
        params.tempo = -10.0;
        // Must fail fast, not sleep for a minute.
        let start = std::time::Instant::now();
        assert!(engine.generate(&params).is_err());
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
