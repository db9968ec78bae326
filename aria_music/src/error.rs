// Error types for the composition core.
//
// The pure computation is total: hashing, table lookups, and the scorer
// cannot fail given valid parameters. That leaves cancellation and the two
// fail-fast precondition violations. Nothing is retried internally;
// generation is idempotent for a fixed engine, so retry is the caller's
// business.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// The generation was cancelled before completion. No partial note
    /// sequence is ever produced.
    #[error("generation cancelled before completion")]
    Cancelled,

    /// Tempo must be finite and positive.
    #[error("tempo must be positive, got {0}")]
    InvalidTempo(f64),

    /// Duration must be finite and positive.
    #[error("duration must be positive, got {0}")]
    InvalidDuration(f64),
}
