//! Error types for generator configuration.

use thiserror::Error;

/// Configuration problems caught at construction time.
///
/// Per-frame generation is infallible by design: once a generator is built,
/// numerical anomalies are sanitized locally instead of surfaced as errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid resolution must be a power of two of at least 4, got {0}")]
    InvalidResolution(usize),

    #[error("world size must be positive and finite, got {0}")]
    InvalidWorldSize(f32),

    #[error("gravity must be positive and finite, got {0}")]
    InvalidGravity(f32),

    #[error("wind speed must be non-zero")]
    ZeroWindSpeed,

    #[error("normalized frequency range must satisfy 0 <= min <= max, got ({0}, {1})")]
    InvalidFrequencyRange(f32, f32),

    #[error("dispersion loop period must be positive, got {0}")]
    InvalidDispersionPeriod(f32),

    #[error("failed to spawn generator thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),
}
