//! Crate-wide error type.

use thiserror::Error;

/// Errors reported to callers of the impact-sound core and its hosts.
///
/// Degenerate collisions (no contacts) and unsupported shapes are resolved
/// in place and never show up here. Numerically invalid oscillator states are
/// clamped inside the audio path for the same reason.
#[derive(Error, Debug)]
pub enum Error {
    /// Spectrum band lookup outside `[0, 8)`
    #[error("band index {0} out of range, only 8 frequency bands exist")]
    InvalidBandIndex(i32),

    /// Spectrum input of the wrong length
    #[error("spectrum input must hold exactly 512 samples, got {got}")]
    InvalidSampleCount {
        /// Number of samples supplied
        got: usize,
    },

    /// Triangle mesh violates its construction preconditions
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration rejected by `validate()`
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Host audio device or stream failure
    #[error("audio device error: {0}")]
    AudioDevice(String),

    /// WAV writer failure
    #[error("recording failed: {0}")]
    Recording(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
