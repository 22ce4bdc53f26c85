//! Configuration errors.

use thiserror::Error;

/// Rejected bar configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A bar needs at least one segment.
    #[error("segment count must be at least 1, got {0}")]
    SegmentCount(usize),
    /// Spacing must be a finite, non-negative length.
    #[error("segment spacing must be finite and non-negative, got {0}")]
    Spacing(f32),
    /// Skew angle must stay inside the supported range.
    #[error(
        "segment angle must be within -{max}..={max} degrees, got {0}",
        max = crate::engine::MAX_ANGLE_DEGREES
    )]
    Angle(f32),
    /// Opacity must be within 0.0..=1.0.
    #[error("{target} alpha must be within 0.0..=1.0, got {alpha}")]
    Alpha {
        /// Which style carried the bad value.
        target: &'static str,
        /// The rejected value.
        alpha: f32,
    },
    /// Breath effect needs a finite factor in 0.0..=1.0 and a non-zero period.
    #[error("breath effect is invalid: {0}")]
    BreathEffect(&'static str),
}
