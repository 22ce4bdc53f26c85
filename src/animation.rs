//! Easing curves and the idle breath effect.

use std::time::Duration;

use crate::error::ConfigError;

/// Curve mapping linear animation time to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Cubic ease-in-out.
    EaseInOutCubic,
}

impl Easing {
    /// Map `t` in 0.0..=1.0 to eased progress in 0.0..=1.0.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Pulsing overlay opacity shown while a finished bar sits idle.
///
/// Each period holds full opacity for the first half, fades to
/// `min_factor` at three quarters, then returns to full opacity and restarts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreathEffect {
    /// Length of one pulse.
    pub period: Duration,
    /// Opacity multiplier at the bottom of the pulse.
    pub min_factor: f32,
}

impl Default for BreathEffect {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(1800),
            min_factor: 0.3,
        }
    }
}

impl BreathEffect {
    /// Opacity at `elapsed` time into the effect for a base opacity of `alpha`.
    pub fn alpha_at(&self, alpha: f32, elapsed: Duration) -> f32 {
        let period = self.period.as_secs_f32();
        if period <= 0.0 {
            return alpha;
        }
        let phase = (elapsed.as_secs_f32() % period) / period;
        let low = alpha * self.min_factor;
        if phase <= 0.5 {
            alpha
        } else if phase <= 0.75 {
            lerp(alpha, low, (phase - 0.5) / 0.25)
        } else {
            lerp(low, alpha, (phase - 0.75) / 0.25)
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.period.is_zero() {
            return Err(ConfigError::BreathEffect("period must be non-zero"));
        }
        if !(0.0..=1.0).contains(&self.min_factor) {
            return Err(ConfigError::BreathEffect(
                "min factor must be within 0.0..=1.0",
            ));
        }
        Ok(())
    }
}

pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
