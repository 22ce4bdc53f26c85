//! Animated progress state driven by an external clock.
//!
//! The controller owns the displayed progress value and the value it is
//! heading towards. It has no timer of its own: callers advance it with
//! [`ProgressController::step`] once per frame, passing the frame time from a
//! [`Clock`].

use std::cell::Cell;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::animation::{Easing, lerp};

/// Default progress animation length.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(1000);

/// Source of frame timestamps.
pub trait Clock {
    /// Current time.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Useful for tests and replays.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    /// Start at the current wall-clock time.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start at a fixed instant.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Whether the displayed progress is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    /// Displayed progress equals the target.
    Idle,
    /// An animation towards the target is running.
    Progressing,
}

/// Notification produced by [`ProgressController::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    /// The displayed value moved but has not reached the target yet.
    Changed {
        /// Displayed progress after the step.
        progress: f32,
    },
    /// The displayed value reached the target. Emitted once per animation.
    Finished {
        /// Final progress.
        progress: f32,
    },
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    started_at: Instant,
}

/// Owns the current and target progress of one bar.
#[derive(Debug, Clone)]
pub struct ProgressController {
    current: f32,
    target: f32,
    max: f32,
    duration: Duration,
    easing: Easing,
    tween: Option<Tween>,
    idle_since: Option<Instant>,
}

impl ProgressController {
    /// Create a controller at zero progress with an upper bound of `max`.
    pub fn new(max: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            max: max.max(0.0),
            duration: DEFAULT_ANIMATION_DURATION,
            easing: Easing::Linear,
            tween: None,
            idle_since: None,
        }
    }

    /// Set the animation length.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the animation curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Displayed progress.
    pub fn progress(&self) -> f32 {
        self.current
    }

    /// Progress the animation is heading towards.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Upper progress bound.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Current animation state.
    pub fn state(&self) -> ProgressState {
        if self.tween.is_some() {
            ProgressState::Progressing
        } else {
            ProgressState::Idle
        }
    }

    /// Check whether an animation is running.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Time spent idle since the last animation finished or the last snap.
    ///
    /// `None` while animating or before the value ever settled.
    pub fn idle_elapsed(&self, now: Instant) -> Option<Duration> {
        if self.tween.is_some() {
            return None;
        }
        self.idle_since.map(|since| now.saturating_duration_since(since))
    }

    /// Animate towards `target`, clamped to `0..=max`.
    ///
    /// The animation starts from the currently displayed value, so retargeting
    /// mid-flight never jumps.
    pub fn set_target(&mut self, target: f32, now: Instant) {
        let target = self.clamp(target);
        if target == self.target && (self.tween.is_some() || target == self.current) {
            return;
        }
        debug!(from = self.current, to = target, "progress target changed");
        self.target = target;
        self.tween = Some(Tween {
            from: self.current,
            started_at: now,
        });
        self.idle_since = None;
    }

    /// Jump to `value` without animating. The value counts as settled at `now`.
    pub fn snap_to(&mut self, value: f32, now: Instant) {
        let value = self.clamp(value);
        self.current = value;
        self.target = value;
        self.tween = None;
        self.idle_since = Some(now);
    }

    /// Change the upper bound, clamping the current and target values.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.current = self.clamp(self.current);
        self.target = self.clamp(self.target);
        if let Some(tween) = self.tween.as_mut() {
            tween.from = tween.from.clamp(0.0, self.max);
        }
    }

    /// Advance the animation to `now`.
    pub fn step(&mut self, now: Instant) -> Option<ProgressEvent> {
        let tween = self.tween?;
        let elapsed = now.saturating_duration_since(tween.started_at);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        if t >= 1.0 {
            self.current = self.target;
            self.tween = None;
            self.idle_since = Some(now);
            debug!(progress = self.current, "progress animation finished");
            return Some(ProgressEvent::Finished {
                progress: self.current,
            });
        }

        self.current = lerp(tween.from, self.target, self.easing.apply(t));
        Some(ProgressEvent::Changed {
            progress: self.current,
        })
    }

    /// Advance the animation using a clock.
    pub fn tick(&mut self, clock: &impl Clock) -> Option<ProgressEvent> {
        self.step(clock.now())
    }

    fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, self.max)
    }
}
