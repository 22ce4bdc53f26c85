//! Segment bar widget entry points and builders.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::animation::{BreathEffect, Easing};
use crate::controller::{
    DEFAULT_ANIMATION_DURATION, ProgressController, ProgressEvent, ProgressState,
};
use crate::engine::{GapPolicy, MAX_ANGLE_DEGREES, SegmentLayout};
use crate::error::ConfigError;
use crate::geom::{CoordinateSet, ScreenRect};
use crate::render::{BarFill, RenderList, build_bar_commands};
use crate::style::{SegmentStyle, Theme};

/// Static configuration of a segment bar.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentBarConfig {
    /// Number of segments, at least 1.
    pub segment_count: usize,
    /// Gap between adjacent segments in pixels.
    pub spacing: f32,
    /// Skew angle in degrees, within -60..=60.
    pub angle: f32,
    /// How the overlay crosses gaps.
    pub gap_policy: GapPolicy,
    /// Background segment fill.
    pub segment_style: SegmentStyle,
    /// Progress overlay fill.
    pub progress_style: SegmentStyle,
    /// Draw background segments even where the overlay covers them.
    pub draw_all_segments: bool,
    /// Length of one progress animation.
    pub animation_duration: Duration,
    /// Progress animation curve.
    pub easing: Easing,
    /// Pulse the overlay while idle at full progress.
    pub breath: Option<BreathEffect>,
}

impl Default for SegmentBarConfig {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            segment_count: 3,
            spacing: 10.0,
            angle: 0.0,
            gap_policy: GapPolicy::Hold,
            segment_style: theme.segment,
            progress_style: theme.progress,
            draw_all_segments: false,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            easing: Easing::Linear,
            breath: None,
        }
    }
}

impl SegmentBarConfig {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_segment_count(self.segment_count)?;
        validate_spacing(self.spacing)?;
        validate_angle(self.angle)?;
        self.segment_style.validate("segment")?;
        self.progress_style.validate("progress")?;
        if let Some(breath) = &self.breath {
            breath.validate()?;
        }
        Ok(())
    }

    /// Layout for a drawable area of the given size.
    pub fn layout(&self, width: f32, height: f32) -> SegmentLayout {
        SegmentLayout::new(self.segment_count, width, height)
            .with_spacing(self.spacing)
            .with_angle(self.angle)
            .with_gap_policy(self.gap_policy)
    }
}

fn validate_segment_count(count: usize) -> Result<(), ConfigError> {
    if count < 1 {
        return Err(ConfigError::SegmentCount(count));
    }
    Ok(())
}

fn validate_spacing(spacing: f32) -> Result<(), ConfigError> {
    if !spacing.is_finite() || spacing < 0.0 {
        return Err(ConfigError::Spacing(spacing));
    }
    Ok(())
}

fn validate_angle(angle: f32) -> Result<(), ConfigError> {
    if !(-MAX_ANGLE_DEGREES..=MAX_ANGLE_DEGREES).contains(&angle) {
        return Err(ConfigError::Angle(angle));
    }
    Ok(())
}

/// A progress notification together with the overlay shape it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    /// What the controller reported.
    pub event: ProgressEvent,
    /// Overlay coordinates for the reported progress.
    pub coordinates: CoordinateSet,
}

/// A segmented progress bar: configuration plus animated progress.
#[derive(Debug, Clone)]
pub struct SegmentBar {
    config: SegmentBarConfig,
    controller: ProgressController,
}

impl SegmentBar {
    /// Create a bar from a validated configuration.
    pub fn new(config: SegmentBarConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected segment bar configuration");
            return Err(err);
        }
        let controller = ProgressController::new(config.segment_count as f32)
            .with_duration(config.animation_duration)
            .with_easing(config.easing);
        Ok(Self { config, controller })
    }

    /// Start building a bar with custom configuration.
    pub fn builder() -> SegmentBarBuilder {
        SegmentBarBuilder::default()
    }

    /// Access the configuration.
    pub fn config(&self) -> &SegmentBarConfig {
        &self.config
    }

    /// Access the progress controller.
    pub fn controller(&self) -> &ProgressController {
        &self.controller
    }

    /// Displayed progress.
    pub fn progress(&self) -> f32 {
        self.controller.progress()
    }

    /// Target progress.
    pub fn target(&self) -> f32 {
        self.controller.target()
    }

    /// Current animation state.
    pub fn state(&self) -> ProgressState {
        self.controller.state()
    }

    /// Animate towards `progress`, clamped to `0..=segment_count`.
    pub fn set_progress(&mut self, progress: f32, now: Instant) {
        self.controller.set_target(progress, now);
    }

    /// Jump to `progress` without animating.
    pub fn snap_progress(&mut self, progress: f32, now: Instant) {
        self.controller.snap_to(progress, now);
    }

    /// Animate one whole segment forward.
    ///
    /// Returns `false` without changing anything when the target is already
    /// at the segment count.
    pub fn increment(&mut self, now: Instant) -> bool {
        let target = self.controller.target();
        let max = self.controller.max();
        if target >= max {
            return false;
        }
        self.controller.set_target((target.floor() + 1.0).min(max), now);
        true
    }

    /// Animate one whole segment back.
    ///
    /// Returns `false` without changing anything when the target is already
    /// zero.
    pub fn decrement(&mut self, now: Instant) -> bool {
        let target = self.controller.target();
        if target <= 0.0 {
            return false;
        }
        self.controller.set_target((target.ceil() - 1.0).max(0.0), now);
        true
    }

    /// Advance the progress animation.
    pub fn step(&mut self, now: Instant) -> Option<ProgressEvent> {
        self.controller.step(now)
    }

    /// Advance the progress animation and attach the overlay shape for a
    /// drawable area of `width` by `height`.
    pub fn advance(&mut self, now: Instant, width: f32, height: f32) -> Option<ProgressUpdate> {
        let event = self.step(now)?;
        Some(ProgressUpdate {
            event,
            coordinates: self.overlay(width, height),
        })
    }

    /// Overlay coordinates for the displayed progress.
    pub fn overlay(&self, width: f32, height: f32) -> CoordinateSet {
        self.layout(width, height).progress(self.progress())
    }

    /// Change the number of segments, clamping progress to the new count.
    pub fn set_segment_count(&mut self, segment_count: usize) -> Result<(), ConfigError> {
        validate_segment_count(segment_count)?;
        debug!(
            from = self.config.segment_count,
            to = segment_count,
            "segment count changed"
        );
        self.config.segment_count = segment_count;
        self.controller.set_max(segment_count as f32);
        Ok(())
    }

    /// Change the gap between segments.
    pub fn set_spacing(&mut self, spacing: f32) -> Result<(), ConfigError> {
        validate_spacing(spacing)?;
        self.config.spacing = spacing;
        Ok(())
    }

    /// Change the skew angle.
    pub fn set_angle(&mut self, angle: f32) -> Result<(), ConfigError> {
        validate_angle(angle)?;
        self.config.angle = angle;
        Ok(())
    }

    /// Replace both fill styles.
    pub fn set_styles(
        &mut self,
        segment: SegmentStyle,
        progress: SegmentStyle,
    ) -> Result<(), ConfigError> {
        segment.validate("segment")?;
        progress.validate("progress")?;
        self.config.segment_style = segment;
        self.config.progress_style = progress;
        Ok(())
    }

    /// Layout for a drawable area of the given size.
    pub fn layout(&self, width: f32, height: f32) -> SegmentLayout {
        self.config.layout(width, height)
    }

    /// Whether background segments under the overlay are drawn.
    ///
    /// With a breath effect configured, covered segments are only drawn while
    /// the progress animation runs.
    pub fn draws_all_segments(&self) -> bool {
        match self.config.breath {
            Some(_) => self.controller.is_animating(),
            None => self.config.draw_all_segments,
        }
    }

    /// Check whether the overlay is pulsing at `now`.
    pub fn is_breathing(&self, now: Instant) -> bool {
        self.config.breath.is_some()
            && self.controller.target() >= self.config.segment_count as f32
            && self.controller.idle_elapsed(now).is_some()
    }

    /// Overlay opacity at `now`, including the breath pulse.
    pub fn progress_alpha(&self, now: Instant) -> f32 {
        let alpha = self.config.progress_style.alpha;
        match (self.config.breath, self.controller.idle_elapsed(now)) {
            (Some(breath), Some(elapsed)) if self.is_breathing(now) => {
                breath.alpha_at(alpha, elapsed)
            }
            _ => alpha,
        }
    }

    /// Resolved fills for a frame at `now`.
    pub fn fill(&self, now: Instant) -> BarFill {
        BarFill {
            segment: self.config.segment_style.effective_color(),
            progress: self
                .config
                .progress_style
                .with_alpha(self.progress_alpha(now))
                .effective_color(),
            draw_all_segments: self.draws_all_segments(),
        }
    }

    /// Build render commands for the bar placed at `bounds`.
    ///
    /// Nothing is emitted when `bounds` has no area.
    pub fn build_commands(&self, bounds: ScreenRect, now: Instant, out: &mut RenderList) {
        if !bounds.is_valid() {
            return;
        }
        let layout = self.layout(bounds.width(), bounds.height());
        build_bar_commands(&layout, self.progress(), bounds, self.fill(now), out);
    }
}

/// Builder for [`SegmentBar`].
#[derive(Debug, Clone, Default)]
pub struct SegmentBarBuilder {
    config: SegmentBarConfig,
    progress: f32,
}

impl SegmentBarBuilder {
    /// Set the number of segments.
    pub fn segment_count(mut self, segment_count: usize) -> Self {
        self.config.segment_count = segment_count;
        self
    }

    /// Set the gap between segments.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.config.spacing = spacing;
        self
    }

    /// Set the skew angle in degrees.
    pub fn angle(mut self, angle: f32) -> Self {
        self.config.angle = angle;
        self
    }

    /// Set the gap policy.
    pub fn gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.config.gap_policy = gap_policy;
        self
    }

    /// Set the background segment style.
    pub fn segment_style(mut self, style: SegmentStyle) -> Self {
        self.config.segment_style = style;
        self
    }

    /// Set the progress overlay style.
    pub fn progress_style(mut self, style: SegmentStyle) -> Self {
        self.config.progress_style = style;
        self
    }

    /// Take both styles from a theme.
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.config.segment_style = theme.segment;
        self.config.progress_style = theme.progress;
        self
    }

    /// Draw segments under the overlay too.
    pub fn draw_all_segments(mut self, draw_all: bool) -> Self {
        self.config.draw_all_segments = draw_all;
        self
    }

    /// Set the progress animation length.
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.config.animation_duration = duration;
        self
    }

    /// Set the progress animation curve.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.config.easing = easing;
        self
    }

    /// Enable the idle breath effect.
    pub fn breath(mut self, breath: BreathEffect) -> Self {
        self.config.breath = Some(breath);
        self
    }

    /// Set the initial progress, shown without animation.
    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = progress;
        self
    }

    /// Build the bar. The initial progress counts as settled from now.
    pub fn build(self) -> Result<SegmentBar, ConfigError> {
        let mut bar = SegmentBar::new(self.config)?;
        bar.snap_progress(self.progress, Instant::now());
        Ok(bar)
    }
}
