//! Segment geometry: maps segment indices and progress values to corner
//! coordinates.
//!
//! Every function here is pure. Preconditions are documented rather than
//! checked so the per-frame path stays branch-light; out-of-range inputs
//! produce degenerate shapes, never panics.

use crate::geom::CoordinateSet;

/// Largest skew angle, in degrees, accepted by bar configuration.
pub const MAX_ANGLE_DEGREES: f32 = 60.0;

/// How the progress overlay moves across the spacing between segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GapPolicy {
    /// Grow at the segment fill rate and skip the gap at each whole step.
    ///
    /// The overlay's right edge is never inside a gap.
    #[default]
    Hold,
    /// Sweep linearly through gaps, clamped to the last segment's edge.
    Interpolate,
}

/// Layout parameters for one bar.
///
/// `segment_count` must be at least 1. `width`, `height` and `spacing` are
/// expected to be non-negative and `angle` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLayout {
    segment_count: usize,
    width: f32,
    height: f32,
    spacing: f32,
    angle: f32,
    gap_policy: GapPolicy,
}

impl SegmentLayout {
    /// Create an unskewed layout without spacing.
    pub fn new(segment_count: usize, width: f32, height: f32) -> Self {
        Self {
            segment_count,
            width,
            height,
            spacing: 0.0,
            angle: 0.0,
            gap_policy: GapPolicy::Hold,
        }
    }

    /// Set the gap between adjacent segments.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the skew angle in degrees.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Set how the overlay crosses gaps.
    pub fn with_gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = gap_policy;
        self
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Drawable width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Drawable height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Gap between adjacent segments.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Skew angle in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Active gap policy.
    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    /// Width of a single segment's bottom edge.
    pub fn unit_width(&self) -> f32 {
        unit_width(self.segment_count, self.width, self.spacing)
    }

    /// Horizontal distance between the bottom and top edges.
    pub fn shear_offset(&self) -> f32 {
        shear_offset(self.height, self.angle)
    }

    /// Coordinates of the segment at `position` (`0..segment_count`).
    pub fn segment(&self, position: usize) -> CoordinateSet {
        segment_coordinates(
            position,
            self.segment_count,
            self.width,
            self.height,
            self.spacing,
            self.angle,
        )
    }

    /// Coordinates of the overlay for `progress` (`0..=segment_count`).
    pub fn progress(&self, progress: f32) -> CoordinateSet {
        match self.gap_policy {
            GapPolicy::Hold => progress_coordinates(
                progress,
                self.segment_count,
                self.width,
                self.height,
                self.spacing,
                self.angle,
            ),
            GapPolicy::Interpolate => {
                let unit = self.unit_width();
                let completed = progress.floor();
                let end = self.segment(self.segment_count.saturating_sub(1)).bottom_right_x;
                let start = step_edge(completed as usize, unit, self.spacing);
                let right = (start + (progress - completed) * (unit + self.spacing)).min(end);
                CoordinateSet::sheared(0.0, right, self.shear_offset())
            }
        }
    }

    /// Coordinates of every segment, left to right.
    pub fn segments(&self) -> impl Iterator<Item = CoordinateSet> + '_ {
        (0..self.segment_count).map(move |position| self.segment(position))
    }
}

/// Bottom-edge width of one segment after reserving the gaps.
///
/// Negative when the spacing does not fit; callers should treat that as a
/// configuration mistake.
pub fn unit_width(segment_count: usize, width: f32, spacing: f32) -> f32 {
    let gaps = segment_count.saturating_sub(1) as f32;
    (width - spacing * gaps) / segment_count as f32
}

/// Horizontal offset of the top edge relative to the bottom edge.
///
/// Positive angles lean the shape to the right.
pub fn shear_offset(height: f32, angle: f32) -> f32 {
    height * angle.to_radians().tan()
}

/// Coordinates of the segment at `position`.
///
/// Requires `position < segment_count`.
pub fn segment_coordinates(
    position: usize,
    segment_count: usize,
    width: f32,
    height: f32,
    spacing: f32,
    angle: f32,
) -> CoordinateSet {
    let unit = unit_width(segment_count, width, spacing);
    let (bottom_left_x, bottom_right_x) = segment_edges(position, unit, spacing);
    CoordinateSet::sheared(bottom_left_x, bottom_right_x, shear_offset(height, angle))
}

fn segment_edges(position: usize, unit: f32, spacing: f32) -> (f32, f32) {
    let left = position as f32 * (unit + spacing);
    (left, left + unit)
}

/// Where the overlay ends after `completed` whole segments.
///
/// Built from the previous segment's right edge so the overlay never ends
/// ahead of a segment it has just finished.
fn step_edge(completed: usize, unit: f32, spacing: f32) -> f32 {
    match completed {
        0 => 0.0,
        _ => segment_edges(completed - 1, unit, spacing).1 + spacing,
    }
}

/// Coordinates of the progress overlay.
///
/// Requires `0 <= progress <= segment_count`. The overlay starts at x = 0 and
/// ends inside segment `floor(progress)`; once every segment is complete it
/// ends exactly on the last segment's right edge.
pub fn progress_coordinates(
    progress: f32,
    segment_count: usize,
    width: f32,
    height: f32,
    spacing: f32,
    angle: f32,
) -> CoordinateSet {
    let completed = progress.floor();
    let bottom_right_x = if completed >= segment_count as f32 {
        segment_coordinates(
            segment_count.saturating_sub(1),
            segment_count,
            width,
            height,
            spacing,
            angle,
        )
        .bottom_right_x
    } else {
        let unit = unit_width(segment_count, width, spacing);
        let fraction = progress - completed;
        step_edge(completed as usize, unit, spacing) + fraction * unit
    };
    CoordinateSet::sheared(0.0, bottom_right_x, shear_offset(height, angle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn sample_layout() -> SegmentLayout {
        SegmentLayout::new(3, 300.0, 16.0).with_spacing(10.0)
    }

    #[test]
    fn middle_segment_of_three() {
        let layout = sample_layout();
        assert!(approx(layout.unit_width(), 93.333));
        let coords = layout.segment(1);
        assert!(approx(coords.bottom_left_x, 103.333));
        assert!(approx(coords.bottom_right_x, 196.667));
    }

    #[test]
    fn adjacent_segments_are_separated_by_spacing() {
        for count in 1..8 {
            let layout = SegmentLayout::new(count, 517.0, 12.0)
                .with_spacing(7.5)
                .with_angle(-20.0);
            for i in 0..count.saturating_sub(1) {
                let left = layout.segment(i);
                let right = layout.segment(i + 1);
                assert!(approx(left.bottom_right_x + 7.5, right.bottom_left_x));
            }
        }
    }

    #[test]
    fn last_segment_ends_at_width() {
        let layout = sample_layout();
        assert!(approx(layout.segment(2).bottom_right_x, 300.0));
    }

    #[test]
    fn zero_angle_has_no_shear() {
        let layout = sample_layout();
        for coords in layout.segments().chain([layout.progress(1.7)]) {
            assert_eq!(coords.top_left_x, coords.bottom_left_x);
            assert_eq!(coords.top_right_x, coords.bottom_right_x);
        }
    }

    #[test]
    fn thirty_degrees_shifts_top_edge() {
        let layout = sample_layout().with_angle(30.0);
        assert!(approx(layout.shear_offset(), 9.2376));
        for coords in layout.segments().chain([layout.progress(2.25)]) {
            assert!(approx(coords.top_left_x, coords.bottom_left_x + 9.2376));
            assert!(approx(coords.top_right_x, coords.bottom_right_x + 9.2376));
        }
    }

    #[test]
    fn negative_angle_leans_left() {
        let layout = sample_layout().with_angle(-45.0);
        let coords = layout.segment(0);
        assert!(approx(coords.top_left_x, -16.0));
    }

    #[test]
    fn zero_progress_collapses() {
        let layout = sample_layout().with_angle(15.0);
        let coords = layout.progress(0.0);
        assert_eq!(coords.bottom_left_x, 0.0);
        assert_eq!(coords.bottom_right_x, 0.0);
        assert!(coords.is_degenerate());
        assert!(coords.is_finite());
    }

    #[test]
    fn full_progress_matches_last_segment_exactly() {
        for count in 1..10 {
            let layout = SegmentLayout::new(count, 333.3, 9.0)
                .with_spacing(3.3)
                .with_angle(12.0);
            let full = layout.progress(count as f32);
            let last = layout.segment(count - 1);
            assert_eq!(full.bottom_right_x, last.bottom_right_x);
            assert_eq!(full.top_right_x, last.top_right_x);
        }
    }

    #[test]
    fn half_way_through_second_segment() {
        let coords = sample_layout().progress(1.5);
        assert!(approx(coords.bottom_right_x, 150.0));
    }

    #[test]
    fn whole_progress_lands_on_next_segment_start() {
        let layout = sample_layout();
        let coords = layout.progress(1.0);
        assert!(approx(coords.bottom_right_x, layout.segment(1).bottom_left_x));
    }

    #[test]
    fn whole_progress_never_ends_before_finished_segment() {
        for count in 2..40 {
            for width in [517.0, 333.3, 1000.0] {
                for spacing in [0.0, 1.1, 3.3, 7.5] {
                    for policy in [GapPolicy::Hold, GapPolicy::Interpolate] {
                        let layout = SegmentLayout::new(count, width, 12.0)
                            .with_spacing(spacing)
                            .with_angle(17.0)
                            .with_gap_policy(policy);
                        for k in 1..count {
                            let overlay = layout.progress(k as f32);
                            let finished = layout.segment(k - 1);
                            assert!(
                                overlay.top_right_x >= finished.top_right_x,
                                "{count} {width} {spacing} {policy:?} at {k}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn progress_is_monotonic() {
        for policy in [GapPolicy::Hold, GapPolicy::Interpolate] {
            let layout = sample_layout().with_angle(25.0).with_gap_policy(policy);
            let mut last = f32::NEG_INFINITY;
            for step in 0..=300 {
                let progress = step as f32 / 100.0;
                let right = layout.progress(progress).bottom_right_x;
                assert!(right >= last, "{policy:?} regressed at {progress}");
                last = right;
            }
        }
    }

    #[test]
    fn interpolate_passes_through_gaps() {
        let layout = sample_layout().with_gap_policy(GapPolicy::Interpolate);
        let pitch = layout.unit_width() + layout.spacing();
        let coords = layout.progress(0.99);
        assert!(approx(coords.bottom_right_x, 0.99 * pitch));
        assert!(coords.bottom_right_x > layout.segment(0).bottom_right_x);
        assert!(approx(layout.progress(3.0).bottom_right_x, 300.0));
    }

    #[test]
    fn policies_agree_on_whole_steps() {
        let hold = sample_layout().with_angle(10.0);
        let interpolate = hold.with_gap_policy(GapPolicy::Interpolate);
        for step in 0..=3 {
            let a = hold.progress(step as f32);
            let b = interpolate.progress(step as f32);
            assert!(approx(a.bottom_right_x, b.bottom_right_x));
        }
    }

    #[test]
    fn oversized_spacing_yields_inverted_shapes() {
        let layout = SegmentLayout::new(4, 30.0, 8.0).with_spacing(20.0);
        assert!(layout.unit_width() < 0.0);
        let coords = layout.segment(2);
        assert!(coords.is_finite());
        assert!(coords.is_degenerate());
    }

    #[test]
    fn zero_width_is_finite() {
        let layout = SegmentLayout::new(5, 0.0, 0.0);
        for coords in layout.segments().chain([layout.progress(2.5)]) {
            assert!(coords.is_finite());
        }
    }

    #[test]
    fn free_functions_match_layout_methods() {
        let layout = sample_layout().with_angle(-33.0);
        assert_eq!(
            segment_coordinates(2, 3, 300.0, 16.0, 10.0, -33.0),
            layout.segment(2)
        );
        assert_eq!(
            progress_coordinates(0.4, 3, 300.0, 16.0, 10.0, -33.0),
            layout.progress(0.4)
        );
    }
}
