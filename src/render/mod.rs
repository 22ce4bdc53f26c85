//! Rendering primitives and clipping helpers.
//!
//! These types are backend-agnostic and are used by render backends (such as the
//! GPUI backend) to describe how segment bars should be drawn.

use tracing::trace;

use crate::engine::SegmentLayout;
use crate::geom::{CoordinateSet, ScreenPoint, ScreenRect};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a `0xRRGGBB` value.
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        )
    }

    /// Replace the alpha channel.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque light gray.
    pub const LIGHT_GRAY: Self = Self::new(0.8, 0.8, 0.8, 1.0);
}

/// Fill colors and ordering flag for one bar pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarFill {
    /// Background segment fill.
    pub segment: Color,
    /// Progress overlay fill.
    pub progress: Color,
    /// Draw every background segment, even those under the overlay.
    pub draw_all_segments: bool,
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Fill a closed polygon.
    Polygon {
        /// Polygon vertices in draw order.
        points: Vec<ScreenPoint>,
        /// Fill color.
        color: Color,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

/// Decide whether a background segment needs painting.
///
/// Segments whose top-right corner is at or behind the overlay's top-right
/// corner are covered by the overlay and skipped unless `draw_all` is set.
pub fn segment_is_visible(
    segment: &CoordinateSet,
    progress: &CoordinateSet,
    draw_all: bool,
) -> bool {
    draw_all || segment.top_right_x > progress.top_right_x
}

/// Build the commands for one bar: visible segments first, overlay last.
///
/// `bounds` places the bar on screen; its size should match the layout's
/// width and height. Every polygon is clipped to `bounds`.
pub fn build_bar_commands(
    layout: &SegmentLayout,
    progress: f32,
    bounds: ScreenRect,
    fill: BarFill,
    out: &mut RenderList,
) {
    let overlay = layout.progress(progress);
    let mut scratch = Vec::with_capacity(8);

    out.push(RenderCommand::ClipRect(bounds));
    let mut drawn = 0usize;
    for segment in layout.segments() {
        if !segment_is_visible(&segment, &overlay, fill.draw_all_segments) {
            continue;
        }
        if push_quad(&segment, layout.height(), bounds, fill.segment, &mut scratch, out) {
            drawn += 1;
        }
    }
    push_quad(&overlay, layout.height(), bounds, fill.progress, &mut scratch, out);
    out.push(RenderCommand::ClipEnd);

    trace!(
        progress,
        drawn,
        total = layout.segment_count(),
        "built segment bar commands"
    );
}

fn push_quad(
    coords: &CoordinateSet,
    height: f32,
    bounds: ScreenRect,
    color: Color,
    scratch: &mut Vec<ScreenPoint>,
    out: &mut RenderList,
) -> bool {
    if coords.is_degenerate() || !coords.is_finite() {
        return false;
    }
    let corners = coords.polygon(height).map(|point| point.offset(bounds.min));
    clip_polygon(&corners, bounds, scratch);
    if scratch.len() < 3 {
        return false;
    }
    out.push(RenderCommand::Polygon {
        points: scratch.clone(),
        color,
    });
    true
}

#[derive(Debug, Clone, Copy)]
enum ClipEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl ClipEdge {
    const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    fn inside(self, point: ScreenPoint, rect: ScreenRect) -> bool {
        match self {
            Self::Left => point.x >= rect.min.x,
            Self::Right => point.x <= rect.max.x,
            Self::Top => point.y >= rect.min.y,
            Self::Bottom => point.y <= rect.max.y,
        }
    }

    fn intersect(self, start: ScreenPoint, end: ScreenPoint, rect: ScreenRect) -> ScreenPoint {
        match self {
            Self::Left | Self::Right => {
                let x = if matches!(self, Self::Left) {
                    rect.min.x
                } else {
                    rect.max.x
                };
                let t = (x - start.x) / (end.x - start.x);
                ScreenPoint::new(x, start.y + (end.y - start.y) * t)
            }
            Self::Top | Self::Bottom => {
                let y = if matches!(self, Self::Top) {
                    rect.min.y
                } else {
                    rect.max.y
                };
                let t = (y - start.y) / (end.y - start.y);
                ScreenPoint::new(start.x + (end.x - start.x) * t, y)
            }
        }
    }
}

/// Clip a convex polygon to a rectangle (Sutherland–Hodgman).
///
/// `out` receives the clipped vertices; it is empty when nothing is left.
pub fn clip_polygon(points: &[ScreenPoint], rect: ScreenRect, out: &mut Vec<ScreenPoint>) {
    out.clear();
    out.extend_from_slice(points);
    let mut input = Vec::with_capacity(points.len() + 4);

    for edge in ClipEdge::ALL {
        if out.is_empty() {
            return;
        }
        std::mem::swap(out, &mut input);
        out.clear();

        let mut prev = input[input.len() - 1];
        for &current in &input {
            let current_inside = edge.inside(current, rect);
            let prev_inside = edge.inside(prev, rect);
            if current_inside {
                if !prev_inside {
                    out.push(edge.intersect(prev, current, rect));
                }
                out.push(current);
            } else if prev_inside {
                out.push(edge.intersect(prev, current, rect));
            }
            prev = current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(width: f32, height: f32) -> ScreenRect {
        ScreenRect::from_origin_size(ScreenPoint::new(0.0, 0.0), width, height)
    }

    fn fill(draw_all_segments: bool) -> BarFill {
        BarFill {
            segment: Color::LIGHT_GRAY,
            progress: Color::GREEN,
            draw_all_segments,
        }
    }

    fn polygons(list: &RenderList) -> Vec<(&[ScreenPoint], Color)> {
        list.commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Polygon { points, color } => Some((points.as_slice(), *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn color_from_hex() {
        let color = Color::from_rgb_u32(0x00ff_8000);
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn clip_polygon_inside_is_unchanged() {
        let rect = bounds(10.0, 10.0);
        let points = [
            ScreenPoint::new(2.0, 2.0),
            ScreenPoint::new(8.0, 2.0),
            ScreenPoint::new(8.0, 8.0),
            ScreenPoint::new(2.0, 8.0),
        ];
        let mut out = Vec::new();
        clip_polygon(&points, rect, &mut out);
        assert_eq!(out, points);
    }

    #[test]
    fn clip_polygon_trims_sheared_overhang() {
        let rect = bounds(100.0, 10.0);
        let coords = CoordinateSet::sheared(80.0, 100.0, 10.0);
        let mut out = Vec::new();
        clip_polygon(&coords.polygon(10.0), rect, &mut out);
        assert!(out.len() >= 3);
        assert!(out.iter().all(|point| rect.contains(*point)));
        assert!(out.iter().any(|point| point.x == 100.0 && point.y == 0.0));
    }

    #[test]
    fn clip_polygon_outside_is_empty() {
        let rect = bounds(10.0, 10.0);
        let points = [
            ScreenPoint::new(20.0, 0.0),
            ScreenPoint::new(30.0, 0.0),
            ScreenPoint::new(30.0, 10.0),
            ScreenPoint::new(20.0, 10.0),
        ];
        let mut out = Vec::new();
        clip_polygon(&points, rect, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn covered_segments_are_skipped() {
        let layout = SegmentLayout::new(3, 300.0, 16.0).with_spacing(10.0);
        let mut list = RenderList::new();
        build_bar_commands(&layout, 1.5, bounds(300.0, 16.0), fill(false), &mut list);
        let polys = polygons(&list);
        // segment 0 is under the overlay; segments 1 and 2 stick out ahead of it
        assert_eq!(polys.len(), 3);
        assert_eq!(polys[0].1, Color::LIGHT_GRAY);
        assert_eq!(polys[1].1, Color::LIGHT_GRAY);
        assert_eq!(polys[2].1, Color::GREEN);
        assert_eq!(list.commands().first(), Some(&RenderCommand::ClipRect(bounds(300.0, 16.0))));
        assert_eq!(list.commands().last(), Some(&RenderCommand::ClipEnd));
    }

    #[test]
    fn draw_all_keeps_every_segment() {
        let layout = SegmentLayout::new(3, 300.0, 16.0).with_spacing(10.0);
        let mut list = RenderList::new();
        build_bar_commands(&layout, 3.0, bounds(300.0, 16.0), fill(true), &mut list);
        let polys = polygons(&list);
        assert_eq!(polys.len(), 4);
        assert_eq!(polys[3].1, Color::GREEN);
    }

    #[test]
    fn full_progress_hides_all_segments() {
        let layout = SegmentLayout::new(4, 200.0, 10.0)
            .with_spacing(4.0)
            .with_angle(35.0);
        let mut list = RenderList::new();
        build_bar_commands(&layout, 4.0, bounds(200.0, 10.0), fill(false), &mut list);
        let polys = polygons(&list);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].1, Color::GREEN);
    }

    #[test]
    fn finished_segment_hidden_at_whole_steps_without_spacing() {
        let layout = SegmentLayout::new(7, 517.0, 12.0).with_angle(17.0);
        for k in 1..7 {
            let mut list = RenderList::new();
            build_bar_commands(&layout, k as f32, bounds(517.0, 12.0), fill(false), &mut list);
            let polys = polygons(&list);
            assert_eq!(polys.len(), 7 - k + 1, "at step {k}");
            assert!(!segment_is_visible(
                &layout.segment(k - 1),
                &layout.progress(k as f32),
                false
            ));
        }
    }

    #[test]
    fn visibility_uses_sheared_top_edge() {
        let overlay = CoordinateSet::sheared(0.0, 50.0, 8.0);
        let ahead = CoordinateSet::sheared(40.0, 51.0, 8.0);
        let behind = CoordinateSet::sheared(30.0, 50.0, 8.0);
        assert!(segment_is_visible(&ahead, &overlay, false));
        assert!(!segment_is_visible(&behind, &overlay, false));
        assert!(segment_is_visible(&behind, &overlay, true));
    }

    #[test]
    fn zero_progress_draws_segments_only() {
        let layout = SegmentLayout::new(2, 100.0, 10.0).with_angle(-20.0);
        let mut list = RenderList::new();
        build_bar_commands(&layout, 0.0, bounds(100.0, 10.0), fill(false), &mut list);
        let polys = polygons(&list);
        assert_eq!(polys.len(), 2);
        assert!(polys.iter().all(|(_, color)| *color == Color::LIGHT_GRAY));
    }

    #[test]
    fn polygons_stay_in_offset_bounds() {
        let layout = SegmentLayout::new(5, 250.0, 20.0)
            .with_spacing(6.0)
            .with_angle(60.0);
        let rect = ScreenRect::from_origin_size(ScreenPoint::new(40.0, 12.0), 250.0, 20.0);
        let mut list = RenderList::new();
        build_bar_commands(&layout, 2.3, rect, fill(true), &mut list);
        for (points, _) in polygons(&list) {
            for point in points {
                assert!(point.x >= rect.min.x - 1e-3 && point.x <= rect.max.x + 1e-3);
                assert!(point.y >= rect.min.y - 1e-3 && point.y <= rect.max.y + 1e-3);
            }
        }
    }
}
