//! Geometric primitives shared by the engine and render backends.
//!
//! [`CoordinateSet`] lives in bar-local space: x = 0 is the left edge of the
//! drawable area and the top edge sits at y = 0. Screen-space types carry an
//! absolute origin and are produced by the render step.

/// Corner x-coordinates of one filled quadrilateral.
///
/// The top edge spans `top_left_x..top_right_x` at y = 0 and the bottom edge
/// spans `bottom_left_x..bottom_right_x` at y = height. Both edges have the
/// same width; the top edge is the bottom edge shifted by the shear offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateSet {
    /// Left end of the top edge.
    pub top_left_x: f32,
    /// Right end of the top edge.
    pub top_right_x: f32,
    /// Left end of the bottom edge.
    pub bottom_left_x: f32,
    /// Right end of the bottom edge.
    pub bottom_right_x: f32,
}

impl CoordinateSet {
    /// Create a coordinate set from its four corners.
    pub const fn new(
        top_left_x: f32,
        top_right_x: f32,
        bottom_left_x: f32,
        bottom_right_x: f32,
    ) -> Self {
        Self {
            top_left_x,
            top_right_x,
            bottom_left_x,
            bottom_right_x,
        }
    }

    /// Build a set from a bottom edge and a horizontal shear offset.
    pub fn sheared(bottom_left_x: f32, bottom_right_x: f32, shear_offset: f32) -> Self {
        Self {
            top_left_x: bottom_left_x + shear_offset,
            top_right_x: bottom_right_x + shear_offset,
            bottom_left_x,
            bottom_right_x,
        }
    }

    /// Width of the top edge. Negative for inverted shapes.
    pub fn top_width(&self) -> f32 {
        self.top_right_x - self.top_left_x
    }

    /// Width of the bottom edge. Negative for inverted shapes.
    pub fn bottom_width(&self) -> f32 {
        self.bottom_right_x - self.bottom_left_x
    }

    /// Check whether the shape covers no area.
    ///
    /// Inverted shapes (negative width) count as degenerate.
    pub fn is_degenerate(&self) -> bool {
        self.top_width() <= 0.0 && self.bottom_width() <= 0.0
    }

    /// Check whether every corner is a finite number.
    pub fn is_finite(&self) -> bool {
        self.top_left_x.is_finite()
            && self.top_right_x.is_finite()
            && self.bottom_left_x.is_finite()
            && self.bottom_right_x.is_finite()
    }

    /// Corner points in draw order: top-left, top-right, bottom-right,
    /// bottom-left.
    pub fn polygon(&self, height: f32) -> [ScreenPoint; 4] {
        [
            ScreenPoint::new(self.top_left_x, 0.0),
            ScreenPoint::new(self.top_right_x, 0.0),
            ScreenPoint::new(self.bottom_right_x, height),
            ScreenPoint::new(self.bottom_left_x, height),
        ]
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset the point by another point treated as a vector.
    pub fn offset(self, by: ScreenPoint) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(origin: ScreenPoint, width: f32, height: f32) -> Self {
        Self::new(origin, ScreenPoint::new(origin.x + width, origin.y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether a point lies inside or on the border.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheared_moves_top_edge_only() {
        let coords = CoordinateSet::sheared(10.0, 40.0, 5.0);
        assert_eq!(coords.bottom_left_x, 10.0);
        assert_eq!(coords.bottom_right_x, 40.0);
        assert_eq!(coords.top_left_x, 15.0);
        assert_eq!(coords.top_right_x, 45.0);
        assert_eq!(coords.top_width(), coords.bottom_width());
    }

    #[test]
    fn collapsed_set_is_degenerate_but_finite() {
        let coords = CoordinateSet::sheared(0.0, 0.0, 3.0);
        assert!(coords.is_degenerate());
        assert!(coords.is_finite());
    }

    #[test]
    fn polygon_follows_draw_order() {
        let coords = CoordinateSet::new(2.0, 8.0, 0.0, 6.0);
        let points = coords.polygon(4.0);
        assert_eq!(points[0], ScreenPoint::new(2.0, 0.0));
        assert_eq!(points[1], ScreenPoint::new(8.0, 0.0));
        assert_eq!(points[2], ScreenPoint::new(6.0, 4.0));
        assert_eq!(points[3], ScreenPoint::new(0.0, 4.0));
    }

    #[test]
    fn rect_contains_border() {
        let rect = ScreenRect::from_origin_size(ScreenPoint::new(1.0, 1.0), 10.0, 5.0);
        assert!(rect.contains(ScreenPoint::new(11.0, 6.0)));
        assert!(!rect.contains(ScreenPoint::new(11.5, 6.0)));
        assert!(rect.is_valid());
    }
}
