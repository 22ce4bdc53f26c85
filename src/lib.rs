//! gpui_segmentbar draws segmented progress bars with an animated overlay.
//! Segments can be skewed and spaced apart; the overlay and the segments are
//! computed from the same geometry so their edges line up exactly.

#![forbid(unsafe_code)]

pub mod animation;
pub mod bar;
pub mod controller;
pub mod engine;
pub mod error;
pub mod geom;
#[cfg(feature = "gpui")]
pub mod gpui_backend;
pub mod render;
pub mod style;

pub use animation::{BreathEffect, Easing};
pub use bar::{ProgressUpdate, SegmentBar, SegmentBarBuilder, SegmentBarConfig};
pub use controller::{
    Clock, ManualClock, ProgressController, ProgressEvent, ProgressState, SystemClock,
};
pub use engine::{
    GapPolicy, SegmentLayout, progress_coordinates, segment_coordinates, shear_offset, unit_width,
};
pub use error::ConfigError;
pub use geom::{CoordinateSet, ScreenPoint, ScreenRect};
#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiSegmentBarView, SegmentBarHandle, SegmentBarViewConfig};
pub use render::{
    BarFill, Color, RenderCommand, RenderList, build_bar_commands, clip_polygon,
    segment_is_visible,
};
pub use style::{SegmentStyle, Theme};
