//! GPUI integration for gpui_segmentbar.
//!
//! This module provides a GPUI view that renders a
//! [`SegmentBar`](crate::bar::SegmentBar), advancing its progress animation on
//! every frame and painting the clipped segment polygons.

mod config;
mod frame;
mod paint;
mod view;

pub use config::SegmentBarViewConfig;
pub use view::{GpuiSegmentBarView, SegmentBarHandle};
