use std::time::Instant;

use gpui::{Bounds, Pixels};
use tracing::trace;

use crate::bar::{ProgressUpdate, SegmentBar};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::RenderList;

use super::config::SegmentBarViewConfig;

#[derive(Debug, Clone)]
pub(crate) struct BarFrame {
    pub(crate) render: RenderList,
    pub(crate) update: Option<ProgressUpdate>,
    pub(crate) needs_next_frame: bool,
}

pub(crate) fn build_frame(
    bar: &mut SegmentBar,
    config: &SegmentBarViewConfig,
    bounds: Bounds<Pixels>,
    now: Instant,
) -> BarFrame {
    let mut render = RenderList::new();
    let rect = bar_rect(config, bounds);
    let update = bar.advance(now, rect.width().max(0.0), rect.height().max(0.0));
    let needs_next_frame =
        config.animate && (bar.controller().is_animating() || bar.is_breathing(now));

    bar.build_commands(rect, now, &mut render);
    trace!(
        width = rect.width(),
        height = rect.height(),
        commands = render.commands().len(),
        "built segment bar frame"
    );

    BarFrame {
        render,
        update,
        needs_next_frame,
    }
}

fn bar_rect(config: &SegmentBarViewConfig, bounds: Bounds<Pixels>) -> ScreenRect {
    let full_width = f32::from(bounds.size.width);
    let full_height = f32::from(bounds.size.height).max(0.0);
    let height = config
        .bar_height
        .map_or(full_height, |height| height.clamp(0.0, full_height));
    let origin = ScreenPoint::new(
        f32::from(bounds.origin.x),
        f32::from(bounds.origin.y) + (full_height - height) * 0.5,
    );
    ScreenRect::from_origin_size(origin, full_width, height)
}
