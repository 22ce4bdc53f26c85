use gpui::{Bounds, ContentMask, PathBuilder, Pixels, Window, point, px};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, RenderCommand};

use super::frame::BarFrame;

pub(crate) fn paint_frame(frame: &BarFrame, window: &mut Window) {
    let mut clip_stack: Vec<ContentMask<Pixels>> = Vec::new();
    for command in frame.render.commands() {
        match command {
            RenderCommand::ClipRect(rect) => {
                clip_stack.push(ContentMask {
                    bounds: to_bounds(*rect),
                });
            }
            RenderCommand::ClipEnd => {
                clip_stack.pop();
            }
            RenderCommand::Polygon { points, color } => {
                with_clip(window, &clip_stack, |window| {
                    paint_polygon(window, points, *color);
                });
            }
        }
    }
}

fn paint_polygon(window: &mut Window, points: &[ScreenPoint], color: Color) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    if rest.len() < 2 || color.a <= 0.0 {
        return;
    }
    let mut builder = PathBuilder::fill();
    builder.move_to(point(px(first.x), px(first.y)));
    for pt in rest {
        builder.line_to(point(px(pt.x), px(pt.y)));
    }
    builder.close();
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(color));
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}

fn with_clip(window: &mut Window, stack: &[ContentMask<Pixels>], f: impl FnOnce(&mut Window)) {
    if let Some(mask) = stack.last() {
        window.with_content_mask(Some(mask.clone()), f);
    } else {
        f(window);
    }
}
