use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{PixelRect, ScreenPoint};
use crate::render::{Color, LineSegment, LineStyle, RenderCommand, ScreenQuad, TextCommand};

use super::frame::PlotterFrame;

/// Maps the frame's y-up local pixels onto GPUI's y-down window pixels.
#[derive(Debug, Clone, Copy)]
struct Flip {
    left: f32,
    bottom: f32,
}

impl Flip {
    fn new(bounds: Bounds<Pixels>) -> Self {
        Self {
            left: f32::from(bounds.origin.x),
            bottom: f32::from(bounds.origin.y + bounds.size.height),
        }
    }

    fn point(&self, x: f32, y: f32) -> gpui::Point<Pixels> {
        point(px(self.left + x), px(self.bottom - y))
    }

    fn rect(&self, left: f32, bottom: f32, right: f32, top: f32) -> Bounds<Pixels> {
        Bounds::from_corners(self.point(left, top), self.point(right, bottom))
    }
}

pub(crate) fn paint_frame(frame: &PlotterFrame, window: &mut Window, cx: &mut App) {
    let flip = Flip::new(frame.bounds);
    let mask = ContentMask {
        bounds: frame.bounds,
    };
    window.with_content_mask(Some(mask), |window| {
        for command in frame.render.commands() {
            match command {
                RenderCommand::Clear { rect, color } => paint_fill(window, &flip, *rect, *color),
                RenderCommand::LineSegments { segments, style } => {
                    paint_lines(window, &flip, segments, *style);
                }
                RenderCommand::Points {
                    points,
                    color,
                    size,
                } => paint_points(window, &flip, points, *color, *size),
                RenderCommand::Quads { quads, color } => {
                    paint_quads(window, &flip, quads, *color);
                }
            }
        }
        for text in &frame.text {
            paint_text(window, cx, &flip, text);
        }
    });
}

fn paint_fill(window: &mut Window, flip: &Flip, rect: PixelRect, color: Color) {
    let bounds = flip.rect(rect.left, rect.bottom, rect.right(), rect.top());
    window.paint_quad(filled(bounds, color));
}

fn paint_lines(window: &mut Window, flip: &Flip, segments: &[LineSegment], style: LineStyle) {
    if segments.is_empty() {
        return;
    }
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    for segment in segments {
        builder.move_to(flip.point(segment.start.x, segment.start.y));
        builder.line_to(flip.point(segment.end.x, segment.end.y));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_points(window: &mut Window, flip: &Flip, points: &[ScreenPoint], color: Color, size: f32) {
    let half = size.max(2.0) * 0.5;
    for pt in points {
        let bounds = flip.rect(pt.x - half, pt.y - half, pt.x + half, pt.y + half);
        window.paint_quad(filled(bounds, color));
    }
}

fn paint_quads(window: &mut Window, flip: &Flip, quads: &[ScreenQuad], color: Color) {
    for q in quads {
        let bounds = flip.rect(q.min.x, q.min.y, q.max.x, q.max.y);
        window.paint_quad(filled(bounds, color));
    }
}

fn paint_text(window: &mut Window, cx: &mut App, flip: &Flip, text: &TextCommand) {
    if text.text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(text.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped =
        window
            .text_system()
            .shape_line(text.text.clone().into(), px(text.size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let baseline = flip.point(text.position.x, text.position.y);
    let origin = point(baseline.x, baseline.y - shaped.ascent);
    let _ = shaped.paint(origin, line_height, window, cx);
}

fn filled(bounds: Bounds<Pixels>, color: Color) -> gpui::PaintQuad {
    quad(
        bounds,
        Corners::all(px(0.0)),
        to_rgba(color),
        Edges::all(px(0.0)),
        to_rgba(color),
        BorderStyle::default(),
    )
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
