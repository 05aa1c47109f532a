//! Drawing interfaces and recording surfaces.
//!
//! A [`Plotter`](crate::plotter::Plotter) draws through the [`Surface`] trait
//! (viewport, projection and primitive submission) and, when available, the
//! [`TextRenderer`] trait. [`RenderList`] and [`TextList`] implement both by
//! recording pixel-space commands, which render backends (such as the GPUI
//! backend) replay.

mod clip;

use crate::geom::{PixelRect, Point, ScreenPoint};
use crate::transform::Transform;
use crate::view::Range;

use clip::{clip_rect, clip_segment};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
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

    /// Create an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

/// How a vertex list is assembled into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Each vertex is a point.
    Points,
    /// Each pair of vertices is a separate segment.
    Lines,
    /// Consecutive vertices are joined.
    LineStrip,
    /// Like a strip, closed back to the first vertex.
    LineLoop,
}

/// Coordinate system used for subsequent geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Data-space rectangle mapped onto the viewport.
    Orthographic {
        /// Horizontal data interval.
        x: Range,
        /// Vertical data interval.
        y: Range,
    },
    /// Vertices are pixel coordinates.
    Pixel,
}

/// A filled axis-aligned rectangle in the current projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// One corner.
    pub min: Point,
    /// The opposite corner.
    pub max: Point,
}

impl Quad {
    /// Create a quad from opposite corners.
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }
}

/// Display and drawing-primitive services.
pub trait Surface {
    /// Pixel rectangle currently being drawn into.
    fn viewport(&self) -> PixelRect;

    /// Fill the viewport with a color.
    fn clear(&mut self, color: Color);

    /// Select the coordinate system for subsequent geometry.
    fn set_projection(&mut self, projection: Projection);

    /// Set the color of subsequent geometry.
    fn set_color(&mut self, color: Color);

    /// Set the width of subsequent lines, in pixels.
    fn set_line_width(&mut self, width: f32);

    /// Draw one line segment.
    fn line(&mut self, start: Point, end: Point) {
        self.vertices(Primitive::Lines, &[start, end]);
    }

    /// Draw a vertex list.
    fn vertices(&mut self, primitive: Primitive, vertices: &[Point]);

    /// Draw filled rectangles.
    fn quads(&mut self, quads: &[Quad]);
}

/// Bitmap text services.
///
/// Positions are pixel coordinates of the text baseline's left end.
pub trait TextRenderer {
    /// Width of `text` in pixels.
    fn text_width(&self, text: &str) -> f32;

    /// Draw a string.
    fn draw_text(&mut self, position: ScreenPoint, text: &str, color: Color);
}

/// Measures text extents for a font size.
pub trait TextMeasurer {
    /// Returns `(width, height)` in pixels.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Measurer that assumes every glyph has the same advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance per character as a fraction of the font size.
    pub advance: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        (text.chars().count() as f32 * size * self.advance, size)
    }
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            width: 1.0,
        }
    }
}

/// A line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// A filled rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenQuad {
    /// Bottom-left corner.
    pub min: ScreenPoint,
    /// Top-right corner.
    pub max: ScreenPoint,
}

/// Recorded drawing command, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Fill the viewport.
    Clear {
        /// Area to fill.
        rect: PixelRect,
        /// Fill color.
        color: Color,
    },
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw square point markers.
    Points {
        /// Marker centres.
        points: Vec<ScreenPoint>,
        /// Marker color.
        color: Color,
        /// Marker size in pixels.
        size: f32,
    },
    /// Draw filled rectangles.
    Quads {
        /// Rectangles to fill.
        quads: Vec<ScreenQuad>,
        /// Fill color.
        color: Color,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mapping {
    Data(Option<Transform>),
    Pixel,
}

/// A [`Surface`] that records clipped pixel-space commands.
///
/// Geometry submitted under a degenerate orthographic projection is dropped.
#[derive(Debug, Clone)]
pub struct RenderList {
    viewport: PixelRect,
    mapping: Mapping,
    color: Color,
    line_width: f32,
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty list drawing into `viewport`.
    pub fn new(viewport: PixelRect) -> Self {
        Self {
            viewport,
            mapping: Mapping::Pixel,
            color: Color::WHITE,
            line_width: 1.0,
            commands: Vec::new(),
        }
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    fn map(&self, point: Point) -> Option<ScreenPoint> {
        match self.mapping {
            Mapping::Data(Some(transform)) => Some(transform.data_to_screen(point)),
            Mapping::Data(None) => None,
            Mapping::Pixel => Some(ScreenPoint::new(point.x as f32, point.y as f32)),
        }
    }

    fn push_segments(&mut self, pairs: impl Iterator<Item = (Point, Point)>) {
        let mut segments = Vec::new();
        for (start, end) in pairs {
            let (Some(start), Some(end)) = (self.map(start), self.map(end)) else {
                continue;
            };
            if let Some((start, end)) = clip_segment(start, end, self.viewport) {
                segments.push(LineSegment::new(start, end));
            }
        }
        if !segments.is_empty() {
            self.push(RenderCommand::LineSegments {
                segments,
                style: LineStyle {
                    color: self.color,
                    width: self.line_width,
                },
            });
        }
    }
}

impl Surface for RenderList {
    fn viewport(&self) -> PixelRect {
        self.viewport
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.push(RenderCommand::Clear {
            rect: self.viewport,
            color,
        });
    }

    fn set_projection(&mut self, projection: Projection) {
        self.mapping = match projection {
            Projection::Orthographic { x, y } => Mapping::Data(Transform::new(x, y, self.viewport)),
            Projection::Pixel => Mapping::Pixel,
        };
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn vertices(&mut self, primitive: Primitive, vertices: &[Point]) {
        match primitive {
            Primitive::Points => {
                let points: Vec<ScreenPoint> = vertices
                    .iter()
                    .filter_map(|point| self.map(*point))
                    .filter(|point| self.viewport.contains(*point))
                    .collect();
                if !points.is_empty() {
                    self.push(RenderCommand::Points {
                        points,
                        color: self.color,
                        size: self.line_width.max(1.0) * 2.0,
                    });
                }
            }
            Primitive::Lines => {
                self.push_segments(vertices.chunks_exact(2).map(|pair| (pair[0], pair[1])));
            }
            Primitive::LineStrip => {
                self.push_segments(vertices.windows(2).map(|pair| (pair[0], pair[1])));
            }
            Primitive::LineLoop => {
                let closing = match vertices {
                    [first, .., last] => Some((*last, *first)),
                    _ => None,
                };
                self.push_segments(
                    vertices
                        .windows(2)
                        .map(|pair| (pair[0], pair[1]))
                        .chain(closing),
                );
            }
        }
    }

    fn quads(&mut self, quads: &[Quad]) {
        let mut out = Vec::with_capacity(quads.len());
        for quad in quads {
            let (Some(a), Some(b)) = (self.map(quad.min), self.map(quad.max)) else {
                continue;
            };
            if let Some(clipped) = clip_rect(a, b, self.viewport) {
                out.push(clipped);
            }
        }
        if !out.is_empty() {
            self.push(RenderCommand::Quads {
                quads: out,
                color: self.color,
            });
        }
    }
}

/// A string placed in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    /// Baseline start.
    pub position: ScreenPoint,
    /// Text content.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

/// A [`TextRenderer`] that records strings for later painting.
#[derive(Debug, Clone)]
pub struct TextList<M> {
    measurer: M,
    size: f32,
    commands: Vec<TextCommand>,
}

impl<M: TextMeasurer> TextList<M> {
    /// Create an empty list measuring with `measurer` at `size` pixels.
    pub fn new(measurer: M, size: f32) -> Self {
        Self {
            measurer,
            size,
            commands: Vec::new(),
        }
    }

    /// Access the recorded strings.
    pub fn commands(&self) -> &[TextCommand] {
        &self.commands
    }

    /// Take the recorded strings, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<TextCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl<M: TextMeasurer> TextRenderer for TextList<M> {
    fn text_width(&self, text: &str) -> f32 {
        self.measurer.measure(text, self.size).0
    }

    fn draw_text(&mut self, position: ScreenPoint, text: &str, color: Color) {
        if text.is_empty() {
            return;
        }
        self.commands.push(TextCommand {
            position,
            text: text.to_string(),
            color,
            size: self.size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_list() -> RenderList {
        let mut list = RenderList::new(PixelRect::new(0.0, 0.0, 100.0, 100.0));
        list.set_projection(Projection::Orthographic {
            x: Range::new(0.0, 10.0),
            y: Range::new(0.0, 10.0),
        });
        list
    }

    #[test]
    fn line_strip_becomes_segments() {
        let mut list = data_list();
        let vertices = [Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 1.0)];
        list.vertices(Primitive::LineStrip, &vertices);
        match &list.commands()[0] {
            RenderCommand::LineSegments { segments, .. } => {
                assert_eq!(segments.len(), 2);
                assert_eq!(segments[0].start, ScreenPoint::new(10.0, 10.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn line_loop_closes() {
        let mut list = data_list();
        let vertices = [Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 1.0)];
        list.vertices(Primitive::LineLoop, &vertices);
        let RenderCommand::LineSegments { segments, .. } = &list.commands()[0] else {
            panic!("expected segments");
        };
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn points_outside_viewport_are_dropped() {
        let mut list = data_list();
        list.vertices(Primitive::Points, &[Point::new(5.0, 5.0), Point::new(50.0, 5.0)]);
        let RenderCommand::Points { points, .. } = &list.commands()[0] else {
            panic!("expected points");
        };
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn degenerate_projection_drops_geometry() {
        let mut list = RenderList::new(PixelRect::new(0.0, 0.0, 100.0, 100.0));
        list.set_projection(Projection::Orthographic {
            x: Range::new(1.0, 1.0),
            y: Range::new(0.0, 1.0),
        });
        list.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert!(list.commands().is_empty());
    }

    #[test]
    fn quads_are_clipped() {
        let mut list = data_list();
        list.quads(&[Quad::new(Point::new(8.0, -5.0), Point::new(20.0, 5.0))]);
        let RenderCommand::Quads { quads, .. } = &list.commands()[0] else {
            panic!("expected quads");
        };
        assert_eq!(quads[0].min, ScreenPoint::new(80.0, 0.0));
        assert_eq!(quads[0].max, ScreenPoint::new(100.0, 50.0));
    }

    #[test]
    fn text_list_measures_and_records() {
        let mut text = TextList::new(MonospaceMeasurer { advance: 0.5 }, 10.0);
        assert_eq!(text.text_width("abcd"), 20.0);
        text.draw_text(ScreenPoint::new(1.0, 2.0), "hi", Color::WHITE);
        text.draw_text(ScreenPoint::new(1.0, 2.0), "", Color::WHITE);
        assert_eq!(text.commands().len(), 1);
        assert_eq!(text.take_commands()[0].text, "hi");
        assert!(text.commands().is_empty());
    }
}
