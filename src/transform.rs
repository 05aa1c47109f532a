//! Coordinate transforms between data and screen space.

use crate::geom::{PixelRect, Point, ScreenPoint};
use crate::view::Range;

/// Orthographic mapping between a data rectangle and a pixel rectangle.
///
/// The X interval maps left-to-right and the Y interval bottom-to-top, so an
/// inverted interval produces a mirrored axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    x: Range,
    y: Range,
    screen: PixelRect,
}

impl Transform {
    /// Create a transform, or `None` when either side is degenerate.
    pub fn new(x: Range, y: Range, screen: PixelRect) -> Option<Self> {
        if !screen.is_valid() || !x.is_valid() || !y.is_valid() {
            return None;
        }
        Some(Self { x, y, screen })
    }

    /// Access the projected X interval.
    pub fn x(&self) -> Range {
        self.x
    }

    /// Access the projected Y interval.
    pub fn y(&self) -> Range {
        self.y
    }

    /// Access the pixel rectangle.
    pub fn screen(&self) -> PixelRect {
        self.screen
    }

    /// Map a data point into pixel space.
    pub fn data_to_screen(&self, point: Point) -> ScreenPoint {
        let x_norm = (point.x - self.x.min) / self.x.span();
        let y_norm = (point.y - self.y.min) / self.y.span();
        let sx = self.screen.left as f64 + x_norm * self.screen.width as f64;
        let sy = self.screen.bottom as f64 + y_norm * self.screen.height as f64;
        ScreenPoint::new(sx as f32, sy as f32)
    }

    /// Map a pixel into data space.
    pub fn screen_to_data(&self, point: ScreenPoint) -> Point {
        screen_to_data(self.x, self.y, self.screen, point)
    }
}

/// Inverse projection that tolerates degenerate intervals.
///
/// A zero-width interval maps every pixel onto its bound instead of failing,
/// so pointer readouts keep working while the view is collapsed.
pub(crate) fn screen_to_data(x: Range, y: Range, screen: PixelRect, point: ScreenPoint) -> Point {
    let x_norm = (point.x - screen.left) as f64 / screen.width as f64;
    let y_norm = (point.y - screen.bottom) as f64 / screen.height as f64;
    Point::new(x.min + x.span() * x_norm, y.min + y.span() * y_norm)
}
