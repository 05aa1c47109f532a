//! Data-space intervals and the plotter's viewing window.

use crate::geom::Point;

/// A two-bound data interval.
///
/// Bounds are stored exactly as given. Zoom gestures are allowed to shrink an
/// interval through zero width and invert it; consumers treat an inverted
/// interval as a mirrored axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound (the left or bottom edge of the window).
    pub min: f64,
    /// Upper bound (the right or top edge of the window).
    pub max: f64,
}

impl Range {
    /// Create a range without reordering the bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Signed span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn mid(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range can be projected: finite with non-zero span.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() != 0.0
    }

    /// Translate both bounds by `offset`.
    pub fn shifted(&self, offset: f64) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Scale both bounds away from `center` by `factor`.
    pub fn scaled_about(&self, center: f64, factor: f64) -> Self {
        Self::new(
            factor * (self.min - center) + center,
            factor * (self.max - center) + center,
        )
    }
}

/// The rectangular data-space window a plotter shows.
///
/// The stored intervals describe the window's extent; the view origin is added
/// to both whenever the window is projected or hit-tested. Scrolling moves the
/// origin while zooming rescales the intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    /// Current X interval, before the origin is applied.
    pub x: Range,
    /// Current Y interval, before the origin is applied.
    pub y: Range,
    /// Translation added to both intervals.
    pub origin: Point,
    default_x: Range,
    default_y: Range,
}

impl ViewWindow {
    /// Create a window whose power-on defaults are the given intervals.
    pub fn new(x: Range, y: Range) -> Self {
        Self {
            x,
            y,
            origin: Point::default(),
            default_x: x,
            default_y: y,
        }
    }

    /// Restore the power-on intervals and zero the origin.
    pub fn reset(&mut self) {
        self.x = self.default_x;
        self.y = self.default_y;
        self.origin = Point::default();
    }

    /// Power-on X interval.
    pub fn default_x(&self) -> Range {
        self.default_x
    }

    /// Power-on Y interval.
    pub fn default_y(&self) -> Range {
        self.default_y
    }

    /// X interval with the origin applied.
    pub fn visible_x(&self) -> Range {
        self.x.shifted(self.origin.x)
    }

    /// Y interval with the origin applied.
    pub fn visible_y(&self) -> Range {
        self.y.shifted(self.origin.y)
    }

    /// Anchor used by zoom gestures.
    ///
    /// While tracking, X zooms about the right edge so the newest sample stays
    /// pinned; otherwise both axes zoom about their midpoints.
    pub fn zoom_anchor(&self, tracking: bool) -> Point {
        let x = if tracking { self.x.max } else { self.x.mid() };
        Point::new(x, self.y.mid())
    }
}
