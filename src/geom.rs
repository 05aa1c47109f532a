//! Geometric primitives used by the plotting pipeline.
//!
//! Data-space values are `f64`. Pixel-space values are `f32` and follow the
//! display convention of a bottom-left origin with Y growing upward.

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X value in data coordinates.
    pub x: f64,
    /// Y value in data coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in pixels.
    pub x: f32,
    /// Y value in pixels, measured upward from the bottom edge.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The pixel rectangle a plotter draws into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    /// Left edge in pixels.
    pub left: f32,
    /// Bottom edge in pixels.
    pub bottom: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl PixelRect {
    /// Create a rectangle from its bottom-left corner and size.
    pub fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Right edge in pixels.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Top edge in pixels.
    pub fn top(&self) -> f32 {
        self.bottom + self.height
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Check whether a pixel lies inside the rectangle, edges included.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.bottom
            && point.y <= self.top()
    }
}

impl Default for PixelRect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}
