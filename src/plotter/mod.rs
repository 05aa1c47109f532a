//! The plotter widget: view state, input handling and sequence drawing.
//!
//! A [`Plotter`] owns a data-space viewing window over a shared
//! [`DataLog`](crate::datalog::DataLog). Input handlers mutate the window;
//! [`Plotter::render`] projects it onto a [`Surface`] and draws grid, data,
//! cursor readout and legend, in that order.

mod draw;
mod handlers;

use std::path::PathBuf;

use crate::config::PlotterConfig;
use crate::datalog::LogHandle;
use crate::error::PlotError;
use crate::geom::{PixelRect, Point, ScreenPoint};
use crate::input::ButtonState;
use crate::render::{Primitive, Projection, Surface, TextRenderer};
use crate::style::Theme;
use crate::transform::screen_to_data;
use crate::view::{Range, ViewWindow};
use crate::visibility::SequenceVisibility;

/// How sequences map to drawn geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlotMode {
    /// Each sequence against its sample index.
    #[default]
    TimeSeries,
    /// Sequence pairs `(2n, 2n + 1)` plotted as X against Y.
    Xy,
    /// Sequences stacked on top of each other as filled areas.
    StackedHistogram,
}

impl PlotMode {
    /// Look up a mode by its index.
    pub fn from_index(index: u32) -> Result<Self, PlotError> {
        match index {
            0 => Ok(Self::TimeSeries),
            1 => Ok(Self::Xy),
            2 => Ok(Self::StackedHistogram),
            other => Err(PlotError::UnknownPlotMode(other)),
        }
    }

    /// The mode after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::TimeSeries => Self::Xy,
            Self::Xy => Self::StackedHistogram,
            Self::StackedHistogram => Self::TimeSeries,
        }
    }
}

impl TryFrom<u32> for PlotMode {
    type Error = PlotError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

/// Primitive style applied to every sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// Connected line through consecutive samples.
    #[default]
    LineStrip,
    /// One point per sample.
    Points,
    /// Disjoint segments between sample pairs.
    Lines,
}

impl DrawMode {
    /// The mode after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::LineStrip => Self::Points,
            Self::Points => Self::Lines,
            Self::Lines => Self::LineStrip,
        }
    }

    /// Primitive used to submit sequence vertices.
    pub fn primitive(self) -> Primitive {
        match self {
            Self::LineStrip => Primitive::LineStrip,
            Self::Points => Primitive::Points,
            Self::Lines => Primitive::Lines,
        }
    }
}

/// Interactive plot over a shared data log.
#[derive(Debug, Clone)]
pub struct Plotter {
    log: LogHandle,
    window: ViewWindow,
    ticks: [f64; 2],
    line_thickness: f32,
    plot_mode: PlotMode,
    draw_mode: DrawMode,
    track_front: bool,
    visibility: SequenceVisibility,
    viewport: PixelRect,
    mouse_state: ButtonState,
    last_mouse: ScreenPoint,
    cursor: Point,
    theme: Theme,
    save_path: PathBuf,
    histogram_scratch: Vec<f64>,
}

impl Plotter {
    /// Create a plotter with the default configuration.
    pub fn new(log: LogHandle) -> Self {
        Self::with_config(log, PlotterConfig::default())
    }

    /// Create a plotter from a configuration.
    pub fn with_config(log: LogHandle, config: PlotterConfig) -> Self {
        let window = ViewWindow::new(
            Range::new(config.x[0], config.x[1]),
            Range::new(config.y[0], config.y[1]),
        );
        Self {
            log,
            window,
            ticks: config.ticks,
            line_thickness: config.line_thickness,
            plot_mode: PlotMode::default(),
            draw_mode: DrawMode::default(),
            track_front: config.track_front,
            visibility: SequenceVisibility::new(config.visibility_capacity),
            viewport: PixelRect::default(),
            mouse_state: ButtonState::NONE,
            last_mouse: ScreenPoint::default(),
            cursor: Point::default(),
            theme: Theme::default(),
            save_path: config.save_path,
            histogram_scratch: Vec::new(),
        }
    }

    /// Replace the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Access the shared log.
    pub fn log(&self) -> &LogHandle {
        &self.log
    }

    /// Access the theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Draw one frame.
    ///
    /// `text` is optional; without it the coordinate readout and legend are
    /// skipped while all geometry is still drawn.
    pub fn render(&mut self, surface: &mut dyn Surface, mut text: Option<&mut dyn TextRenderer>) {
        self.viewport = surface.viewport();
        let log = self.log.clone();
        log.read(|log| {
            if self.track_front {
                self.window.origin.x = log.sample_count() as f64 - self.window.x.max;
            }
            tracing::trace!(mode = ?self.plot_mode, origin_x = self.window.origin.x, "render");

            surface.clear(self.theme.background);
            surface.set_projection(self.projection());
            self.draw_ticks(surface);

            if log.sequence_count() > 0 {
                match self.plot_mode {
                    PlotMode::TimeSeries => self.draw_time_series(surface, log),
                    PlotMode::Xy => self.draw_xy(surface, log),
                    PlotMode::StackedHistogram => self.draw_sequence_histogram(surface, log),
                }
            }

            if self.mouse_state.contains(ButtonState::LEFT) {
                self.draw_cursor(surface);
                if let Some(text) = text.as_deref_mut() {
                    self.draw_readout(surface, text, log);
                }
            }
            if let Some(text) = text {
                self.draw_legend(surface, text, log);
            }
        });
    }

    /// Restore the power-on window, re-enable tracking and show every sequence.
    pub fn reset_view(&mut self) {
        self.track_front = true;
        self.window.reset();
        self.visibility.reset();
    }

    /// Overwrite the view origin.
    pub fn set_view_origin(&mut self, x: f64, y: f64) {
        self.window.origin = Point::new(x, y);
    }

    /// Switch plot mode and tracking together.
    pub fn set_mode(&mut self, mode: PlotMode, track: bool) {
        self.plot_mode = mode;
        self.track_front = track;
    }

    /// Set the width of sequence and grid lines.
    pub fn set_line_thickness(&mut self, thickness: f32) {
        self.line_thickness = thickness;
    }

    /// Set the pixel viewport used for hit testing until the next render.
    pub fn set_viewport(&mut self, viewport: PixelRect) {
        self.viewport = viewport;
    }

    /// Enable or disable following the newest sample.
    pub fn set_tracking(&mut self, track: bool) {
        self.track_front = track;
    }

    /// Inverse-project a pixel into data space and cache it as the cursor.
    ///
    /// Without a usable viewport the previous cursor is kept.
    pub fn screen_to_plot(&mut self, x: f32, y: f32) -> Point {
        if !self.viewport.is_valid() {
            return self.cursor;
        }
        self.cursor = screen_to_data(
            self.window.visible_x(),
            self.window.visible_y(),
            self.viewport,
            ScreenPoint::new(x, y),
        );
        self.cursor
    }

    /// Project a data point onto the current viewport.
    pub fn plot_to_screen(&self, point: Point) -> ScreenPoint {
        let x = self.window.visible_x();
        let y = self.window.visible_y();
        let v = self.viewport;
        let sx = v.left as f64 + (point.x - x.min) / x.span() * v.width as f64;
        let sy = v.bottom as f64 + (point.y - y.min) / y.span() * v.height as f64;
        ScreenPoint::new(sx as f32, sy as f32)
    }

    /// Current X interval, without the view origin.
    pub fn x_interval(&self) -> Range {
        self.window.x
    }

    /// Current Y interval, without the view origin.
    pub fn y_interval(&self) -> Range {
        self.window.y
    }

    /// Replace the X interval.
    pub fn set_x_interval(&mut self, range: Range) {
        self.window.x = range;
    }

    /// Replace the Y interval.
    pub fn set_y_interval(&mut self, range: Range) {
        self.window.y = range;
    }

    /// Current view origin.
    pub fn view_origin(&self) -> Point {
        self.window.origin
    }

    /// Access the whole viewing window.
    pub fn window(&self) -> &ViewWindow {
        &self.window
    }

    /// Active plot mode.
    pub fn plot_mode(&self) -> PlotMode {
        self.plot_mode
    }

    /// Active draw mode.
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// Whether the window follows the newest sample.
    pub fn is_tracking(&self) -> bool {
        self.track_front
    }

    /// Access the per-sequence visibility.
    pub fn visibility(&self) -> &SequenceVisibility {
        &self.visibility
    }

    /// Access the per-sequence visibility mutably.
    pub fn visibility_mut(&mut self) -> &mut SequenceVisibility {
        &mut self.visibility
    }

    /// Pointer position in data space, as of the last button event.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Held buttons and modifiers, as of the last pointer event.
    pub fn mouse_state(&self) -> ButtonState {
        self.mouse_state
    }

    /// Pixel viewport of the last frame.
    pub fn viewport(&self) -> PixelRect {
        self.viewport
    }

    fn projection(&self) -> Projection {
        Projection::Orthographic {
            x: self.window.visible_x(),
            y: self.window.visible_y(),
        }
    }
}

#[cfg(test)]
mod tests;
