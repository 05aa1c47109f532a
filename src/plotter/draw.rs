//! Grid, sequence and overlay drawing.

use crate::datalog::{DataLog, DataSequence};
use crate::geom::{Point, ScreenPoint};
use crate::render::{Projection, Quad, Surface, TextRenderer};

use super::{PlotMode, Plotter};

const TEXT_MARGIN: f32 = 5.0;
const LEGEND_LINE_HEIGHT: f32 = 15.0;

impl Plotter {
    /// Grid lines at every tick, then the zero axes.
    ///
    /// An axis's grid is skipped when it would need a quarter as many lines
    /// as the viewport has pixels along that axis.
    pub(super) fn draw_ticks(&self, surface: &mut dyn Surface) {
        let visible_x = self.window.visible_x();
        let visible_y = self.window.visible_y();
        let [tick_x, tick_y] = self.ticks;

        surface.set_color(self.theme.ticks);
        surface.set_line_width(self.line_thickness);

        if let Some(lines) = tick_lines(
            self.window.x.min,
            self.window.x.max,
            self.window.origin.x,
            tick_x,
            self.viewport.width,
        ) {
            for x in lines {
                surface.line(Point::new(x, visible_y.min), Point::new(x, visible_y.max));
            }
        }
        if let Some(lines) = tick_lines(
            self.window.y.min,
            self.window.y.max,
            self.window.origin.y,
            tick_y,
            self.viewport.height,
        ) {
            for y in lines {
                surface.line(Point::new(visible_x.min, y), Point::new(visible_x.max, y));
            }
        }

        surface.set_color(self.theme.axis);
        surface.line(Point::new(0.0, visible_y.min), Point::new(0.0, visible_y.max));
        surface.line(Point::new(visible_x.min, 0.0), Point::new(visible_x.max, 0.0));
        surface.set_line_width(1.0);
    }

    pub(super) fn draw_time_series(&self, surface: &mut dyn Surface, log: &DataLog) {
        for (index, sequence) in log.sequences().iter().enumerate() {
            if self.visibility.is_visible(index) {
                surface.set_color(self.theme.series_color(index));
                self.draw_sequence(surface, sequence);
            }
        }
    }

    pub(super) fn draw_xy(&self, surface: &mut dyn Surface, log: &DataLog) {
        for pair in 0..log.sequence_count() / 2 {
            if !self.visibility.is_visible(pair) {
                continue;
            }
            let (Some(x), Some(y)) = (log.sequence(2 * pair), log.sequence(2 * pair + 1)) else {
                continue;
            };
            surface.set_color(self.theme.series_color(pair));
            self.draw_sequence_xy(surface, x, y);
        }
    }

    /// One primitive over the `(index, value)` pairs inside the visible X window.
    pub(super) fn draw_sequence(&self, surface: &mut dyn Surface, sequence: &DataSequence) {
        let vertices: Vec<Point> = sequence
            .visible_indices(self.window.visible_x())
            .filter_map(|index| sequence.get(index).map(|value| Point::new(index as f64, value)))
            .collect();
        surface.set_line_width(self.line_thickness);
        surface.vertices(self.draw_mode.primitive(), &vertices);
        surface.set_line_width(1.0);
    }

    /// One primitive over `(x[n], y[n])` for every index both sequences hold.
    pub(super) fn draw_sequence_xy(
        &self,
        surface: &mut dyn Surface,
        x: &DataSequence,
        y: &DataSequence,
    ) {
        let begin = x.index_begin().max(y.index_begin());
        let end = x.index_end().min(y.index_end());
        let vertices: Vec<Point> = (begin..end)
            .filter_map(|index| Some(Point::new(x.get(index)?, y.get(index)?)))
            .collect();
        surface.set_line_width(self.line_thickness);
        surface.vertices(self.draw_mode.primitive(), &vertices);
        surface.set_line_width(1.0);
    }

    /// Stacked-area chart.
    ///
    /// Sequences are stacked from the highest index down; each sample becomes
    /// a unit-wide quad from the running total below it to the new total.
    pub(super) fn draw_sequence_histogram(&mut self, surface: &mut dyn Surface, log: &DataLog) {
        let samples = log.sample_count();
        let first_retained = samples.saturating_sub(log.buffer_size());
        let mut totals = std::mem::take(&mut self.histogram_scratch);
        totals.clear();
        totals.resize(samples.min(log.buffer_size()), 0.0);

        let visible_x = self.window.visible_x();
        for (index, sequence) in log.sequences().iter().enumerate().rev() {
            if !self.visibility.is_visible(index) {
                continue;
            }
            let mut quads = Vec::new();
            for sample in sequence.visible_indices(visible_x) {
                let Some(value) = sequence.get(sample) else {
                    continue;
                };
                let Some(total) = sample
                    .checked_sub(first_retained)
                    .and_then(|slot| totals.get_mut(slot))
                else {
                    continue;
                };
                let before = *total;
                *total += value;
                let x = sample as f64;
                quads.push(Quad::new(
                    Point::new(x - 0.5, before),
                    Point::new(x + 0.5, *total),
                ));
            }
            surface.set_color(self.theme.series_color(index));
            surface.quads(&quads);
        }

        self.histogram_scratch = totals;
    }

    /// Crosshair at the cursor: both lines in XY mode, the sample column otherwise.
    pub(super) fn draw_cursor(&self, surface: &mut dyn Surface) {
        let visible_x = self.window.visible_x();
        let visible_y = self.window.visible_y();
        surface.set_color(self.theme.cursor);
        if self.plot_mode == PlotMode::Xy {
            surface.line(
                Point::new(self.cursor.x, visible_y.min),
                Point::new(self.cursor.x, visible_y.max),
            );
            surface.line(
                Point::new(visible_x.min, self.cursor.y),
                Point::new(visible_x.max, self.cursor.y),
            );
        } else {
            let column = self.cursor.x.trunc();
            surface.line(
                Point::new(column, visible_y.min),
                Point::new(column, visible_y.max),
            );
        }
    }

    /// Coordinate readout along the bottom-left edge.
    ///
    /// XY mode shows `(x,y)`. Other modes show the sample index under the
    /// cursor followed by each visible sequence's value there.
    pub(super) fn draw_readout<T>(&self, surface: &mut dyn Surface, text: &mut T, log: &DataLog)
    where
        T: TextRenderer + ?Sized,
    {
        surface.set_projection(Projection::Pixel);
        let v = self.viewport;
        let mut position = ScreenPoint::new(v.left + TEXT_MARGIN, v.bottom + TEXT_MARGIN);

        if self.plot_mode == PlotMode::Xy {
            let label = format!(
                "({},{})",
                format_value(self.cursor.x),
                format_value(self.cursor.y)
            );
            text.draw_text(position, &label, self.theme.readout);
            return;
        }

        let column = self.cursor.x.trunc();
        let label = format!("x={column} ");
        text.draw_text(position, &label, self.theme.readout);
        position.x += text.text_width(&label);

        let Some(sample) = sample_index(column) else {
            return;
        };
        for (index, sequence) in log.sequences().iter().enumerate() {
            if !self.visibility.is_visible(index) {
                continue;
            }
            let Some(value) = sequence.get(sample) else {
                continue;
            };
            let label = format!(" {}", format_value(value));
            text.draw_text(position, &label, self.theme.series_color(index));
            position.x += text.text_width(&label);
        }
    }

    /// Sequence labels stacked down from the top-left corner.
    pub(super) fn draw_legend<T>(&self, surface: &mut dyn Surface, text: &mut T, log: &DataLog)
    where
        T: TextRenderer + ?Sized,
    {
        if log.labels().is_empty() {
            return;
        }
        surface.set_projection(Projection::Pixel);
        let v = self.viewport;
        let mut position = ScreenPoint::new(v.left + TEXT_MARGIN, v.top() - LEGEND_LINE_HEIGHT);
        for (index, label) in log.labels().iter().enumerate() {
            text.draw_text(position, label, self.theme.series_color(index));
            position.y -= LEGEND_LINE_HEIGHT;
        }
    }
}

/// Data-space positions of the grid lines along one axis, or `None` when the
/// grid would be too dense for `pixels` or the spacing is unusable.
fn tick_lines(min: f64, max: f64, origin: f64, spacing: f64, pixels: f32) -> Option<Vec<f64>> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return None;
    }
    let first = (min / spacing).ceil() as i64;
    let last = (max / spacing).ceil() as i64;
    let shift = (origin / spacing).ceil() as i64;
    let count = last.saturating_sub(first);
    if count >= (pixels as i64) / 4 {
        return None;
    }
    Some(
        (first..last)
            .map(|tick| tick.saturating_add(shift) as f64 * spacing)
            .collect(),
    )
}

fn sample_index(column: f64) -> Option<usize> {
    if column.is_finite() && column >= 0.0 {
        Some(column as usize)
    } else {
        None
    }
}

/// Up to six significant digits, without trailing zeros.
fn format_value(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let magnitude = value.abs().log10().floor() as i32;
    if !(-5..6).contains(&magnitude) {
        return format!("{value:e}");
    }
    let decimals = (5 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
