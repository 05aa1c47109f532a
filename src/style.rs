//! Plot colors.

use crate::render::Color;

const PALETTE: [Color; 12] = [
    Color::rgb(1.0, 0.0, 0.0),
    Color::rgb(0.0, 1.0, 0.0),
    Color::rgb(0.0, 0.0, 1.0),
    Color::rgb(1.0, 0.0, 1.0),
    Color::rgb(0.5, 0.5, 0.0),
    Color::rgb(0.5, 0.0, 0.0),
    Color::rgb(0.0, 0.5, 0.0),
    Color::rgb(0.0, 0.0, 0.5),
    Color::rgb(0.5, 0.0, 1.0),
    Color::rgb(0.0, 1.0, 0.5),
    Color::rgb(1.0, 0.0, 0.5),
    Color::rgb(0.0, 0.5, 1.0),
];

/// Visual theme for plotters.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Background fill.
    pub background: Color,
    /// Grid lines.
    pub ticks: Color,
    /// Zero axes.
    pub axis: Color,
    /// Cursor crosshair.
    pub cursor: Color,
    /// Cursor coordinate readout.
    pub readout: Color,
    /// Sequence colors, reused cyclically.
    pub series: Vec<Color>,
}

impl Theme {
    /// The default dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0.0, 0.0, 0.0),
            ticks: Color::rgb(0.1, 0.1, 0.1),
            axis: Color::rgb(0.5, 0.5, 0.5),
            cursor: Color::rgb(0.3, 0.3, 0.3),
            readout: Color::WHITE,
            series: PALETTE.to_vec(),
        }
    }

    /// Color for the sequence at `index`.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return Color::WHITE;
        }
        self.series[index % self.series.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
