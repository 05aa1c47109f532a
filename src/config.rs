//! Plotter configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PlotError;
use crate::visibility::DEFAULT_VISIBILITY_CAPACITY;

/// Construction-time settings for a [`Plotter`](crate::plotter::Plotter).
///
/// Missing fields fall back to their defaults when deserializing, so a
/// configuration file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    /// Power-on X interval `[left, right]`.
    pub x: [f64; 2],
    /// Power-on Y interval `[bottom, top]`.
    pub y: [f64; 2],
    /// Grid spacing along X and Y, in data units.
    pub ticks: [f64; 2],
    /// Width of sequence and grid lines, in pixels.
    pub line_thickness: f32,
    /// Number of sequences whose visibility can be toggled.
    pub visibility_capacity: usize,
    /// Destination of the save action.
    pub save_path: PathBuf,
    /// Follow the newest sample on start.
    pub track_front: bool,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            x: [0.0, 600.0],
            y: [-1.0, 1.0],
            ticks: [30.0, 0.5],
            line_thickness: 1.5,
            visibility_capacity: DEFAULT_VISIBILITY_CAPACITY,
            save_path: PathBuf::from("./log.csv"),
            track_front: true,
        }
    }
}

impl PlotterConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, PlotError> {
        Ok(toml::from_str(source)?)
    }

    /// Set the power-on X interval.
    pub fn with_x(mut self, left: f64, right: f64) -> Self {
        self.x = [left, right];
        self
    }

    /// Set the power-on Y interval.
    pub fn with_y(mut self, bottom: f64, top: f64) -> Self {
        self.y = [bottom, top];
        self
    }

    /// Set the grid spacing.
    pub fn with_ticks(mut self, x: f64, y: f64) -> Self {
        self.ticks = [x, y];
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PlotterConfig::from_toml_str("y = [-5.0, 5.0]\nline_thickness = 2.0\n")
            .expect("valid config");
        assert_eq!(config.y, [-5.0, 5.0]);
        assert_eq!(config.line_thickness, 2.0);
        assert_eq!(config.x, [0.0, 600.0]);
        assert_eq!(config.save_path, PathBuf::from("./log.csv"));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = PlotterConfig::from_toml_str("ticks = \"wide\"").unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
    }
}
