//! GPUI integration for gpui_plotter.
//!
//! This module provides a GPUI view that renders a
//! [`Plotter`](crate::plotter::Plotter) and forwards pointer, wheel, trackpad
//! and keyboard events to its handlers.

mod config;
mod frame;
mod paint;
mod text;
mod view;

pub use config::PlotterViewConfig;
pub use view::{GpuiPlotterView, PlotterHandle};
