//! gpui_plotter is an interactive plotter for streaming multi-sequence data.
//! A [`Plotter`] shows a scrollable, zoomable window over a shared
//! [`DataLog`] as time series, XY pairs or a stacked histogram, and draws
//! through the host-independent [`Surface`] and [`TextRenderer`] traits.
//! Enable the `gpui` feature for a ready-made GPUI view.

#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod datalog;
pub mod error;
pub mod geom;
pub mod input;
pub mod plotter;
pub mod render;
pub mod style;
pub mod transform;
pub mod view;
pub mod visibility;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use config::PlotterConfig;
pub use context::PlotterContext;
pub use datalog::{DataLog, DataSequence, LogHandle};
pub use error::PlotError;
pub use geom::{PixelRect, Point, ScreenPoint};
pub use input::{ButtonState, MouseButton, SpecialInput};
pub use plotter::{DrawMode, PlotMode, Plotter};
pub use render::{
    Color, MonospaceMeasurer, Primitive, Projection, Quad, RenderCommand, RenderList, Surface,
    TextList, TextMeasurer, TextRenderer,
};
pub use style::Theme;
pub use transform::Transform;
pub use view::{Range, ViewWindow};
pub use visibility::SequenceVisibility;

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiPlotterView, PlotterHandle, PlotterViewConfig};
