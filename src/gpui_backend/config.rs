/// Configuration for the GPUI plotter view.
#[derive(Debug, Clone)]
pub struct PlotterViewConfig {
    /// Font size of the readout and legend, in pixels.
    pub font_size: f32,
    /// Draw the cursor readout and legend.
    pub show_text: bool,
    /// Trackpad pixels per unit of pinch zoom.
    pub zoom_pixels: f32,
    /// Pixels per scrolled line when a device reports lines during a gesture.
    pub line_height: f32,
}

impl Default for PlotterViewConfig {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            show_text: true,
            zoom_pixels: 400.0,
            line_height: 20.0,
        }
    }
}
