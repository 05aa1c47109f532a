use gpui::{Bounds, Pixels, Window};

use crate::geom::PixelRect;
use crate::plotter::Plotter;
use crate::render::{RenderList, TextCommand, TextList};

use super::config::PlotterViewConfig;
use super::text::GpuiTextMeasurer;

/// One recorded frame, in the element's local y-up pixel space.
#[derive(Debug, Clone)]
pub(crate) struct PlotterFrame {
    pub(crate) bounds: Bounds<Pixels>,
    pub(crate) render: RenderList,
    pub(crate) text: Vec<TextCommand>,
}

pub(crate) fn build_frame(
    plotter: &mut Plotter,
    config: &PlotterViewConfig,
    bounds: Bounds<Pixels>,
    window: &Window,
) -> PlotterFrame {
    let width = f32::from(bounds.size.width);
    let height = f32::from(bounds.size.height);
    let mut render = RenderList::new(PixelRect::new(0.0, 0.0, width, height));
    if width <= 1.0 || height <= 1.0 {
        return PlotterFrame {
            bounds,
            render,
            text: Vec::new(),
        };
    }

    let text = if config.show_text {
        let mut text = TextList::new(GpuiTextMeasurer::new(window), config.font_size);
        plotter.render(&mut render, Some(&mut text));
        text.take_commands()
    } else {
        plotter.render(&mut render, None);
        Vec::new()
    };

    PlotterFrame {
        bounds,
        render,
        text,
    }
}
