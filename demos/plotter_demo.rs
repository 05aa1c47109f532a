use std::time::Duration;

use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};
use gpui_plotter::{DataLog, GpuiPlotterView, LogHandle, Plotter, PlotterConfig};
use tracing_subscriber::EnvFilter;

fn load_config() -> PlotterConfig {
    let Some(path) = std::env::args().nth(1) else {
        return PlotterConfig::default();
    };
    match std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|source| PlotterConfig::from_toml_str(&source).map_err(|err| err.to_string()))
    {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "using default configuration");
            PlotterConfig::default()
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_config();
    let mut log = DataLog::default();
    log.set_labels(["sin(t)", "cos(t)", "sin(t)+cos(t)"]);
    let log = LogHandle::new(log);

    Application::new().run(move |cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(900.0), px(600.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let plotter = Plotter::with_config(log.clone(), config);
            let view_handle = cx.new(|cx| GpuiPlotterView::new(plotter, cx));

            let view_for_task = view_handle.clone();
            window
                .spawn(cx, move |cx: &mut AsyncWindowContext| {
                    let mut cx = cx.clone();
                    async move {
                        let mut t = 0.0_f64;
                        loop {
                            Timer::after(Duration::from_millis(16)).await;
                            log.write(|log| {
                                for _ in 0..2 {
                                    log.log(&[t.sin(), t.cos(), t.sin() + t.cos()]);
                                    t += 0.01;
                                }
                            });
                            cx.update(|_, cx| {
                                view_for_task.update(cx, |_view, view_cx| view_cx.notify());
                            })
                            .ok();
                        }
                    }
                })
                .detach();

            view_handle
        })
        .unwrap();
    });
}
