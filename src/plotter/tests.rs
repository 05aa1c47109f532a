use proptest::prelude::*;

use super::*;
use crate::datalog::DataLog;
use crate::input::{MouseButton, SpecialInput};
use crate::render::{
    Color, MonospaceMeasurer, RenderCommand, RenderList, TextList, TextMeasurer,
};

const VIEWPORT: PixelRect = PixelRect {
    left: 0.0,
    bottom: 0.0,
    width: 600.0,
    height: 400.0,
};

fn plotter_with(log: DataLog, config: PlotterConfig) -> Plotter {
    let mut plotter = Plotter::with_config(LogHandle::new(log), config);
    plotter.set_viewport(VIEWPORT);
    plotter
}

fn still_config() -> PlotterConfig {
    PlotterConfig {
        track_front: false,
        ..PlotterConfig::default()
    }
}

fn ramp_log(sequences: usize, samples: usize) -> DataLog {
    let mut log = DataLog::new(1_000);
    for sample in 0..samples {
        let values: Vec<f64> = (0..sequences).map(|s| (sample * (s + 1)) as f64).collect();
        log.log(&values);
    }
    log
}

fn colored<'a>(list: &'a RenderList, color: Color) -> Vec<&'a RenderCommand> {
    list.commands()
        .iter()
        .filter(|command| match command {
            RenderCommand::LineSegments { style, .. } => style.color == color,
            RenderCommand::Points { color: c, .. } | RenderCommand::Quads { color: c, .. } => {
                *c == color
            }
            RenderCommand::Clear { .. } => false,
        })
        .collect()
}

fn close(a: Range, b: Range) -> bool {
    (a.min - b.min).abs() < 1e-9 && (a.max - b.max).abs() < 1e-9
}

#[test]
fn reset_view_restores_power_on_state() {
    let mut plotter = plotter_with(ramp_log(3, 10), PlotterConfig::default());
    plotter.mouse(MouseButton::Right, 100.0, 100.0, true, ButtonState::RIGHT);
    plotter.mouse_motion(160.0, 140.0, ButtonState::RIGHT);
    plotter.mouse(MouseButton::Left, 100.0, 100.0, true, ButtonState::LEFT);
    plotter.mouse_motion(150.0, 100.0, ButtonState::LEFT);
    plotter.mouse(MouseButton::WheelDown, 0.0, 0.0, true, ButtonState::NONE);
    plotter.keyboard('2', true);
    plotter.keyboard('5', true);
    plotter.set_view_origin(12.0, -3.0);

    plotter.reset_view();

    assert_eq!(plotter.x_interval(), Range::new(0.0, 600.0));
    assert_eq!(plotter.y_interval(), Range::new(-1.0, 1.0));
    assert_eq!(plotter.view_origin(), Point::default());
    assert!(plotter.is_tracking());
    assert!((0..10).all(|index| plotter.visibility().is_visible(index)));
}

#[test]
fn wheel_scales_y_about_zero() {
    let mut plotter = plotter_with(DataLog::default(), PlotterConfig::default());
    plotter.mouse(MouseButton::WheelDown, 10.0, 10.0, true, ButtonState::NONE);
    assert!(close(plotter.y_interval(), Range::new(-1.1, 1.1)));

    plotter.set_y_interval(Range::new(0.0, 2.0));
    plotter.mouse(MouseButton::WheelUp, 10.0, 10.0, true, ButtonState::NONE);
    assert!(close(plotter.y_interval(), Range::new(0.0, 1.8)));
}

#[test]
fn mouse_press_updates_cursor() {
    let mut plotter = plotter_with(DataLog::default(), still_config());
    plotter.mouse(MouseButton::Left, 300.0, 300.0, true, ButtonState::LEFT);
    let cursor = plotter.cursor();
    assert!((cursor.x - 300.0).abs() < 1e-9);
    assert!((cursor.y - 0.5).abs() < 1e-9);
}

#[test]
fn left_drag_scrolls_x_and_stops_tracking() {
    let mut plotter = plotter_with(DataLog::default(), PlotterConfig::default());
    plotter.mouse(MouseButton::Left, 100.0, 100.0, true, ButtonState::LEFT);
    plotter.mouse_motion(130.0, 100.0, ButtonState::LEFT | ButtonState::SHIFT);
    assert!((plotter.view_origin().x + 30.0).abs() < 1e-9);
    assert_eq!(plotter.view_origin().y, 0.0);
    assert!(!plotter.is_tracking());
}

#[test]
fn middle_drag_scrolls_y() {
    let mut plotter = plotter_with(DataLog::default(), PlotterConfig::default());
    plotter.mouse(MouseButton::Middle, 100.0, 100.0, true, ButtonState::MIDDLE);
    plotter.mouse_motion(100.0, 140.0, ButtonState::MIDDLE);
    assert!((plotter.view_origin().y + 0.2).abs() < 1e-9);
    assert!(plotter.is_tracking());
}

#[test]
fn right_drag_zooms_about_right_edge_while_tracking() {
    let mut plotter = plotter_with(DataLog::default(), PlotterConfig::default());
    plotter.mouse(MouseButton::Right, 300.0, 200.0, true, ButtonState::RIGHT);
    plotter.mouse_motion(360.0, 200.0, ButtonState::RIGHT);
    assert!(close(plotter.x_interval(), Range::new(-60.0, 600.0)));
    assert!(close(plotter.y_interval(), Range::new(-1.0, 1.0)));
}

#[test]
fn right_drag_zooms_about_midpoints_when_not_tracking() {
    let mut plotter = plotter_with(DataLog::default(), still_config());
    plotter.mouse(MouseButton::Right, 300.0, 200.0, true, ButtonState::RIGHT);
    plotter.mouse_motion(300.0, 240.0, ButtonState::RIGHT);
    assert!(close(plotter.x_interval(), Range::new(0.0, 600.0)));
    assert!(close(plotter.y_interval(), Range::new(-0.9, 0.9)));
}

#[test]
fn scroll_gesture_moves_origin() {
    let mut plotter = plotter_with(DataLog::default(), PlotterConfig::default());
    let state = ButtonState::NONE;
    plotter.special(SpecialInput::Scroll, 0.0, 0.0, [-60.0, 0.0, 0.0, 0.0], state);
    assert!((plotter.view_origin().x - 60.0).abs() < 1e-9);
    assert!(plotter.is_tracking());

    plotter.special(SpecialInput::Scroll, 0.0, 0.0, [60.0, 40.0, 0.0, 0.0], state);
    assert!(plotter.view_origin().x.abs() < 1e-9);
    assert!((plotter.view_origin().y - 0.2).abs() < 1e-9);
    assert!(!plotter.is_tracking());
}

#[test]
fn zoom_gesture_picks_axis_by_modifier() {
    let mut plotter = plotter_with(DataLog::default(), still_config());
    plotter.special(SpecialInput::Zoom, 0.0, 0.0, [0.5, 0.0, 0.0, 0.0], ButtonState::NONE);
    assert!(close(plotter.x_interval(), Range::new(150.0, 450.0)));

    plotter.special(SpecialInput::Zoom, 0.0, 0.0, [0.5, 0.0, 0.0, 0.0], ButtonState::CMD);
    assert!(close(plotter.y_interval(), Range::new(-0.5, 0.5)));
    assert!(close(plotter.x_interval(), Range::new(150.0, 450.0)));
}

#[test]
fn xy_autoscale_fits_first_two_sequences() {
    let mut log = DataLog::default();
    for (x, y) in [(0.0, 3.0), (1.0, 2.0), (2.0, 1.0), (3.0, 0.0)] {
        log.log(&[x, y]);
    }
    let mut plotter = plotter_with(log, PlotterConfig::default());
    plotter.set_mode(PlotMode::Xy, false);
    plotter.keyboard('a', true);
    assert_eq!(plotter.x_interval(), Range::new(0.0, 3.0));
    assert_eq!(plotter.y_interval(), Range::new(0.0, 3.0));
}

#[test]
fn autoscale_ignores_degenerate_range() {
    let mut log = DataLog::default();
    log.log(&[2.0]);
    log.log(&[2.0]);
    let mut plotter = plotter_with(log, PlotterConfig::default());
    plotter.keyboard(' ', true);
    assert_eq!(plotter.y_interval(), Range::new(-1.0, 1.0));
}

#[test]
fn autoscale_skips_hidden_sequences() {
    let mut log = DataLog::default();
    log.log(&[0.0, -5.0]);
    log.log(&[10.0, 1.0]);
    let mut plotter = plotter_with(log, PlotterConfig::default());
    plotter.keyboard('1', true);
    plotter.autoscale();
    assert_eq!(plotter.y_interval(), Range::new(-5.0, 1.0));
    assert_eq!(plotter.x_interval(), Range::new(0.0, 600.0));
}

#[test]
fn cycling_into_xy_copies_y_bounds() {
    let mut plotter = plotter_with(DataLog::default(), PlotterConfig::default());
    plotter.set_y_interval(Range::new(-4.0, 4.0));
    plotter.keyboard('p', true);
    assert_eq!(plotter.plot_mode(), PlotMode::Xy);
    assert_eq!(plotter.x_interval(), plotter.y_interval());
    assert_eq!(plotter.x_interval(), Range::new(-1.0, 1.0));
    assert!(!plotter.is_tracking());

    plotter.keyboard('p', true);
    assert_eq!(plotter.plot_mode(), PlotMode::StackedHistogram);
    assert!(plotter.is_tracking());
    plotter.keyboard('p', true);
    assert_eq!(plotter.plot_mode(), PlotMode::TimeSeries);
}

#[test]
fn key_releases_are_ignored() {
    let mut plotter = plotter_with(DataLog::default(), PlotterConfig::default());
    plotter.keyboard('t', false);
    assert!(plotter.is_tracking());
    plotter.keyboard('t', true);
    assert!(!plotter.is_tracking());
    plotter.keyboard('m', true);
    assert_eq!(plotter.draw_mode(), DrawMode::Points);
}

#[test]
fn clear_and_save_delegate_to_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let config = PlotterConfig {
        save_path: path.clone(),
        ..PlotterConfig::default()
    };
    let mut plotter = plotter_with(ramp_log(2, 3), config);
    plotter.keyboard('s', true);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "0,0\n1,2\n2,4\n");

    plotter.keyboard('c', true);
    assert_eq!(plotter.log().read(DataLog::sample_count), 0);
}

#[test]
fn unknown_plot_mode_is_an_error() {
    assert_eq!(PlotMode::from_index(2).unwrap(), PlotMode::StackedHistogram);
    let err = PlotMode::try_from(7).unwrap_err();
    assert!(matches!(err, PlotError::UnknownPlotMode(7)));
}

#[test]
fn render_follows_newest_sample_while_tracking() {
    let mut plotter = plotter_with(ramp_log(1, 50), PlotterConfig::default());
    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);
    assert_eq!(plotter.view_origin().x, -550.0);
    assert_eq!(plotter.window().visible_x(), Range::new(-550.0, 50.0));
}

#[test]
fn render_draws_only_visible_sequences() {
    let config = PlotterConfig {
        visibility_capacity: 1,
        ..still_config().with_x(0.0, 10.0).with_y(0.0, 40.0)
    };
    let mut plotter = plotter_with(ramp_log(2, 10), config);
    plotter.keyboard('1', true);
    plotter.keyboard('2', true);

    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);

    let theme = Theme::dark();
    assert!(colored(&list, theme.series_color(0)).is_empty());
    let drawn = colored(&list, theme.series_color(1));
    assert_eq!(drawn.len(), 1);
    let RenderCommand::LineSegments { segments, .. } = drawn[0] else {
        panic!("expected a line strip");
    };
    assert_eq!(segments.len(), 9);
}

#[test]
fn render_clips_sequence_to_window() {
    let config = still_config().with_x(2.0, 5.0).with_y(0.0, 10.0);
    let mut plotter = plotter_with(ramp_log(1, 10), config);
    plotter.keyboard('m', true);

    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);

    let drawn = colored(&list, Theme::dark().series_color(0));
    let RenderCommand::Points { points, .. } = drawn[0] else {
        panic!("expected points");
    };
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].x, 0.0);
}

#[test]
fn render_xy_pairs_sequences() {
    let mut log = DataLog::default();
    for (x, y) in [(0.0, 3.0), (1.0, 2.0), (2.0, 1.0), (3.0, 0.0)] {
        log.log(&[x, y]);
    }
    let config = still_config().with_x(-1.0, 4.0).with_y(-1.0, 4.0);
    let mut plotter = plotter_with(log, config);
    plotter.set_mode(PlotMode::Xy, false);

    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);

    let drawn = colored(&list, Theme::dark().series_color(0));
    let RenderCommand::LineSegments { segments, .. } = drawn[0] else {
        panic!("expected a line strip");
    };
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].start, ScreenPoint::new(120.0, 320.0));
}

#[test]
fn histogram_stacks_from_last_sequence() {
    let mut log = DataLog::default();
    log.log(&[1.0, 2.0]);
    log.log(&[1.0, 2.0]);
    let config = still_config().with_x(0.0, 10.0).with_y(0.0, 4.0);
    let mut plotter = plotter_with(log, config);
    plotter.set_mode(PlotMode::StackedHistogram, false);

    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);

    let theme = Theme::dark();
    let quad_commands: Vec<&RenderCommand> = list
        .commands()
        .iter()
        .filter(|command| matches!(command, RenderCommand::Quads { .. }))
        .collect();
    assert_eq!(quad_commands.len(), 2);
    let RenderCommand::Quads { quads: top, color } = quad_commands[1] else {
        unreachable!();
    };
    assert_eq!(*color, theme.series_color(0));
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].min.y, 200.0);
    assert_eq!(top[0].max.y, 300.0);
    let RenderCommand::Quads { quads: bottom, .. } = quad_commands[0] else {
        unreachable!();
    };
    assert_eq!(bottom[1].min.y, 0.0);
    assert_eq!(bottom[1].max.y, 200.0);
}

#[test]
fn histogram_respects_visibility() {
    let mut log = DataLog::default();
    log.log(&[1.0, 2.0]);
    let config = still_config().with_x(0.0, 10.0).with_y(0.0, 4.0);
    let mut plotter = plotter_with(log, config);
    plotter.set_mode(PlotMode::StackedHistogram, false);
    plotter.keyboard('2', true);

    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);

    let RenderCommand::Quads { quads, .. } = colored(&list, Theme::dark().series_color(0))[0]
    else {
        panic!("expected quads");
    };
    assert_eq!(quads[0].min.y, 0.0);
    assert_eq!(quads[0].max.y, 100.0);
    assert!(colored(&list, Theme::dark().series_color(1)).is_empty());
}

#[test]
fn grid_is_drawn_until_too_dense() {
    let mut plotter = plotter_with(DataLog::default(), still_config());
    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);
    let ticks = colored(&list, Theme::dark().ticks);
    assert_eq!(ticks.len(), 20 + 4);
    assert_eq!(colored(&list, Theme::dark().axis).len(), 2);

    plotter.set_x_interval(Range::new(0.0, 30_000.0));
    plotter.set_y_interval(Range::new(0.0, 1_000.0));
    plotter.render(&mut list, None);
    assert!(colored(&list, Theme::dark().ticks).is_empty());
    assert_eq!(colored(&list, Theme::dark().axis).len(), 2);
}

#[test]
fn readout_and_legend_need_text() {
    let mut log = ramp_log(2, 10);
    log.set_labels(["one", "two"]);
    let config = still_config().with_x(0.0, 10.0).with_y(0.0, 20.0);
    let mut plotter = plotter_with(log, config);
    plotter.mouse(MouseButton::Left, 330.0, 200.0, true, ButtonState::LEFT);

    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);
    assert_eq!(colored(&list, Theme::dark().cursor).len(), 1);

    let measurer = MonospaceMeasurer::default();
    let mut text = TextList::new(measurer, 12.0);
    plotter.render(&mut list, Some(&mut text));
    let strings: Vec<&str> = text.commands().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(strings, vec!["x=5 ", " 5", " 10", "one", "two"]);

    let first = &text.commands()[0];
    assert_eq!(first.position, ScreenPoint::new(5.0, 5.0));
    let second = &text.commands()[1];
    assert_eq!(second.position.x, 5.0 + measurer.measure("x=5 ", 12.0).0);
    let legend = &text.commands()[3];
    assert_eq!(legend.position, ScreenPoint::new(5.0, 385.0));
    assert_eq!(text.commands()[4].position.y, 370.0);
}

#[test]
fn xy_readout_shows_both_coordinates() {
    let config = still_config().with_x(0.0, 6.0).with_y(0.0, 4.0);
    let mut plotter = plotter_with(ramp_log(2, 4), config);
    plotter.set_mode(PlotMode::Xy, false);
    plotter.mouse(MouseButton::Left, 150.0, 100.0, true, ButtonState::LEFT);

    let mut list = RenderList::new(VIEWPORT);
    let mut text = TextList::new(MonospaceMeasurer::default(), 12.0);
    plotter.render(&mut list, Some(&mut text));
    assert_eq!(text.commands()[0].text, "(1.5,1)");
    assert_eq!(colored(&list, Theme::dark().cursor).len(), 2);
}

#[test]
fn collapsed_window_draws_only_background() {
    let config = still_config().with_x(5.0, 5.0);
    let mut plotter = plotter_with(ramp_log(1, 10), config);
    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);
    assert_eq!(list.commands().len(), 1);
    assert!(matches!(list.commands()[0], RenderCommand::Clear { .. }));
}

#[test]
fn gestures_over_empty_viewport_leave_window_intact() {
    let config = still_config().with_x(0.0, 10.0).with_y(0.0, 20.0);
    let mut plotter = plotter_with(ramp_log(1, 10), config);
    let mut empty = RenderList::new(PixelRect::new(0.0, 0.0, 0.0, 0.0));
    plotter.render(&mut empty, None);

    plotter.mouse(MouseButton::Left, 0.0, 0.0, true, ButtonState::LEFT);
    plotter.mouse_motion(10.0, 0.0, ButtonState::LEFT);
    plotter.mouse(MouseButton::Right, 10.0, 0.0, true, ButtonState::RIGHT);
    plotter.mouse_motion(20.0, 5.0, ButtonState::RIGHT);
    let state = ButtonState::NONE;
    plotter.special(SpecialInput::Scroll, 0.0, 0.0, [30.0, 30.0, 0.0, 0.0], state);

    assert_eq!(plotter.view_origin(), Point::default());
    assert_eq!(plotter.x_interval(), Range::new(0.0, 10.0));
    assert_eq!(plotter.y_interval(), Range::new(0.0, 20.0));
    assert!(plotter.cursor().x.is_finite() && plotter.cursor().y.is_finite());

    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);
    assert_eq!(colored(&list, Theme::dark().series_color(0)).len(), 1);
}

#[test]
fn sequences_past_capacity_always_stack_and_scale() {
    let mut log = DataLog::default();
    log.log(&[1.0, 2.0]);
    log.log(&[-8.0, 3.0]);
    let config = PlotterConfig {
        visibility_capacity: 1,
        ..still_config().with_x(0.0, 10.0).with_y(0.0, 4.0)
    };
    let mut plotter = plotter_with(log, config);
    plotter.keyboard('1', true);
    plotter.keyboard('2', true);
    assert!(!plotter.visibility().is_visible(0));
    assert!(plotter.visibility().is_visible(1));

    plotter.set_mode(PlotMode::StackedHistogram, false);
    let mut list = RenderList::new(VIEWPORT);
    plotter.render(&mut list, None);
    let theme = Theme::dark();
    assert!(colored(&list, theme.series_color(0)).is_empty());
    let RenderCommand::Quads { quads, .. } = colored(&list, theme.series_color(1))[0] else {
        panic!("expected quads");
    };
    assert_eq!(quads.len(), 2);
    assert_eq!(quads[0].min.y, 0.0);
    assert_eq!(quads[0].max.y, 200.0);

    plotter.set_mode(PlotMode::TimeSeries, false);
    plotter.autoscale();
    assert_eq!(plotter.y_interval(), Range::new(2.0, 3.0));
}

proptest! {
    #[test]
    fn screen_to_plot_roundtrips(
        x in 0.0f32..600.0,
        y in 0.0f32..400.0,
        origin_x in -1.0e4f64..1.0e4,
        origin_y in -10.0f64..10.0,
    ) {
        let mut plotter = plotter_with(DataLog::default(), still_config());
        plotter.set_view_origin(origin_x, origin_y);
        let point = plotter.screen_to_plot(x, y);
        let back = plotter.plot_to_screen(point);
        prop_assert!((back.x - x).abs() < 1e-2);
        prop_assert!((back.y - y).abs() < 1e-2);
    }
}
