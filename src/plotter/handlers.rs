//! Keyboard, pointer and gesture handlers.
//!
//! Handlers only touch the viewing window, apart from the clear and save
//! keys which delegate to the log.

use tracing::{info, warn};

use crate::datalog::DataLog;
use crate::geom::ScreenPoint;
use crate::input::{ButtonState, MouseButton, SpecialInput};
use crate::view::Range;
use crate::visibility::SequenceVisibility;

use super::{PlotMode, Plotter};

const WHEEL_STEP: f64 = 0.1;

impl Plotter {
    /// Handle a key event. Only presses act.
    ///
    /// | key | action |
    /// |---|---|
    /// | `t` | toggle tracking |
    /// | `c` | clear the log |
    /// | `s` | save the log as CSV |
    /// | `m` | next draw mode |
    /// | `p` | next plot mode |
    /// | `r` | reset the view |
    /// | `a`, space | autoscale |
    /// | `1`-`9` | toggle sequence `key - 1` |
    pub fn keyboard(&mut self, key: char, pressed: bool) {
        if !pressed {
            return;
        }
        match key {
            't' => {
                self.track_front = !self.track_front;
                info!(tracking = self.track_front, "toggled tracking");
            }
            'c' => {
                self.log.write(DataLog::clear);
                info!("cleared data");
            }
            's' => self.save_log(),
            'm' => self.cycle_draw_mode(),
            'p' => self.cycle_plot_mode(),
            'r' => {
                info!("reset viewing range");
                self.reset_view();
            }
            'a' | ' ' => self.autoscale(),
            '1'..='9' => {
                if let Some(digit) = key.to_digit(10) {
                    let index = digit as usize - 1;
                    let visible = self.visibility.toggle(index);
                    info!(sequence = index, visible, "toggled sequence");
                }
            }
            _ => {}
        }
    }

    /// Handle a button press or release at pixel `(x, y)`.
    ///
    /// Wheel buttons scale the Y interval by 10% about zero on every event.
    pub fn mouse(&mut self, button: MouseButton, x: f32, y: f32, _pressed: bool, state: ButtonState) {
        self.last_mouse = ScreenPoint::new(x, y);
        self.mouse_state = state;

        let wheel = match button {
            MouseButton::WheelUp => Some(1.0 - WHEEL_STEP),
            MouseButton::WheelDown => Some(1.0 + WHEEL_STEP),
            _ => None,
        };
        if let Some(scale) = wheel {
            self.window.y = self.window.y.scaled_about(0.0, scale);
        }

        self.screen_to_plot(x, y);
    }

    /// Handle pointer motion to pixel `(x, y)` with `state` held.
    ///
    /// Left-drag scrolls X and stops tracking, middle-drag scrolls Y, and
    /// right-drag zooms each axis by its own pixel delta. Motion over an
    /// empty viewport only updates the pointer position.
    pub fn mouse_motion(&mut self, x: f32, y: f32, state: ButtonState) {
        self.mouse_state = state;
        if !self.viewport.is_valid() {
            self.last_mouse = ScreenPoint::new(x, y);
            return;
        }
        let dx = x - self.last_mouse.x;
        let dy = y - self.last_mouse.y;
        let shift_x = self.window.x.span() * dx as f64 / self.viewport.width as f64;
        let shift_y = self.window.y.span() * dy as f64 / self.viewport.height as f64;

        let buttons = state.buttons();
        if buttons == ButtonState::LEFT {
            self.track_front = false;
            self.window.origin.x -= shift_x;
        } else if buttons == ButtonState::MIDDLE {
            self.window.origin.y -= shift_y;
        } else if buttons == ButtonState::RIGHT {
            let anchor = self.window.zoom_anchor(self.track_front);
            let scale_x = 1.0 + dx as f64 / self.viewport.width as f64;
            let scale_y = 1.0 - dy as f64 / self.viewport.height as f64;
            self.window.x = self.window.x.scaled_about(anchor.x, scale_x);
            self.window.y = self.window.y.scaled_about(anchor.y, scale_y);
        }

        self.last_mouse = ScreenPoint::new(x, y);
    }

    /// Handle a scroll or pinch gesture.
    ///
    /// Scroll moves the view origin by `(p1, -p2)` pixels and stops tracking
    /// when it scrolls X backward in time. Zoom scales by `1 - p1` about the
    /// zoom anchor: the Y interval while [`ButtonState::CMD`] is held, the X
    /// interval otherwise.
    pub fn special(
        &mut self,
        input: SpecialInput,
        _x: f32,
        _y: f32,
        params: [f32; 4],
        state: ButtonState,
    ) {
        self.mouse_state = state;
        if !self.viewport.is_valid() {
            return;
        }
        let [p1, p2, _, _] = params;

        match input {
            SpecialInput::Scroll => {
                let shift_x = self.window.x.span() * p1 as f64 / self.viewport.width as f64;
                let shift_y = self.window.y.span() * -p2 as f64 / self.viewport.height as f64;
                self.window.origin.x -= shift_x;
                self.window.origin.y -= shift_y;
                if shift_x > 0.0 {
                    self.track_front = false;
                }
            }
            SpecialInput::Zoom => {
                let scale = 1.0 - p1 as f64;
                let anchor = self.window.zoom_anchor(self.track_front);
                if state.contains(ButtonState::CMD) {
                    self.window.y = self.window.y.scaled_about(anchor.y, scale);
                } else {
                    self.window.x = self.window.x.scaled_about(anchor.x, scale);
                }
            }
            SpecialInput::Rotate => {}
        }
    }

    /// Advance to the next draw mode.
    pub fn cycle_draw_mode(&mut self) {
        self.draw_mode = self.draw_mode.next();
        info!(mode = ?self.draw_mode, "draw mode");
    }

    /// Advance to the next plot mode and reset the view.
    ///
    /// Entering XY mode copies the Y interval onto X and stops tracking, since
    /// both axes then show values.
    pub fn cycle_plot_mode(&mut self) {
        self.plot_mode = self.plot_mode.next();
        self.reset_view();
        if self.plot_mode == PlotMode::Xy {
            self.window.x = self.window.y;
            self.track_front = false;
        }
        info!(mode = ?self.plot_mode, "plot mode");
    }

    /// Fit the window to the data.
    ///
    /// In XY mode with at least two sequences, X fits sequence 0 and Y fits
    /// sequence 1. Otherwise Y fits every visible sequence, provided the
    /// combined range is non-degenerate.
    pub fn autoscale(&mut self) {
        info!("auto scale");
        let (x, y) = self
            .log
            .read(|log| autoscale_bounds(log, self.plot_mode, &self.visibility));
        if let Some(x) = x {
            self.window.x = x;
        }
        if let Some(y) = y {
            self.window.y = y;
        }
    }

    fn save_log(&self) {
        match self.log.read(|log| log.save(&self.save_path)) {
            Ok(()) => info!(path = %self.save_path.display(), "saved log"),
            Err(err) => warn!(error = %err, "failed to save log"),
        }
    }
}

fn autoscale_bounds(
    log: &DataLog,
    mode: PlotMode,
    visibility: &SequenceVisibility,
) -> (Option<Range>, Option<Range>) {
    if mode == PlotMode::Xy && log.sequence_count() >= 2 {
        let fit = |index| {
            let sequence = log.sequence(index)?;
            Some(Range::new(sequence.min()?, sequence.max()?))
        };
        return (fit(0), fit(1));
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (index, sequence) in log.sequences().iter().enumerate() {
        if !visibility.is_visible(index) {
            continue;
        }
        if let (Some(lo), Some(hi)) = (sequence.min(), sequence.max()) {
            min = min.min(lo);
            max = max.max(hi);
        }
    }
    let y = (min < max).then(|| Range::new(min, max));
    (None, y)
}
