use std::sync::{Arc, PoisonError, RwLock};

use gpui::prelude::*;
use gpui::{
    App, Bounds, FocusHandle, Focusable, KeyDownEvent, KeyUpEvent, Modifiers, MouseDownEvent,
    MouseMoveEvent, MouseUpEvent, Pixels, Point, ScrollDelta, ScrollWheelEvent, Window, canvas,
    div, px,
};

use crate::geom::ScreenPoint;
use crate::input::{ButtonState, MouseButton, SpecialInput};
use crate::plotter::Plotter;

use super::config::PlotterViewConfig;
use super::frame::build_frame;
use super::paint::{paint_frame, to_hsla};

/// A GPUI view that renders a [`Plotter`] and feeds it input events.
///
/// Pointer positions are converted to the plotter's bottom-left pixel
/// origin before they reach the handlers. Wheel lines become wheel-button
/// events, trackpad pixels become scroll gestures, and wheel input with
/// control or command held becomes a zoom gesture.
pub struct GpuiPlotterView {
    plotter: Arc<RwLock<Plotter>>,
    bounds: Arc<RwLock<Bounds<Pixels>>>,
    config: PlotterViewConfig,
    held: ButtonState,
    focus_handle: FocusHandle,
}

impl GpuiPlotterView {
    /// Create a new GPUI view for the given plotter.
    ///
    /// Uses the default [`PlotterViewConfig`].
    pub fn new(plotter: Plotter, cx: &mut Context<Self>) -> Self {
        Self::with_config(plotter, PlotterViewConfig::default(), cx)
    }

    /// Create a new GPUI view with a custom configuration.
    pub fn with_config(plotter: Plotter, config: PlotterViewConfig, cx: &mut Context<Self>) -> Self {
        Self {
            plotter: Arc::new(RwLock::new(plotter)),
            bounds: Arc::new(RwLock::new(Bounds::default())),
            config,
            held: ButtonState::NONE,
            focus_handle: cx.focus_handle(),
        }
    }

    /// Get a handle for inspecting or reconfiguring the plotter.
    pub fn plotter_handle(&self) -> PlotterHandle {
        PlotterHandle {
            plotter: Arc::clone(&self.plotter),
        }
    }

    fn update(&self, f: impl FnOnce(&mut Plotter)) {
        let mut plotter = self.plotter.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut plotter);
    }

    fn local_point(&self, position: Point<Pixels>) -> ScreenPoint {
        let bounds = *self.bounds.read().unwrap_or_else(PoisonError::into_inner);
        let x = position.x - bounds.origin.x;
        let y = bounds.origin.y + bounds.size.height - position.y;
        ScreenPoint::new(f32::from(x), f32::from(y))
    }

    fn on_mouse_down(
        &mut self,
        ev: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        window.focus(&self.focus_handle);
        let Some(button) = map_button(ev.button) else {
            return;
        };
        self.held.set(button.into(), true);
        let pos = self.local_point(ev.position);
        let state = button_state(self.held, &ev.modifiers);
        self.update(|plotter| plotter.mouse(button, pos.x, pos.y, true, state));
        cx.notify();
    }

    fn on_mouse_up(&mut self, ev: &MouseUpEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let Some(button) = map_button(ev.button) else {
            return;
        };
        if !self.held.contains(button.into()) {
            return;
        }
        self.held.set(button.into(), false);
        let pos = self.local_point(ev.position);
        let state = button_state(self.held, &ev.modifiers);
        self.update(|plotter| plotter.mouse(button, pos.x, pos.y, false, state));
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, _window: &mut Window, cx: &mut Context<Self>) {
        if self.held.buttons() == ButtonState::NONE {
            return;
        }
        let pos = self.local_point(ev.position);
        let released = released_buttons(self.held, ev.pressed_button);
        if !released.is_empty() {
            for button in released {
                self.held.set(button.into(), false);
                let state = button_state(self.held, &ev.modifiers);
                self.update(|plotter| plotter.mouse(button, pos.x, pos.y, false, state));
            }
            cx.notify();
            return;
        }
        let state = button_state(self.held, &ev.modifiers);
        self.update(|plotter| plotter.mouse_motion(pos.x, pos.y, state));
        cx.notify();
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let pos = self.local_point(ev.position);
        let state = button_state(self.held, &ev.modifiers);
        let zoom = ev.modifiers.control || ev.modifiers.platform;

        match ev.delta {
            ScrollDelta::Lines(lines) if !zoom => {
                let button = if lines.y > 0.0 {
                    MouseButton::WheelUp
                } else if lines.y < 0.0 {
                    MouseButton::WheelDown
                } else {
                    return;
                };
                let notches = lines.y.abs().round().max(1.0) as usize;
                self.update(|plotter| {
                    for _ in 0..notches {
                        plotter.mouse(button, pos.x, pos.y, true, state);
                    }
                });
            }
            delta => {
                let pixels = delta.pixel_delta(px(self.config.line_height));
                let dx = f32::from(pixels.x);
                let dy = f32::from(pixels.y);
                if zoom {
                    let amount = dy / self.config.zoom_pixels;
                    self.update(|plotter| {
                        plotter.special(SpecialInput::Zoom, pos.x, pos.y, [amount, 0.0, 0.0, 0.0], state);
                    });
                } else {
                    self.update(|plotter| {
                        plotter.special(SpecialInput::Scroll, pos.x, pos.y, [dx, dy, 0.0, 0.0], state);
                    });
                }
            }
        }
        cx.notify();
    }

    fn on_key_down(&mut self, ev: &KeyDownEvent, _window: &mut Window, cx: &mut Context<Self>) {
        if let Some(key) = key_char(&ev.keystroke.key) {
            self.update(|plotter| plotter.keyboard(key, true));
            cx.notify();
        }
    }

    fn on_key_up(&mut self, ev: &KeyUpEvent, _window: &mut Window, _cx: &mut Context<Self>) {
        if let Some(key) = key_char(&ev.keystroke.key) {
            self.update(|plotter| plotter.keyboard(key, false));
        }
    }
}

impl Focusable for GpuiPlotterView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for GpuiPlotterView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let plotter = Arc::clone(&self.plotter);
        let bounds_slot = Arc::clone(&self.bounds);
        let config = self.config.clone();
        let background = plotter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .theme()
            .background;

        div()
            .track_focus(&self.focus_handle)
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        *bounds_slot.write().unwrap_or_else(PoisonError::into_inner) = bounds;
                        let mut plotter = plotter.write().unwrap_or_else(PoisonError::into_inner);
                        build_frame(&mut plotter, &config, bounds, window)
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(gpui::MouseButton::Left, cx.listener(Self::on_mouse_down))
            .on_mouse_down(gpui::MouseButton::Middle, cx.listener(Self::on_mouse_down))
            .on_mouse_down(gpui::MouseButton::Right, cx.listener(Self::on_mouse_down))
            .on_mouse_up(gpui::MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_mouse_up(gpui::MouseButton::Middle, cx.listener(Self::on_mouse_up))
            .on_mouse_up(gpui::MouseButton::Right, cx.listener(Self::on_mouse_up))
            .on_mouse_up_out(gpui::MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_mouse_up_out(gpui::MouseButton::Middle, cx.listener(Self::on_mouse_up))
            .on_mouse_up_out(gpui::MouseButton::Right, cx.listener(Self::on_mouse_up))
            .on_mouse_move(cx.listener(Self::on_mouse_move))
            .on_scroll_wheel(cx.listener(Self::on_scroll))
            .on_key_down(cx.listener(Self::on_key_down))
            .on_key_up(cx.listener(Self::on_key_up))
    }
}

/// A handle for reading or mutating a [`Plotter`] held inside a `GpuiPlotterView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct PlotterHandle {
    plotter: Arc<RwLock<Plotter>>,
}

impl PlotterHandle {
    /// Read the plotter state.
    ///
    /// The plotter is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Plotter) -> R) -> R {
        let plotter = self.plotter.read().unwrap_or_else(PoisonError::into_inner);
        f(&plotter)
    }

    /// Mutate the plotter state.
    ///
    /// The plotter is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Plotter) -> R) -> R {
        let mut plotter = self.plotter.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut plotter)
    }
}

fn map_button(button: gpui::MouseButton) -> Option<MouseButton> {
    match button {
        gpui::MouseButton::Left => Some(MouseButton::Left),
        gpui::MouseButton::Middle => Some(MouseButton::Middle),
        gpui::MouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

/// Held buttons that the platform no longer reports as pressed.
fn released_buttons(held: ButtonState, pressed: Option<gpui::MouseButton>) -> Vec<MouseButton> {
    let pressed = pressed.and_then(map_button);
    [MouseButton::Left, MouseButton::Middle, MouseButton::Right]
        .into_iter()
        .filter(|button| held.contains((*button).into()) && pressed != Some(*button))
        .collect()
}

fn button_state(held: ButtonState, modifiers: &Modifiers) -> ButtonState {
    let mut state = held;
    state.set(ButtonState::SHIFT, modifiers.shift);
    state.set(ButtonState::CTRL, modifiers.control);
    state.set(ButtonState::ALT, modifiers.alt);
    state.set(ButtonState::CMD, modifiers.platform);
    state
}

fn key_char(key: &str) -> Option<char> {
    if key == "space" {
        return Some(' ');
    }
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_pointer_buttons() {
        assert_eq!(map_button(gpui::MouseButton::Left), Some(MouseButton::Left));
        assert_eq!(map_button(gpui::MouseButton::Middle), Some(MouseButton::Middle));
        assert_eq!(map_button(gpui::MouseButton::Right), Some(MouseButton::Right));
    }

    #[test]
    fn modifiers_join_held_buttons() {
        let modifiers = Modifiers {
            shift: true,
            platform: true,
            ..Default::default()
        };
        let state = button_state(ButtonState::LEFT, &modifiers);
        assert!(state.contains(ButtonState::LEFT));
        assert!(state.contains(ButtonState::SHIFT));
        assert!(state.contains(ButtonState::CMD));
        assert!(!state.contains(ButtonState::CTRL));
        assert_eq!(state.buttons(), ButtonState::LEFT);

        let cleared = button_state(state, &Modifiers::default());
        assert_eq!(cleared, ButtonState::LEFT);
    }

    #[test]
    fn key_names_become_chars() {
        assert_eq!(key_char("space"), Some(' '));
        assert_eq!(key_char("a"), Some('a'));
        assert_eq!(key_char("T"), Some('t'));
        assert_eq!(key_char("1"), Some('1'));
        assert_eq!(key_char("escape"), None);
        assert_eq!(key_char(""), None);
    }

    #[test]
    fn release_outside_ends_drag() {
        let held = ButtonState::LEFT | ButtonState::RIGHT;
        assert_eq!(
            released_buttons(held, None),
            vec![MouseButton::Left, MouseButton::Right]
        );
        assert_eq!(
            released_buttons(held, Some(gpui::MouseButton::Right)),
            vec![MouseButton::Left]
        );
        assert!(released_buttons(ButtonState::LEFT, Some(gpui::MouseButton::Left)).is_empty());
        assert!(released_buttons(ButtonState::NONE, None).is_empty());
    }
}
