//! Keyboard and mouse state for one frame
//!
//! `InputState` is owned by the application loop and passed by reference to
//! whatever consumes it. It tracks which keys/buttons are held, which changed
//! this frame, and the cursor and wheel movement accumulated since the last
//! `end_frame`.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels per wheel "line" when a touchpad reports pixel deltas
const PIXELS_PER_LINE: f32 = 100.0;

#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    cursor: Option<Vec2>,
    mouse_delta: Vec2,
    scroll_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a window event; returns true if it was an input event we track
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                self.process_keyboard(*key, *state);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.process_mouse_button(*button, *state);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.process_cursor_move(position.x, position.y);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.process_scroll(*delta);
                true
            }
            _ => false,
        }
    }

    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // Auto-repeat arrives as more presses; only the first one is an edge
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            ElementState::Released => {
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            ElementState::Released => {
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
        }
    }

    pub fn process_cursor_move(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        // The first sample only establishes a reference point
        if let Some(last) = self.cursor {
            self.mouse_delta += position - last;
        }
        self.cursor = Some(position);
    }

    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
            MouseScrollDelta::PixelDelta(pos) => {
                Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
            }
        };
    }

    /// Clear per-frame edges and deltas. Call once after the frame consumed them.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn mouse_position(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_key_edges() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyH, ElementState::Pressed);
        assert!(input.is_key_down(KeyCode::KeyH));
        assert!(input.is_key_pressed(KeyCode::KeyH));

        input.end_frame();
        // Auto-repeat
        input.process_keyboard(KeyCode::KeyH, ElementState::Pressed);
        assert!(input.is_key_down(KeyCode::KeyH));
        assert!(!input.is_key_pressed(KeyCode::KeyH));

        input.process_keyboard(KeyCode::KeyH, ElementState::Released);
        assert!(!input.is_key_down(KeyCode::KeyH));
        assert!(input.is_key_released(KeyCode::KeyH));
    }

    #[test]
    fn test_mouse_buttons() {
        let mut input = InputState::new();
        input.process_mouse_button(MouseButton::Middle, ElementState::Pressed);
        assert!(input.is_mouse_button_pressed(MouseButton::Middle));
        input.end_frame();
        assert!(input.is_mouse_button_down(MouseButton::Middle));
        assert!(!input.is_mouse_button_pressed(MouseButton::Middle));
        input.process_mouse_button(MouseButton::Middle, ElementState::Released);
        assert!(input.is_mouse_button_released(MouseButton::Middle));
    }

    #[test]
    fn test_first_cursor_sample_has_no_delta() {
        let mut input = InputState::new();
        input.process_cursor_move(400.0, 300.0);
        assert_eq!(input.mouse_delta(), Vec2::ZERO);

        input.process_cursor_move(410.0, 295.0);
        input.process_cursor_move(420.0, 290.0);
        assert_eq!(input.mouse_delta(), Vec2::new(20.0, -10.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Some(Vec2::new(420.0, 290.0)));
    }

    #[test]
    fn test_scroll_units() {
        let mut input = InputState::new();
        input.process_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        input.process_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 50.0)));
        assert!((input.scroll_delta().y - 2.5).abs() < 1e-6);
        input.end_frame();
        assert_eq!(input.scroll_delta(), Vec2::ZERO);
    }
}
