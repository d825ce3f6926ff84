//! Maps a frame of input onto camera gestures and scene toggles
//!
//! Mouse (when the UI does not capture it):
//! - Left drag: orbit (free-fly: look around)
//! - Right drag: pan
//! - Wheel: zoom
//! - Middle click: reset camera
//!
//! Keyboard:
//! - H: help, C: orbit/free-fly
//! - Q/W/E/R: quality Low/Medium/High/Ultra
//! - 1-5: presets
//! - D/V/P: accretion disk / event horizon / photon sphere
//! - B: bloom
//! - Arrows, Space, Left Shift: fly (free-fly only)

use glam::{Vec2, Vec3};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::scene::{Preset, Quality, Scene};
use common::{CameraMode, InputState};

pub const ORBIT_SENSITIVITY: f32 = 0.005;
pub const PAN_SENSITIVITY: f32 = 0.01;
pub const ZOOM_SENSITIVITY: f32 = 0.5;
/// Degrees of yaw/pitch per pixel in free-fly mode
pub const LOOK_SENSITIVITY: f32 = 0.1;
/// Free-fly speed in scene units per second
pub const FLY_SPEED: f32 = 10.0;

const PRESET_KEYS: [(KeyCode, Preset); 5] = [
    (KeyCode::Digit1, Preset::Schwarzschild),
    (KeyCode::Digit2, Preset::ModerateKerr),
    (KeyCode::Digit3, Preset::NearMaximalKerr),
    (KeyCode::Digit4, Preset::Supermassive),
    (KeyCode::Digit5, Preset::Stellar),
];

const QUALITY_KEYS: [(KeyCode, Quality); 4] = [
    (KeyCode::KeyQ, Quality::Low),
    (KeyCode::KeyW, Quality::Medium),
    (KeyCode::KeyE, Quality::High),
    (KeyCode::KeyR, Quality::Ultra),
];

pub struct CameraController {
    pub orbit_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub look_sensitivity: f32,
    pub fly_speed: f32,
    pub show_help: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            orbit_sensitivity: ORBIT_SENSITIVITY,
            pan_sensitivity: PAN_SENSITIVITY,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            look_sensitivity: LOOK_SENSITIVITY,
            fly_speed: FLY_SPEED,
            show_help: true,
        }
    }

    /// Apply one frame of input. `ui_wants_mouse` / `ui_wants_keyboard`
    /// suppress the respective devices while an overlay has focus.
    pub fn apply(
        &mut self,
        input: &InputState,
        scene: &mut Scene,
        dt: f32,
        ui_wants_mouse: bool,
        ui_wants_keyboard: bool,
    ) {
        if !ui_wants_mouse {
            self.apply_mouse(input, scene);
        }
        if !ui_wants_keyboard {
            self.apply_keyboard(input, scene, dt);
        }
    }

    fn apply_mouse(&self, input: &InputState, scene: &mut Scene) {
        let delta = input.mouse_delta();
        let camera = &mut scene.camera;

        if input.is_mouse_button_down(MouseButton::Left) && delta != Vec2::ZERO {
            match camera.mode() {
                CameraMode::Orbit => camera.orbit(
                    -delta.x * self.orbit_sensitivity,
                    delta.y * self.orbit_sensitivity,
                ),
                CameraMode::FreeFly => camera.rotate(
                    delta.x * self.look_sensitivity,
                    -delta.y * self.look_sensitivity,
                ),
            }
        }

        if input.is_mouse_button_down(MouseButton::Right) && delta != Vec2::ZERO {
            camera.pan(Vec2::new(
                -delta.x * self.pan_sensitivity,
                delta.y * self.pan_sensitivity,
            ));
        }

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            camera.zoom(-scroll * self.zoom_sensitivity);
        }

        if input.is_mouse_button_pressed(MouseButton::Middle) {
            camera.reset();
            log::info!("camera reset");
        }
    }

    fn apply_keyboard(&mut self, input: &InputState, scene: &mut Scene, dt: f32) {
        if input.is_key_pressed(KeyCode::KeyH) {
            self.show_help = !self.show_help;
        }

        if input.is_key_pressed(KeyCode::KeyC) {
            let mode = match scene.camera.mode() {
                CameraMode::Orbit => CameraMode::FreeFly,
                CameraMode::FreeFly => CameraMode::Orbit,
            };
            scene.camera.set_mode(mode);
        }

        for (key, quality) in QUALITY_KEYS {
            if input.is_key_pressed(key) {
                scene.render.quality = quality;
                log::info!("quality: {}", quality.name());
            }
        }

        for (key, preset) in PRESET_KEYS {
            if input.is_key_pressed(key) {
                scene.apply_preset(preset);
            }
        }

        let toggles = &mut scene.toggles;
        if input.is_key_pressed(KeyCode::KeyD) {
            toggles.show_accretion_disk = !toggles.show_accretion_disk;
        }
        if input.is_key_pressed(KeyCode::KeyV) {
            toggles.show_event_horizon = !toggles.show_event_horizon;
        }
        if input.is_key_pressed(KeyCode::KeyP) {
            toggles.show_photon_sphere = !toggles.show_photon_sphere;
        }
        if input.is_key_pressed(KeyCode::KeyB) {
            scene.render.bloom = !scene.render.bloom;
        }

        if scene.camera.mode() == CameraMode::FreeFly {
            let camera = &mut scene.camera;
            let mut direction = Vec3::ZERO;
            if input.is_key_down(KeyCode::ArrowUp) {
                direction += camera.forward();
            }
            if input.is_key_down(KeyCode::ArrowDown) {
                direction -= camera.forward();
            }
            if input.is_key_down(KeyCode::ArrowRight) {
                direction += camera.right();
            }
            if input.is_key_down(KeyCode::ArrowLeft) {
                direction -= camera.right();
            }
            if input.is_key_down(KeyCode::Space) {
                direction += Vec3::Y;
            }
            if input.is_key_down(KeyCode::ShiftLeft) {
                direction -= Vec3::Y;
            }
            if let Some(direction) = direction.try_normalize() {
                camera.move_by(direction, self.fly_speed * dt);
            }
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState;

    fn drag(input: &mut InputState, button: MouseButton, dx: f64, dy: f64) {
        input.process_mouse_button(button, ElementState::Pressed);
        input.process_cursor_move(100.0, 100.0);
        input.process_cursor_move(100.0 + dx, 100.0 + dy);
    }

    #[test]
    fn test_left_drag_orbits() {
        let mut scene = Scene::default();
        let mut controller = CameraController::new();
        let mut input = InputState::new();
        let theta = scene.camera.theta();

        drag(&mut input, MouseButton::Left, -100.0, 0.0);
        controller.apply(&input, &mut scene, 0.016, false, false);

        // -dx * 0.005 = +0.5 rad
        assert!((scene.camera.theta() - (theta + 0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_ui_capture_blocks_mouse() {
        let mut scene = Scene::default();
        let mut controller = CameraController::new();
        let mut input = InputState::new();
        let position = scene.camera.position();

        drag(&mut input, MouseButton::Left, 50.0, 20.0);
        controller.apply(&input, &mut scene, 0.016, true, false);
        assert_eq!(scene.camera.position(), position);
    }

    #[test]
    fn test_scroll_zooms_and_middle_resets() {
        let mut scene = Scene::default();
        let mut controller = CameraController::new();
        let mut input = InputState::new();
        let distance = scene.camera.distance();

        input.process_scroll(winit::event::MouseScrollDelta::LineDelta(0.0, 2.0));
        controller.apply(&input, &mut scene, 0.016, false, false);
        assert!((scene.camera.distance() - (distance - 1.0)).abs() < 1e-4);

        input.end_frame();
        input.process_mouse_button(MouseButton::Middle, ElementState::Pressed);
        controller.apply(&input, &mut scene, 0.016, false, false);
        assert!((scene.camera.distance() - distance).abs() < 1e-4);
    }

    #[test]
    fn test_keys_are_edge_triggered() {
        let mut scene = Scene::default();
        let mut controller = CameraController::new();
        let mut input = InputState::new();
        let shown = scene.toggles.show_accretion_disk;

        input.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        controller.apply(&input, &mut scene, 0.016, false, false);
        assert_eq!(scene.toggles.show_accretion_disk, !shown);

        // Held for another frame: no second toggle
        input.end_frame();
        controller.apply(&input, &mut scene, 0.016, false, false);
        assert_eq!(scene.toggles.show_accretion_disk, !shown);
    }

    #[test]
    fn test_quality_and_presets() {
        let mut scene = Scene::default();
        let mut controller = CameraController::new();
        let mut input = InputState::new();

        input.process_keyboard(KeyCode::KeyR, ElementState::Pressed);
        input.process_keyboard(KeyCode::Digit1, ElementState::Pressed);
        controller.apply(&input, &mut scene, 0.016, false, false);
        assert_eq!(scene.render.quality, Quality::Ultra);
        assert_eq!(scene.black_hole().spin(), 0.0);
        assert_eq!(scene.black_hole().mass(), 10.0);

        input.end_frame();
        input.process_keyboard(KeyCode::KeyB, ElementState::Pressed);
        controller.apply(&input, &mut scene, 0.016, false, false);
        assert!(!scene.render.bloom);
    }

    #[test]
    fn test_free_fly_movement() {
        let mut scene = Scene::default();
        let mut controller = CameraController::new();
        let mut input = InputState::new();

        input.process_keyboard(KeyCode::KeyC, ElementState::Pressed);
        controller.apply(&input, &mut scene, 0.0, false, false);
        assert_eq!(scene.camera.mode(), CameraMode::FreeFly);

        input.end_frame();
        input.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed);
        let start = scene.camera.position();
        let forward = scene.camera.forward();
        controller.apply(&input, &mut scene, 0.5, false, false);
        let moved = scene.camera.position() - start;
        assert!((moved - forward * FLY_SPEED * 0.5).length() < 1e-3);
    }
}
