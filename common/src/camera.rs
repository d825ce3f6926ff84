//! Orbit / free-fly camera for the black hole view
//!
//! The camera is a sum type over its two control schemes: in orbit mode it
//! sits on a sphere of radius `distance` around `target`, in free-fly mode it
//! is steered by yaw/pitch. Both share one basis computation, so `forward`,
//! `right` and `up` are orthonormal after every mutating call.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{DEFAULT_FOV, DEFAULT_HEIGHT, DEFAULT_WIDTH, FAR_PLANE, NEAR_PLANE};

/// Closest the orbit camera may get to its target
pub const MIN_DISTANCE: f32 = 0.5;

/// Polar angle limits; the poles themselves would make `forward` parallel to world up
pub const MIN_PHI: f32 = 0.01;
pub const MAX_PHI: f32 = PI - 0.01;

/// Free-fly pitch limit in degrees
pub const MAX_PITCH: f32 = 89.0;

/// Home pose used on construction via `Default` and by `reset`
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 5.0, 20.0);
pub const DEFAULT_TARGET: Vec3 = Vec3::ZERO;

const WORLD_UP: Vec3 = Vec3::Y;

/// Wrap an angle into `[0, 2π)`
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Which control scheme the camera is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Orbit,
    FreeFly,
}

/// Spherical coordinates of the camera around its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub distance: f32,
    /// Azimuth in radians, kept in `[0, 2π)`
    pub theta: f32,
    /// Polar angle in radians, kept in `[MIN_PHI, MAX_PHI]`
    pub phi: f32,
}

impl OrbitState {
    /// Recover orbit coordinates from a camera-minus-target offset
    pub fn from_offset(offset: Vec3) -> Self {
        let length = offset.length();
        if length <= f32::EPSILON {
            return Self {
                distance: MIN_DISTANCE,
                theta: 0.0,
                phi: FRAC_PI_2,
            };
        }

        Self {
            distance: length.max(MIN_DISTANCE),
            theta: wrap_angle(offset.z.atan2(offset.x)),
            phi: (offset.y / length).clamp(-1.0, 1.0).acos().clamp(MIN_PHI, MAX_PHI),
        }
    }

    /// Spherical to Cartesian, with y as the polar axis
    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.phi.sin() * self.theta.cos(),
            self.distance * self.phi.cos(),
            self.distance * self.phi.sin() * self.theta.sin(),
        )
    }
}

/// Heading of the free-fly camera, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeFlyState {
    pub yaw: f32,
    pub pitch: f32,
}

impl FreeFlyState {
    pub fn from_forward(forward: Vec3) -> Self {
        let forward = forward.normalize_or_zero();
        Self {
            yaw: forward.z.atan2(forward.x).to_degrees(),
            pitch: forward
                .y
                .clamp(-1.0, 1.0)
                .asin()
                .to_degrees()
                .clamp(-MAX_PITCH, MAX_PITCH),
        }
    }

    /// Standard yaw/pitch camera basis: yaw=0 looks down +X, yaw=-90 looks down -Z
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }
}

/// Mode-specific camera state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraRig {
    Orbit(OrbitState),
    FreeFly(FreeFlyState),
}

impl CameraRig {
    pub fn mode(&self) -> CameraMode {
        match self {
            CameraRig::Orbit(_) => CameraMode::Orbit,
            CameraRig::FreeFly(_) => CameraMode::FreeFly,
        }
    }
}

/// 3D perspective camera with orbital and free-fly controls
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    rig: CameraRig,
    position: Vec3,
    target: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    fov: f32,
    near: f32,
    far: f32,
    aspect_ratio: f32,
    home_position: Vec3,
    home_target: Vec3,
}

impl OrbitCamera {
    /// Create an orbit camera looking from `position` at `target`; `fov` is in degrees
    pub fn new(position: Vec3, target: Vec3, fov: f32) -> Self {
        let mut camera = Self {
            rig: CameraRig::Orbit(OrbitState::from_offset(position - target)),
            position,
            target,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: WORLD_UP,
            fov,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            aspect_ratio: DEFAULT_WIDTH as f32 / DEFAULT_HEIGHT as f32,
            home_position: position,
            home_target: target,
        };
        camera.update_orbit_position();
        camera.update_vectors();
        camera
    }

    /// Per-frame update. `_dt` is unused by the orbit and basis math.
    pub fn update(&mut self, _dt: f32) {
        self.update_orbit_position();
        self.update_vectors();
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_theta: f32, delta_phi: f32) {
        let CameraRig::Orbit(state) = &mut self.rig else {
            log::debug!("orbit gesture ignored in free-fly mode");
            return;
        };
        state.theta = wrap_angle(state.theta + delta_theta);
        state.phi = (state.phi + delta_phi).clamp(MIN_PHI, MAX_PHI);
        self.update_orbit_position();
        self.update_vectors();
    }

    /// Move away from (positive) or towards (negative) the target
    pub fn zoom(&mut self, delta: f32) {
        let CameraRig::Orbit(state) = &mut self.rig else {
            log::debug!("zoom gesture ignored in free-fly mode");
            return;
        };
        state.distance = (state.distance + delta).max(MIN_DISTANCE);
        self.update_orbit_position();
        self.update_vectors();
    }

    /// Slide the target along the current right/up axes; distance and angles are kept
    pub fn pan(&mut self, delta: Vec2) {
        if self.mode() != CameraMode::Orbit {
            log::debug!("pan gesture ignored in free-fly mode");
            return;
        }
        self.target += self.right * delta.x + self.up * delta.y;
        self.update_orbit_position();
        self.update_vectors();
    }

    /// Translate position and target together. `direction` is expected to be normalized.
    pub fn move_by(&mut self, direction: Vec3, speed: f32) {
        if self.mode() != CameraMode::FreeFly {
            log::debug!("move gesture ignored in orbit mode");
            return;
        }
        self.position += direction * speed;
        self.target += direction * speed;
        self.update_vectors();
    }

    /// Turn the free-fly camera; angles in degrees
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let CameraRig::FreeFly(state) = &mut self.rig else {
            log::debug!("rotate gesture ignored in orbit mode");
            return;
        };
        state.yaw += delta_yaw;
        state.pitch = (state.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
        self.update_vectors();
    }

    /// Switch control scheme, converting the current pose into the new mode's state
    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode == self.mode() {
            return;
        }
        self.rig = match mode {
            CameraMode::Orbit => CameraRig::Orbit(OrbitState::from_offset(self.position - self.target)),
            CameraMode::FreeFly => CameraRig::FreeFly(FreeFlyState::from_forward(self.forward)),
        };
        log::debug!("camera mode -> {:?}", mode);
        self.update_orbit_position();
        self.update_vectors();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        if let CameraRig::Orbit(state) = &mut self.rig {
            *state = OrbitState::from_offset(position - self.target);
        }
        self.update_orbit_position();
        self.update_vectors();
    }

    pub fn set_target(&mut self, target: Vec3) {
        match &mut self.rig {
            CameraRig::Orbit(state) => {
                *state = OrbitState::from_offset(self.position - target);
                self.target = target;
            }
            CameraRig::FreeFly(state) => {
                *state = FreeFlyState::from_forward(target - self.position);
            }
        }
        self.update_orbit_position();
        self.update_vectors();
    }

    pub fn set_distance(&mut self, distance: f32) {
        if let CameraRig::Orbit(state) = &mut self.rig {
            state.distance = distance.max(MIN_DISTANCE);
        }
        self.update_orbit_position();
        self.update_vectors();
    }

    /// Field of view in degrees, kept inside a range the projection accepts
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(1.0, 179.0);
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio > 0.0 && aspect_ratio.is_finite() {
            self.aspect_ratio = aspect_ratio;
        }
    }

    /// Return to the home pose in orbit mode
    pub fn reset(&mut self) {
        self.target = self.home_target;
        self.position = self.home_position;
        self.rig = CameraRig::Orbit(OrbitState::from_offset(self.home_position - self.home_target));
        self.update_orbit_position();
        self.update_vectors();
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn mode(&self) -> CameraMode {
        self.rig.mode()
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn near_plane(&self) -> f32 {
        self.near
    }

    pub fn far_plane(&self) -> f32 {
        self.far
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn distance(&self) -> f32 {
        match &self.rig {
            CameraRig::Orbit(state) => state.distance,
            CameraRig::FreeFly(_) => (self.target - self.position).length(),
        }
    }

    pub fn theta(&self) -> f32 {
        self.orbit_state().theta
    }

    pub fn phi(&self) -> f32 {
        self.orbit_state().phi
    }

    pub fn yaw(&self) -> f32 {
        self.free_fly_state().yaw
    }

    pub fn pitch(&self) -> f32 {
        self.free_fly_state().pitch
    }

    fn orbit_state(&self) -> OrbitState {
        match &self.rig {
            CameraRig::Orbit(state) => *state,
            CameraRig::FreeFly(_) => OrbitState::from_offset(self.position - self.target),
        }
    }

    fn free_fly_state(&self) -> FreeFlyState {
        match &self.rig {
            CameraRig::FreeFly(state) => *state,
            CameraRig::Orbit(_) => FreeFlyState::from_forward(self.forward),
        }
    }

    fn update_orbit_position(&mut self) {
        if let CameraRig::Orbit(state) = &self.rig {
            self.position = self.target + state.offset();
        }
    }

    fn update_vectors(&mut self) {
        match &self.rig {
            CameraRig::Orbit(_) => {
                if let Some(forward) = (self.target - self.position).try_normalize() {
                    self.forward = forward;
                }
            }
            CameraRig::FreeFly(state) => {
                self.forward = state.forward();
                self.target = self.position + self.forward;
            }
        }

        if let Some(right) = self.forward.cross(WORLD_UP).try_normalize() {
            self.right = right;
        }
        self.up = self.right.cross(self.forward).normalize();
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION, DEFAULT_TARGET, DEFAULT_FOV)
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
    pub target: [f32; 4],
    pub up: [f32; 4],
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: camera.position().extend(1.0).to_array(),
            target: camera.target().extend(1.0).to_array(),
            up: camera.up().extend(0.0).to_array(),
            fov: camera.fov(),
            aspect_ratio: camera.aspect_ratio(),
            near: camera.near_plane(),
            far: camera.far_plane(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn assert_orthonormal(camera: &OrbitCamera) {
        let (f, r, u) = (camera.forward(), camera.right(), camera.up());
        assert!((f.length() - 1.0).abs() < 1e-4);
        assert!((r.length() - 1.0).abs() < 1e-4);
        assert!((u.length() - 1.0).abs() < 1e-4);
        assert!(f.dot(r).abs() < 1e-4);
        assert!(f.dot(u).abs() < 1e-4);
        assert!(r.dot(u).abs() < 1e-4);
    }

    #[test]
    fn test_default_camera_keeps_home_pose() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.mode(), CameraMode::Orbit);
        assert!((camera.position() - DEFAULT_POSITION).length() < 1e-4);
        assert!((camera.distance() - DEFAULT_POSITION.length()).abs() < 1e-4);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_phi_stays_clamped() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, 100.0);
        assert!((camera.phi() - MAX_PHI).abs() < 1e-6);
        camera.orbit(0.0, -100.0);
        assert!((camera.phi() - MIN_PHI).abs() < 1e-6);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_theta_wraps_after_many_orbits() {
        let mut camera = OrbitCamera::default();
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            camera.orbit(rng.gen_range(-10.0..10.0), rng.gen_range(-1.0..1.0));
            assert!(camera.theta() >= 0.0 && camera.theta() < TAU);
            assert!(camera.phi() >= MIN_PHI && camera.phi() <= MAX_PHI);
        }
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_wrap_angle_tiny_negative() {
        assert_eq!(wrap_angle(-1e-9), 0.0);
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert!((wrap_angle(-1.0) - (TAU - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_floor() {
        let mut camera = OrbitCamera::default();
        camera.zoom(-1.0e6);
        assert_eq!(camera.distance(), MIN_DISTANCE);
        assert!(((camera.position() - camera.target()).length() - MIN_DISTANCE).abs() < 1e-4);
        camera.zoom(3.0);
        assert!((camera.distance() - (MIN_DISTANCE + 3.0)).abs() < 1e-5);
    }

    #[test]
    fn test_pan_moves_target_not_angles() {
        let mut camera = OrbitCamera::default();
        let (distance, theta, phi) = (camera.distance(), camera.theta(), camera.phi());
        let right = camera.right();
        camera.pan(Vec2::new(2.0, 0.0));
        assert!((camera.target() - right * 2.0).length() < 1e-4);
        assert!((camera.distance() - distance).abs() < 1e-5);
        assert!((camera.theta() - theta).abs() < 1e-5);
        assert!((camera.phi() - phi).abs() < 1e-5);
        assert!(((camera.position() - camera.target()).length() - distance).abs() < 1e-3);
    }

    #[test]
    fn test_update_is_idempotent_in_orbit_mode() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.3, 0.2);
        let position = camera.position();
        camera.update(0.016);
        camera.update(0.016);
        assert!((camera.position() - position).length() < 1e-5);
    }

    #[test]
    fn test_view_matrix_looks_at_target() {
        let mut camera = OrbitCamera::default();
        camera.orbit(1.0, -0.4);
        let p = camera.view_matrix().transform_point3(camera.target());
        assert!(p.x.abs() < 1e-3);
        assert!(p.y.abs() < 1e-3);
        assert!((p.z + camera.distance()).abs() < 1e-3);
    }

    #[test]
    fn test_free_fly_rotate_and_move() {
        let mut camera = OrbitCamera::default();
        camera.set_mode(CameraMode::FreeFly);
        let start = camera.position();

        camera.rotate(15.0, 500.0);
        assert_eq!(camera.pitch(), MAX_PITCH);
        assert!((camera.target() - (camera.position() + camera.forward())).length() < 1e-5);
        assert_orthonormal(&camera);

        camera.move_by(Vec3::X, 2.0);
        assert!((camera.position() - (start + Vec3::X * 2.0)).length() < 1e-5);
        assert!((camera.target() - (camera.position() + camera.forward())).length() < 1e-5);
    }

    #[test]
    fn test_gestures_ignored_in_other_mode() {
        let mut camera = OrbitCamera::default();
        let position = camera.position();
        camera.move_by(Vec3::X, 5.0);
        camera.rotate(30.0, 10.0);
        assert!((camera.position() - position).length() < 1e-6);

        camera.set_mode(CameraMode::FreeFly);
        let position = camera.position();
        camera.orbit(1.0, 1.0);
        camera.zoom(10.0);
        camera.pan(Vec2::ONE);
        assert!((camera.position() - position).length() < 1e-6);
    }

    #[test]
    fn test_mode_switch_keeps_position() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.7, 0.1);
        let position = camera.position();
        let forward = camera.forward();

        camera.set_mode(CameraMode::FreeFly);
        assert!((camera.position() - position).length() < 1e-4);
        assert!((camera.forward() - forward).length() < 1e-3);

        camera.set_mode(CameraMode::Orbit);
        assert!((camera.position() - position).length() < 1e-3);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_reset_restores_home() {
        let mut camera = OrbitCamera::default();
        camera.orbit(2.0, 0.5);
        camera.pan(Vec2::new(3.0, -1.0));
        camera.set_mode(CameraMode::FreeFly);
        camera.reset();
        assert_eq!(camera.mode(), CameraMode::Orbit);
        assert!((camera.position() - DEFAULT_POSITION).length() < 1e-4);
        assert!(camera.target().length() < 1e-6);
    }

    #[test]
    fn test_set_distance_and_fov() {
        let mut camera = OrbitCamera::default();
        camera.set_distance(0.0);
        assert_eq!(camera.distance(), MIN_DISTANCE);
        camera.set_fov(500.0);
        assert_eq!(camera.fov(), 179.0);
        camera.update_aspect_ratio(0.0);
        assert!(camera.aspect_ratio() > 0.0);
    }

    #[test]
    fn test_camera_uniform_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
        let camera = OrbitCamera::default();
        let uniform = CameraUniform::from_camera(&camera);
        assert_eq!(uniform.fov, DEFAULT_FOV);
        assert_eq!(uniform.position[3], 1.0);
    }
}
