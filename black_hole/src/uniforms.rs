//! GPU-layout uniforms for the ray-marching shader
//!
//! `FrameUniforms` is the frame snapshot packed with `#[repr(C)]` and 16-byte
//! aligned members so a renderer can upload it with `bytemuck::bytes_of`.

use common::CameraUniform;

use crate::scene::{FrameSnapshot, Scene};

/// Uniform data for black hole
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlackHoleUniform {
    pub position: [f32; 4],
    pub mass: f32,
    pub spin: f32,
    pub schwarzschild_radius: f32,
    pub _padding: f32,
}

/// Uniform data for the accretion disk
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DiskUniform {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub thickness: f32,
    pub inclination: f32,
}

/// Display flags (0 or 1) and render settings
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderUniform {
    pub show_accretion_disk: u32,
    pub show_event_horizon: u32,
    pub show_photon_sphere: u32,
    pub max_steps: u32,
    pub exposure: f32,
    pub bloom: u32,
    pub _padding: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub camera: CameraUniform,
    pub black_hole: BlackHoleUniform,
    pub disk: DiskUniform,
    pub render: RenderUniform,
}

// Uniform buffers need 16-byte multiples
const _: () = assert!(std::mem::size_of::<FrameUniforms>() % 16 == 0);
const _: () = assert!(std::mem::size_of::<FrameUniforms>() == 208);

impl BlackHoleUniform {
    pub fn from_snapshot(snapshot: &FrameSnapshot) -> Self {
        Self {
            position: snapshot.black_hole_position.extend(1.0).to_array(),
            mass: snapshot.black_hole_mass,
            spin: snapshot.black_hole_spin,
            schwarzschild_radius: snapshot.schwarzschild_radius,
            _padding: 0.0,
        }
    }
}

impl DiskUniform {
    pub fn from_snapshot(snapshot: &FrameSnapshot) -> Self {
        Self {
            inner_radius: snapshot.disk_inner_radius,
            outer_radius: snapshot.disk_outer_radius,
            thickness: snapshot.disk_thickness,
            inclination: snapshot.disk_inclination,
        }
    }
}

impl RenderUniform {
    pub fn from_snapshot(snapshot: &FrameSnapshot) -> Self {
        Self {
            show_accretion_disk: snapshot.show_accretion_disk as u32,
            show_event_horizon: snapshot.show_event_horizon as u32,
            show_photon_sphere: snapshot.show_photon_sphere as u32,
            max_steps: snapshot.max_steps,
            exposure: snapshot.exposure,
            bloom: snapshot.bloom as u32,
            _padding: [0.0; 2],
        }
    }
}

impl FrameUniforms {
    pub fn from_snapshot(snapshot: &FrameSnapshot) -> Self {
        Self {
            camera: CameraUniform {
                view_proj: snapshot.view_proj.to_cols_array_2d(),
                position: snapshot.camera_position.extend(1.0).to_array(),
                target: snapshot.camera_target.extend(1.0).to_array(),
                up: snapshot.camera_up.extend(0.0).to_array(),
                fov: snapshot.fov,
                aspect_ratio: snapshot.aspect_ratio,
                near: common::constants::NEAR_PLANE,
                far: common::constants::FAR_PLANE,
            },
            black_hole: BlackHoleUniform::from_snapshot(snapshot),
            disk: DiskUniform::from_snapshot(snapshot),
            render: RenderUniform::from_snapshot(snapshot),
        }
    }

    /// Camera planes come from the live camera rather than the defaults
    pub fn from_scene(scene: &Scene) -> Self {
        let mut uniforms = Self::from_snapshot(&scene.snapshot());
        uniforms.camera = CameraUniform::from_camera(&scene.camera);
        uniforms
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
