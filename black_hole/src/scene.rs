//! Scene state and the per-frame snapshot handed to the renderer
//!
//! The scene owns the black hole, the disk geometry and the camera. The disk
//! is re-bound to the hole on every query, so a frame always sees the hole as
//! of its last `set_mass`/`set_spin`.

use glam::{Mat4, Vec3};

use crate::disk::{AccretionDisk, DiskGeometry};
use crate::physics::BlackHole;
use common::OrbitCamera;

/// Named black hole configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Classic non-rotating hole, 10 M☉
    Schwarzschild,
    /// Moderate rotation with visible frame dragging
    ModerateKerr,
    /// Extreme rotation
    NearMaximalKerr,
    /// M87*, 6.5 billion M☉
    Supermassive,
    /// Typical stellar-mass hole
    Stellar,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Schwarzschild,
        Preset::ModerateKerr,
        Preset::NearMaximalKerr,
        Preset::Supermassive,
        Preset::Stellar,
    ];

    /// Mass in solar masses
    pub fn mass(self) -> f32 {
        match self {
            Preset::Schwarzschild | Preset::ModerateKerr | Preset::NearMaximalKerr => 10.0,
            Preset::Supermassive => 6.5e9,
            Preset::Stellar => 5.0,
        }
    }

    pub fn spin(self) -> f32 {
        match self {
            Preset::Schwarzschild => 0.0,
            Preset::ModerateKerr => 0.5,
            Preset::NearMaximalKerr => 0.95,
            Preset::Supermassive => 0.9,
            Preset::Stellar => 0.7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Schwarzschild => "Schwarzschild (Non-rotating)",
            Preset::ModerateKerr => "Moderate Kerr",
            Preset::NearMaximalKerr => "Near-Maximal Kerr",
            Preset::Supermassive => "Supermassive (M87)",
            Preset::Stellar => "Stellar Mass",
        }
    }

    pub fn black_hole(self) -> BlackHole {
        BlackHole::new(self.mass(), self.spin())
    }
}

/// Step budget of the highest quality level
pub const MAX_RAY_STEPS: u32 = 2000;

/// Ray-march quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Quality {
    Low,
    Medium,
    High,
    Ultra,
}

impl Quality {
    /// Ray-march step budget the renderer should use
    pub fn max_steps(self) -> u32 {
        match self {
            Quality::Low => MAX_RAY_STEPS / 8,
            Quality::Medium => MAX_RAY_STEPS / 4,
            Quality::High => MAX_RAY_STEPS / 2,
            Quality::Ultra => MAX_RAY_STEPS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quality::Low => "Low",
            Quality::Medium => "Medium",
            Quality::High => "High",
            Quality::Ultra => "Ultra",
        }
    }
}

/// What the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayToggles {
    pub show_accretion_disk: bool,
    pub show_event_horizon: bool,
    pub show_photon_sphere: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            show_accretion_disk: true,
            show_event_horizon: true,
            show_photon_sphere: false,
        }
    }
}

/// Renderer knobs carried alongside the physics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub quality: Quality,
    /// Post-process bloom on the HDR output
    pub bloom: bool,
    exposure: f32,
}

impl RenderSettings {
    pub const MIN_EXPOSURE: f32 = 0.1;
    pub const MAX_EXPOSURE: f32 = 5.0;

    pub fn exposure(&self) -> f32 {
        self.exposure
    }

    pub fn set_exposure(&mut self, exposure: f32) {
        if exposure.is_finite() {
            self.exposure = exposure.clamp(Self::MIN_EXPOSURE, Self::MAX_EXPOSURE);
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            quality: Quality::Medium,
            bloom: true,
            exposure: 1.0,
        }
    }
}

/// Everything the renderer reads for one frame. Plain values; the renderer
/// never writes back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub camera_up: Vec3,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub view_proj: Mat4,

    pub black_hole_mass: f32,
    pub black_hole_spin: f32,
    pub black_hole_position: Vec3,
    pub schwarzschild_radius: f32,

    pub show_accretion_disk: bool,
    pub disk_inner_radius: f32,
    pub disk_outer_radius: f32,
    pub disk_thickness: f32,
    pub disk_inclination: f32,

    pub show_event_horizon: bool,
    pub show_photon_sphere: bool,

    pub max_steps: u32,
    pub exposure: f32,
    pub bloom: bool,
}

/// Black hole, disk and camera for one view
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: OrbitCamera,
    pub toggles: DisplayToggles,
    pub render: RenderSettings,
    black_hole: BlackHole,
    disk: DiskGeometry,
}

impl Scene {
    pub fn new(black_hole: BlackHole) -> Self {
        let disk = DiskGeometry::for_black_hole(&black_hole);
        Self {
            camera: OrbitCamera::default(),
            toggles: DisplayToggles::default(),
            render: RenderSettings::default(),
            black_hole,
            disk,
        }
    }

    pub fn from_preset(preset: Preset) -> Self {
        Self::new(preset.black_hole())
    }

    /// Load a preset's mass and spin and move the disk back onto the new ISCO
    pub fn apply_preset(&mut self, preset: Preset) {
        self.black_hole.set_mass(preset.mass());
        self.black_hole.set_spin(preset.spin());
        self.fit_disk_to_black_hole();
        log::info!(
            "preset {}: mass {} M☉, spin {}",
            preset.name(),
            self.black_hole.mass(),
            self.black_hole.spin()
        );
    }

    /// Reset the disk geometry to the defaults for the current hole
    pub fn fit_disk_to_black_hole(&mut self) {
        self.disk = DiskGeometry::for_black_hole(&self.black_hole);
    }

    pub fn black_hole(&self) -> &BlackHole {
        &self.black_hole
    }

    pub fn black_hole_mut(&mut self) -> &mut BlackHole {
        &mut self.black_hole
    }

    /// The disk bound to the current black hole
    pub fn disk(&self) -> AccretionDisk<'_> {
        AccretionDisk::with_geometry(&self.black_hole, self.disk)
    }

    pub fn disk_geometry(&self) -> &DiskGeometry {
        &self.disk
    }

    pub fn disk_geometry_mut(&mut self) -> &mut DiskGeometry {
        &mut self.disk
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.update_aspect_ratio(width as f32 / height as f32);
        }
    }

    /// Per-frame update; run all gestures for the frame before calling this
    pub fn update(&mut self, dt: f32) {
        self.camera.update(dt);
    }

    /// Snapshot for the renderer. Take it after the frame's mutations.
    pub fn snapshot(&self) -> FrameSnapshot {
        let snapshot = FrameSnapshot {
            camera_position: self.camera.position(),
            camera_target: self.camera.target(),
            camera_up: self.camera.up(),
            fov: self.camera.fov(),
            aspect_ratio: self.camera.aspect_ratio(),
            view_proj: self.camera.view_projection(),

            black_hole_mass: self.black_hole.mass(),
            black_hole_spin: self.black_hole.spin(),
            black_hole_position: self.black_hole.position(),
            schwarzschild_radius: self.black_hole.schwarzschild_radius(),

            show_accretion_disk: self.toggles.show_accretion_disk,
            disk_inner_radius: self.disk.inner_radius(),
            disk_outer_radius: self.disk.outer_radius(),
            disk_thickness: self.disk.thickness(),
            disk_inclination: self.disk.inclination(),

            show_event_horizon: self.toggles.show_event_horizon,
            show_photon_sphere: self.toggles.show_photon_sphere,

            max_steps: self.render.quality.max_steps(),
            exposure: self.render.exposure(),
            bloom: self.render.bloom,
        };
        log::trace!("{:?}", snapshot);
        snapshot
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(BlackHole::default())
    }
}
