//! Kerr black hole visualization core
//!
//! Derives the radii and kinematics of a rotating black hole and its
//! accretion disk, and packs them together with the orbit camera into a
//! per-frame snapshot for an external ray-marching renderer:
//! - `physics`: mass/spin → Schwarzschild radius, ISCO, photon sphere,
//!   ergosphere, horizon, frame dragging
//! - `disk`: temperature, Keplerian velocity, emission, Doppler factor,
//!   ray/disk intersection
//! - `scene`: presets, display toggles, frame snapshot
//! - `uniforms`: GPU layout of the snapshot
//! - `controller`: input → camera gestures
//!
//! Lengths use a rescaled, visualization-oriented unit system, not SI.

pub mod controller;
pub mod disk;
pub mod physics;
pub mod scene;
pub mod uniforms;
pub mod units;

pub use controller::CameraController;
pub use disk::{AccretionDisk, DiskGeometry, DiskHit};
pub use physics::{BlackHole, BlackHoleProperties};
pub use scene::{DisplayToggles, FrameSnapshot, Preset, Quality, RenderSettings, Scene};
pub use uniforms::FrameUniforms;
