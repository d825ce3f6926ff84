//! Common utilities for the black hole visualization
//!
//! This crate provides the orbit camera, the owned input state, and the
//! physical/rendering constants shared by the physics crate and any host
//! application that drives it.

pub mod camera;
pub mod input;

pub use camera::*;
pub use input::*;

/// Physical constants (SI) and the simulation unit system
pub mod constants {
    /// Speed of light in m/s
    pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

    /// Gravitational constant in m³ kg⁻¹ s⁻²
    pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

    /// Solar mass in kg
    pub const SOLAR_MASS: f64 = 1.988_92e30;

    /// Planck constant in J·s
    pub const PLANCK_CONSTANT: f64 = 6.626_070_15e-34;

    /// Boltzmann constant in J/K
    pub const BOLTZMANN_CONSTANT: f64 = 1.380_649e-23;

    /// Stefan-Boltzmann constant in W m⁻² K⁻⁴
    pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

    // Simulation units are geometric (G = c = 1)
    pub const UNIT_MASS: f32 = 1.0; // solar masses
    pub const UNIT_LENGTH: f32 = 1.0; // Schwarzschild radii
    pub const UNIT_TIME: f32 = 1.0; // GM/c³

    /// Speed of light in simulation units
    pub const C: f32 = 1.0;

    pub const DEFAULT_WIDTH: u32 = 1920;
    pub const DEFAULT_HEIGHT: u32 = 1080;
    pub const DEFAULT_FOV: f32 = 60.0;
    pub const NEAR_PLANE: f32 = 0.1;
    pub const FAR_PLANE: f32 = 1000.0;

    /// Numeric guard shared by the intersection and frame-dragging math
    pub const EPSILON: f32 = 1e-6;
}
