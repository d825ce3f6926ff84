//! Unit conversions and color helpers
//!
//! Everything here is a pure function. Lengths in the rest of the crate are in
//! visualization units (see `BlackHole::schwarzschild_radius`), velocities are
//! in geometric units where c = 1.

use common::constants::{GRAVITATIONAL_CONSTANT, SOLAR_MASS, SPEED_OF_LIGHT};
use glam::Vec3;

/// Black hole parameters
pub const DEFAULT_MASS: f32 = 4.31e6; // Sagittarius A*, solar masses
pub const DEFAULT_SPIN: f32 = 0.9;
pub const MIN_MASS: f32 = 0.1;
pub const MIN_SPIN: f32 = 0.0; // Schwarzschild
pub const MAX_SPIN: f32 = 0.998; // Thorne limit for disk spin-up

/// Below this spin the Kerr formulas are replaced by their Schwarzschild limits
pub const SPIN_EPSILON: f32 = 0.01;

/// Accretion disk parameters
pub const DISK_OUTER_RADIUS_FACTOR: f32 = 15.0; // in Schwarzschild radii
pub const DISK_THICKNESS: f32 = 0.5;
pub const DISK_TEMPERATURE_K: f32 = 1.0e5;

/// Upper bound on v/c for disk material
pub const MAX_BETA: f32 = 0.99;

/// Bounds applied to the disk Doppler factor
pub const MIN_DOPPLER: f32 = 0.1;
pub const MAX_DOPPLER: f32 = 10.0;

/// Physical Schwarzschild radius `2GM/c²` in metres. Informational only; the
/// scene uses the rescaled radius from `BlackHole`.
pub fn physical_schwarzschild_radius(mass_in_solar_masses: f64) -> f64 {
    2.0 * GRAVITATIONAL_CONSTANT * mass_in_solar_masses * SOLAR_MASS / (SPEED_OF_LIGHT * SPEED_OF_LIGHT)
}

/// Convert a blackbody temperature in Kelvin to an RGB color.
///
/// Empirical Planckian-locus fit on temperature/1000 clamped to `[1, 40]`,
/// with the usual break at 66. Each channel is clamped to `[0, 1]`.
pub fn temperature_to_rgb(kelvin: f32) -> Vec3 {
    let t = (kelvin / 1000.0).clamp(1.0, 40.0);

    let r = if t <= 66.0 {
        1.0
    } else {
        (1.292_936_2 * (t - 60.0).powf(-0.133_204_76)).clamp(0.0, 1.0)
    };

    let g = if t <= 66.0 {
        (0.390_081_58 * t.ln() - 0.631_841_43).clamp(0.0, 1.0)
    } else {
        (1.129_890_9 * (t - 60.0).powf(-0.075_514_85)).clamp(0.0, 1.0)
    };

    let b = if t >= 66.0 {
        1.0
    } else if t <= 19.0 {
        0.0
    } else {
        (0.543_206_8 * (t - 10.0).ln() - 1.196_254_1).clamp(0.0, 1.0)
    };

    Vec3::new(r, g, b)
}

/// Lorentz factor γ = 1/sqrt(1 - β²), with β capped at `MAX_BETA`
pub fn lorentz_factor(beta: f32) -> f32 {
    let beta = beta.abs().min(MAX_BETA);
    1.0 / (1.0 - beta * beta).sqrt()
}

/// Relativistic Doppler factor δ = 1/(γ(1 - β cosθ)).
///
/// `beta` is v/c, `cos_theta` the cosine between the emitter's motion and the
/// direction towards the observer. β is capped at `MAX_BETA` so γ stays finite.
pub fn doppler_factor(beta: f32, cos_theta: f32) -> f32 {
    let beta = beta.abs().min(MAX_BETA);
    let cos_theta = cos_theta.clamp(-1.0, 1.0);
    1.0 / (lorentz_factor(beta) * (1.0 - beta * cos_theta))
}
