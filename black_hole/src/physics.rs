//! Black hole physics
//!
//! Closed-form Kerr relations (ISCO, photon sphere, ergosphere, horizon,
//! frame dragging) evaluated on a visualization-scaled Schwarzschild radius.
//! With spin below `SPIN_EPSILON` every Kerr formula falls back to its
//! Schwarzschild limit, which also keeps the square roots and divisions away
//! from their degenerate inputs.

use glam::Vec3;

use crate::units::{DEFAULT_MASS, DEFAULT_SPIN, MAX_SPIN, MIN_MASS, MIN_SPIN, SPIN_EPSILON};
use common::constants::EPSILON;

/// Reference mass (solar masses) for the radius scaling
pub const BASE_MASS: f32 = 10.0;
/// Schwarzschild radius drawn for a `BASE_MASS` hole
pub const BASE_RADIUS: f32 = 2.0;
/// Radius added per decade of mass above `BASE_MASS`
pub const LOG_SCALE: f32 = 0.4;
/// Smallest radius that still reads on screen
pub const MIN_VISIBLE_RADIUS: f32 = 1.0;

/// Rotating (Kerr) or static (Schwarzschild) black hole
#[derive(Debug, Clone, PartialEq)]
pub struct BlackHole {
    mass: f32,
    spin: f32,
    position: Vec3,
    // Derived from mass and spin; only `update_derived_quantities` writes these
    schwarzschild_radius: f32,
    spin_parameter: f32,
}

/// Every derived radius of a black hole at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackHoleProperties {
    pub mass: f32,
    pub spin: f32,
    pub schwarzschild_radius: f32,
    pub event_horizon: f32,
    pub photon_sphere: f32,
    pub isco: f32,
    pub ergosphere_equator: f32,
}

impl BlackHole {
    /// `mass` in solar masses, `spin` dimensionless; both are clamped
    pub fn new(mass: f32, spin: f32) -> Self {
        let mut black_hole = Self {
            mass: MIN_MASS,
            spin: MIN_SPIN,
            position: Vec3::ZERO,
            schwarzschild_radius: 0.0,
            spin_parameter: 0.0,
        };
        black_hole.mass = clamp_mass(mass);
        black_hole.spin = clamp_spin(spin);
        black_hole.update_derived_quantities();
        black_hole
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = clamp_mass(mass);
        self.update_derived_quantities();
    }

    pub fn set_spin(&mut self, spin: f32) {
        self.spin = clamp_spin(spin);
        self.update_derived_quantities();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Kerr parameter `a = spin * M` in the same length units as the radius
    pub fn spin_parameter(&self) -> f32 {
        self.spin_parameter
    }

    /// Gravitational radius `M = Rs / 2`
    pub fn gravitational_radius(&self) -> f32 {
        self.schwarzschild_radius * 0.5
    }

    /// True when the hole is treated as non-rotating
    pub fn is_schwarzschild(&self) -> bool {
        self.spin < SPIN_EPSILON
    }

    /// Visualization-scaled Schwarzschild radius.
    ///
    /// This is not `2GM/c²`: a stellar hole and M87* differ by nine orders of
    /// magnitude in mass, so the radius grows with log10 of the mass above
    /// `BASE_MASS` and linearly below it, with a floor of `MIN_VISIBLE_RADIUS`.
    pub fn schwarzschild_radius(&self) -> f32 {
        self.schwarzschild_radius
    }

    /// Prograde innermost stable circular orbit (Bardeen, Press & Teukolsky 1972).
    /// Equals `6M` for a non-rotating hole and shrinks towards `M` as spin → 1.
    pub fn isco(&self) -> f32 {
        let a = self.spin;
        let z1 = 1.0
            + (1.0 - a * a).powf(1.0 / 3.0) * ((1.0 + a).powf(1.0 / 3.0) + (1.0 - a).powf(1.0 / 3.0));
        let z2 = (3.0 * a * a + z1 * z1).sqrt();

        // z1 can round a hair above 3 for tiny spins
        let root = ((3.0 - z1) * (3.0 + z1 + 2.0 * z2)).max(0.0).sqrt();

        self.gravitational_radius() * (3.0 + z2 - root)
    }

    /// Radius of the (prograde) circular photon orbit, `Rs (1 + cos(2/3 acos(-a)))`.
    ///
    /// Once the scaled radius grows past 2 the Kerr parameter leaves the acos
    /// domain; it is clamped there, which pins the orbit at `Rs / 2`.
    pub fn photon_sphere_radius(&self) -> f32 {
        if self.is_schwarzschild() {
            return 1.5 * self.schwarzschild_radius;
        }

        let angle = (-self.spin_parameter).clamp(-1.0, 1.0).acos();
        self.schwarzschild_radius * (1.0 + (2.0 / 3.0 * angle).cos())
    }

    /// Outer boundary of the ergosphere at polar angle `theta`
    pub fn ergosphere_radius(&self, theta: f32) -> f32 {
        if self.is_schwarzschild() {
            return self.schwarzschild_radius;
        }

        let m = self.gravitational_radius();
        let a = self.spin_parameter;
        let cos_theta = theta.cos();

        m + (m * m - a * a * cos_theta * cos_theta).max(0.0).sqrt()
    }

    /// Outer event horizon `r+ = M + sqrt(M² - a²)`.
    ///
    /// `_theta` is accepted for symmetry with `ergosphere_radius`; the Kerr
    /// horizon is a sphere in Boyer-Lindquist radius.
    pub fn event_horizon_radius(&self, _theta: f32) -> f32 {
        if self.is_schwarzschild() {
            return self.schwarzschild_radius;
        }

        let m = self.gravitational_radius();
        let a = self.spin_parameter;

        m + (m * m - a * a).max(0.0).sqrt()
    }

    /// Lense-Thirring angular velocity `ω = 2Mar / (r⁴ + a²r² + 2Ma²r)`
    pub fn frame_dragging_velocity(&self, r: f32, _theta: f32) -> f32 {
        if self.is_schwarzschild() {
            return 0.0;
        }

        let m = self.gravitational_radius();
        let a = self.spin_parameter;
        let r2 = r * r;
        let a2 = a * a;

        let numerator = 2.0 * m * a * r;
        let denominator = r2 * r2 + a2 * r2 + 2.0 * m * a2 * r;

        if denominator < EPSILON {
            return 0.0;
        }

        numerator / denominator
    }

    pub fn properties(&self) -> BlackHoleProperties {
        BlackHoleProperties {
            mass: self.mass,
            spin: self.spin,
            schwarzschild_radius: self.schwarzschild_radius,
            event_horizon: self.event_horizon_radius(0.0),
            photon_sphere: self.photon_sphere_radius(),
            isco: self.isco(),
            ergosphere_equator: self.ergosphere_radius(std::f32::consts::FRAC_PI_2),
        }
    }

    fn update_derived_quantities(&mut self) {
        self.schwarzschild_radius = scaled_schwarzschild_radius(self.mass);
        self.spin_parameter = self.spin * self.schwarzschild_radius * 0.5;
    }
}

impl Default for BlackHole {
    fn default() -> Self {
        Self::new(DEFAULT_MASS, DEFAULT_SPIN)
    }
}

/// Log/linear radius scaling used for display
pub fn scaled_schwarzschild_radius(mass: f32) -> f32 {
    let radius = if mass > BASE_MASS {
        BASE_RADIUS + LOG_SCALE * (mass / BASE_MASS).log10()
    } else {
        BASE_RADIUS * (mass / BASE_MASS)
    };

    radius.max(MIN_VISIBLE_RADIUS)
}

fn clamp_mass(mass: f32) -> f32 {
    // NaN compares false everywhere, so treat it as the floor
    if mass.is_nan() || mass < MIN_MASS {
        log::debug!("mass {} clamped to {}", mass, MIN_MASS);
        MIN_MASS
    } else {
        mass
    }
}

fn clamp_spin(spin: f32) -> f32 {
    if spin.is_nan() {
        log::debug!("spin NaN clamped to {}", MIN_SPIN);
        return MIN_SPIN;
    }
    let clamped = spin.clamp(MIN_SPIN, MAX_SPIN);
    if clamped != spin {
        log::debug!("spin {} clamped to {}", spin, clamped);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_reference_mass_uses_linear_branch() {
        let bh = BlackHole::new(10.0, 0.0);
        assert!((bh.schwarzschild_radius() - 2.0).abs() < 1e-6);
        assert_eq!(bh.spin_parameter(), 0.0);
    }

    #[test]
    fn test_m87_uses_log_branch() {
        let bh = BlackHole::new(6.5e9, 0.9);
        let expected = BASE_RADIUS + LOG_SCALE * (6.5e9f32 / BASE_MASS).log10();
        assert!((bh.schwarzschild_radius() - expected).abs() < 1e-4);
        assert!(bh.schwarzschild_radius() > BASE_RADIUS);
        assert!(bh.event_horizon_radius(0.0) < bh.schwarzschild_radius());
    }

    #[test]
    fn test_small_mass_hits_visibility_floor() {
        let bh = BlackHole::new(2.0, 0.0);
        assert_eq!(bh.schwarzschild_radius(), MIN_VISIBLE_RADIUS);
    }

    #[test]
    fn test_mass_and_spin_are_clamped() {
        let mut bh = BlackHole::new(-5.0, 3.0);
        assert_eq!(bh.mass(), MIN_MASS);
        assert_eq!(bh.spin(), MAX_SPIN);

        bh.set_spin(-1.0);
        assert_eq!(bh.spin(), MIN_SPIN);
        bh.set_mass(f32::NAN);
        assert_eq!(bh.mass(), MIN_MASS);
        assert!(bh.schwarzschild_radius().is_finite());
    }

    #[test]
    fn test_derived_quantities_follow_setters() {
        let mut bh = BlackHole::new(10.0, 0.5);
        let before = bh.schwarzschild_radius();
        bh.set_mass(1.0e6);
        assert!(bh.schwarzschild_radius() > before);
        assert!((bh.spin_parameter() - 0.5 * bh.schwarzschild_radius() * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_isco_schwarzschild_limit() {
        for mass in [1.0, 10.0, 4.31e6, 6.5e9] {
            let bh = BlackHole::new(mass, 0.0);
            let expected = 6.0 * bh.schwarzschild_radius() / 2.0;
            assert!((bh.isco() - expected).abs() < 1e-4, "mass {}", mass);
        }
    }

    #[test]
    fn test_isco_shrinks_with_spin() {
        let mut bh = BlackHole::new(10.0, 0.0);
        let mut last = bh.isco();
        let mut spin = 0.0;
        while spin <= MAX_SPIN {
            bh.set_spin(spin);
            let isco = bh.isco();
            assert!(isco <= last + 1e-5, "spin {}: {} > {}", spin, isco, last);
            assert!(isco > 0.0);
            last = isco;
            spin += 0.002;
        }
        // Near-maximal spin brings the ISCO close to M
        bh.set_spin(MAX_SPIN);
        assert!(bh.isco() < 1.5 * bh.gravitational_radius());
    }

    #[test]
    fn test_event_horizon_bounds() {
        let mut bh = BlackHole::new(6.5e9, 0.0);
        let rs = bh.schwarzschild_radius();
        assert_eq!(bh.event_horizon_radius(0.0), rs);

        bh.set_spin(0.009);
        assert_eq!(bh.event_horizon_radius(0.0), rs);

        let mut spin = 0.0;
        while spin <= MAX_SPIN {
            bh.set_spin(spin);
            let horizon = bh.event_horizon_radius(0.0);
            assert!(horizon <= rs);
            assert!(horizon >= bh.gravitational_radius());
            spin += 0.01;
        }
    }

    #[test]
    fn test_photon_sphere() {
        let mut bh = BlackHole::new(10.0, 0.0);
        assert_eq!(bh.photon_sphere_radius(), 3.0);

        // Continuous across the threshold
        bh.set_spin(SPIN_EPSILON);
        assert!((bh.photon_sphere_radius() - 3.0).abs() < 0.05);

        // Shrinks towards M for a maximal prograde orbit, stays finite at huge masses
        bh.set_spin(MAX_SPIN);
        assert!(bh.photon_sphere_radius() < 1.5 * bh.schwarzschild_radius());
        assert!(bh.photon_sphere_radius() > bh.event_horizon_radius(0.0));

        // Past Rs = 2 the Kerr parameter saturates the acos argument
        bh.set_mass(6.5e9);
        assert!(bh.spin_parameter() > 1.0);
        assert!((bh.photon_sphere_radius() - 0.5 * bh.schwarzschild_radius()).abs() < 1e-5);
    }

    #[test]
    fn test_photon_sphere_uses_raw_kerr_parameter() {
        // Stellar preset: Rs floors at 1, so a = 0.35 is not a/M
        let bh = BlackHole::new(5.0, 0.7);
        assert_eq!(bh.schwarzschild_radius(), 1.0);
        assert!((bh.spin_parameter() - 0.35).abs() < 1e-6);

        let expected = 1.0 + (2.0 / 3.0 * (-0.35f32).acos()).cos();
        assert!((bh.photon_sphere_radius() - expected).abs() < 1e-5);
        assert!((bh.photon_sphere_radius() - 1.2814).abs() < 1e-3);
    }

    #[test]
    fn test_ergosphere() {
        let mut bh = BlackHole::new(10.0, 0.0);
        assert_eq!(bh.ergosphere_radius(0.3), bh.schwarzschild_radius());

        bh.set_spin(0.9);
        // Touches the horizon at the poles, reaches 2M at the equator
        assert!((bh.ergosphere_radius(0.0) - bh.event_horizon_radius(0.0)).abs() < 1e-5);
        assert!((bh.ergosphere_radius(FRAC_PI_2) - bh.schwarzschild_radius()).abs() < 1e-5);
        assert!(bh.ergosphere_radius(FRAC_PI_2) > bh.event_horizon_radius(0.0));
    }

    #[test]
    fn test_frame_dragging() {
        let mut bh = BlackHole::new(10.0, 0.0);
        assert_eq!(bh.frame_dragging_velocity(3.0, FRAC_PI_2), 0.0);

        bh.set_spin(0.9);
        let near = bh.frame_dragging_velocity(3.0, FRAC_PI_2);
        let far = bh.frame_dragging_velocity(300.0, FRAC_PI_2);
        let very_far = bh.frame_dragging_velocity(1.0e4, FRAC_PI_2);
        assert!(near > far);
        assert!(far > very_far);
        assert!(very_far < 1e-7);

        // Denominator guard at the singularity
        assert_eq!(bh.frame_dragging_velocity(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_properties_snapshot() {
        let bh = BlackHole::default();
        let props = bh.properties();
        assert_eq!(props.mass, DEFAULT_MASS);
        assert_eq!(props.isco, bh.isco());
        assert_eq!(props.photon_sphere, bh.photon_sphere_radius());

        let props = BlackHole::new(10.0, 0.9).properties();
        assert!(props.event_horizon < props.photon_sphere);
        assert!(props.photon_sphere < props.isco);
    }
}
