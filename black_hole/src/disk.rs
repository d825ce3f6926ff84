//! Accretion disk model
//!
//! A thin disk in the `y = 0` plane around a borrowed `BlackHole`. Radii are
//! in the same visualization units as the hole's Schwarzschild radius and
//! every query reads the hole's current state, so nothing goes stale when the
//! mass or spin changes.

use glam::{Vec3, Vec3Swizzles};

use crate::physics::BlackHole;
use crate::units::{
    self, temperature_to_rgb, DISK_OUTER_RADIUS_FACTOR, DISK_TEMPERATURE_K, DISK_THICKNESS,
    MAX_BETA, MAX_DOPPLER, MIN_DOPPLER,
};
use common::constants::{C, EPSILON};

/// Smallest allowed inner radius
pub const MIN_DISK_RADIUS: f32 = 0.1;
/// Smallest allowed gap between inner and outer radius
pub const MIN_DISK_WIDTH: f32 = 0.1;
/// Brightness cap near the inner edge
pub const MAX_INTENSITY: f32 = 10.0;

/// Shape and kinematics of a disk, independent of the hole it orbits.
///
/// Setters keep `0 < inner_radius < outer_radius`, `thickness >= 0` and
/// `rotation_speed >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskGeometry {
    inner_radius: f32,
    outer_radius: f32,
    thickness: f32,
    inclination: f32,
    rotation_speed: f32,
    peak_temperature: f32,
}

impl DiskGeometry {
    pub fn new(inner_radius: f32, outer_radius: f32, thickness: f32) -> Self {
        let inner_radius = finite_or(inner_radius, MIN_DISK_RADIUS).max(MIN_DISK_RADIUS);
        Self {
            inner_radius,
            outer_radius: finite_or(outer_radius, 0.0).max(inner_radius + min_width(inner_radius)),
            thickness: finite_or(thickness, 0.0).max(0.0),
            inclination: 0.0,
            rotation_speed: 1.0,
            peak_temperature: DISK_TEMPERATURE_K,
        }
    }

    /// Inner edge at the hole's ISCO, outer edge at 15 Schwarzschild radii
    pub fn for_black_hole(black_hole: &BlackHole) -> Self {
        Self::new(
            black_hole.isco(),
            black_hole.schwarzschild_radius() * DISK_OUTER_RADIUS_FACTOR,
            DISK_THICKNESS,
        )
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Tilt in radians. Carried to the renderer; the disk math itself works in the unrotated plane.
    pub fn inclination(&self) -> f32 {
        self.inclination
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn peak_temperature(&self) -> f32 {
        self.peak_temperature
    }

    pub fn set_inner_radius(&mut self, radius: f32) {
        let max = (self.outer_radius - min_width(self.outer_radius)).max(MIN_DISK_RADIUS);
        let clamped = finite_or(radius, self.inner_radius).clamp(MIN_DISK_RADIUS, max);
        if clamped != radius {
            log::debug!("disk inner radius {} clamped to {}", radius, clamped);
        }
        self.inner_radius = clamped;
    }

    pub fn set_outer_radius(&mut self, radius: f32) {
        let min = self.inner_radius + min_width(self.inner_radius);
        let clamped = finite_or(radius, self.outer_radius).max(min);
        if clamped != radius {
            log::debug!("disk outer radius {} clamped to {}", radius, clamped);
        }
        self.outer_radius = clamped;
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = finite_or(thickness, self.thickness).max(0.0);
    }

    pub fn set_inclination(&mut self, inclination: f32) {
        self.inclination = finite_or(inclination, self.inclination);
    }

    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.rotation_speed = finite_or(speed, self.rotation_speed).max(0.0);
    }

    pub fn set_peak_temperature(&mut self, kelvin: f32) {
        self.peak_temperature = finite_or(kelvin, self.peak_temperature).max(0.0);
    }

    /// True if `radius` lies on the disk annulus
    pub fn contains_radius(&self, radius: f32) -> bool {
        radius >= self.inner_radius && radius <= self.outer_radius
    }
}

/// Where a ray crosses the disk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskHit {
    /// Ray parameter of the hit point
    pub t: f32,
    /// Planar distance from the disk axis
    pub radius: f32,
    /// Azimuth `atan2(z, x)`
    pub phi: f32,
}

/// Accretion disk bound to one black hole.
///
/// The `'bh` lifetime ties the disk to the hole it orbits: the disk cannot
/// outlive the hole, and the hole cannot be mutated while the disk borrows it.
/// To change the hole, keep the `DiskGeometry`, drop the disk, mutate, and
/// bind a new one with `with_geometry`.
#[derive(Debug, Clone, Copy)]
pub struct AccretionDisk<'bh> {
    black_hole: &'bh BlackHole,
    geometry: DiskGeometry,
}

impl<'bh> AccretionDisk<'bh> {
    pub fn new(black_hole: &'bh BlackHole) -> Self {
        Self {
            black_hole,
            geometry: DiskGeometry::for_black_hole(black_hole),
        }
    }

    pub fn with_geometry(black_hole: &'bh BlackHole, geometry: DiskGeometry) -> Self {
        Self {
            black_hole,
            geometry,
        }
    }

    pub fn black_hole(&self) -> &'bh BlackHole {
        self.black_hole
    }

    pub fn geometry(&self) -> DiskGeometry {
        self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut DiskGeometry {
        &mut self.geometry
    }

    pub fn inner_radius(&self) -> f32 {
        self.geometry.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.geometry.outer_radius
    }

    pub fn thickness(&self) -> f32 {
        self.geometry.thickness
    }

    pub fn inclination(&self) -> f32 {
        self.geometry.inclination
    }

    pub fn rotation_speed(&self) -> f32 {
        self.geometry.rotation_speed
    }

    pub fn set_inner_radius(&mut self, radius: f32) {
        self.geometry.set_inner_radius(radius);
    }

    pub fn set_outer_radius(&mut self, radius: f32) {
        self.geometry.set_outer_radius(radius);
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.geometry.set_thickness(thickness);
    }

    pub fn set_inclination(&mut self, inclination: f32) {
        self.geometry.set_inclination(inclination);
    }

    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.geometry.set_rotation_speed(speed);
    }

    /// Thin-disk profile `T = T_peak (r_in / r)^(3/4)`, zero inside the inner edge
    pub fn base_temperature(&self, radius: f32) -> f32 {
        if radius < self.geometry.inner_radius {
            return 0.0;
        }
        self.geometry.peak_temperature * (self.geometry.inner_radius / radius).powf(0.75)
    }

    /// Temperature with a `0.9 + 0.2 sin(10r)` ripple. The ripple is a rendering
    /// texture, not physics.
    pub fn temperature(&self, radius: f32) -> f32 {
        self.base_temperature(radius) * (0.9 + 0.2 * (radius * 10.0).sin())
    }

    /// Keplerian orbital velocity `sqrt(M/r)`, tangential in the disk plane
    pub fn velocity(&self, radius: f32, phi: f32) -> Vec3 {
        let m = self.black_hole.gravitational_radius();
        let v = (m / radius).sqrt() * self.geometry.rotation_speed;

        Vec3::new(-phi.sin() * v, 0.0, phi.cos() * v)
    }

    /// Blackbody color scaled by an inverse-square falloff from the inner edge
    pub fn emission(&self, radius: f32, temperature: f32) -> Vec3 {
        let intensity = (self.geometry.inner_radius / radius)
            .powi(2)
            .clamp(0.0, MAX_INTENSITY);

        temperature_to_rgb(temperature) * intensity
    }

    /// Relativistic Doppler factor of disk material at `position` seen along `observer_dir`.
    ///
    /// Returns exactly 1 off the annulus (and for a non-rotating disk);
    /// otherwise the factor is clamped to `[MIN_DOPPLER, MAX_DOPPLER]`.
    pub fn doppler_factor(&self, position: Vec3, observer_dir: Vec3) -> f32 {
        let radius = position.xz().length();
        if !self.geometry.contains_radius(radius) {
            return 1.0;
        }

        let phi = position.z.atan2(position.x);
        let velocity = self.velocity(radius, phi);
        let Some(motion) = velocity.try_normalize() else {
            return 1.0;
        };

        let beta = (velocity.length() / C).min(MAX_BETA);
        let cos_theta = motion.dot(observer_dir.normalize_or_zero());

        units::doppler_factor(beta, cos_theta).clamp(MIN_DOPPLER, MAX_DOPPLER)
    }

    /// Intersect a ray with the disk plane. `None` means no hit: the ray is
    /// parallel to the plane, the plane is behind the origin, or the crossing
    /// falls outside the annulus or the disk's thickness.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<DiskHit> {
        if direction.y.abs() < EPSILON {
            return None;
        }

        let t = -origin.y / direction.y;
        if t < 0.0 {
            return None;
        }

        let hit = origin + direction * t;
        let radius = hit.xz().length();
        if !self.geometry.contains_radius(radius) {
            return None;
        }

        if hit.y.abs() > self.geometry.thickness {
            return None;
        }

        Some(DiskHit {
            t,
            radius,
            phi: hit.z.atan2(hit.x),
        })
    }
}

/// Gap kept between the radii. Grows with the radius so that adding it
/// still changes the value once `MIN_DISK_WIDTH` falls below one ulp.
fn min_width(radius: f32) -> f32 {
    MIN_DISK_WIDTH.max(radius.abs() * f32::EPSILON * 2.0)
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
