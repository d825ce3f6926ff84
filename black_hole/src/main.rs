//! Headless driver for the black hole scene
//!
//! Builds a scene from a preset (optionally overriding mass and spin), prints
//! the derived radii, then runs a scripted orbit through the same
//! input -> controller -> update -> snapshot path an interactive host uses,
//! and finishes with the final frame snapshot and a radial disk profile.
//!
//! Example:
//!   RUST_LOG=debug black_hole --preset near-maximal-kerr --frames 240

use anyhow::{ensure, Result};
use clap::Parser;
use glam::Vec3;
use winit::event::{ElementState, MouseButton};

use black_hole::units::MAX_SPIN;
use black_hole::{BlackHole, CameraController, FrameSnapshot, FrameUniforms, Preset, Quality, Scene};
use common::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use common::InputState;

const FRAME_DT: f32 = 1.0 / 60.0;
const PROFILE_SAMPLES: usize = 8;

#[derive(Parser, Debug)]
#[command(author, version, about = "Kerr black hole scene driver (headless)")]
struct Cli {
    #[arg(long, value_enum, default_value_t = Preset::Supermassive)]
    preset: Preset,
    /// Override the preset mass, in solar masses
    #[arg(long)]
    mass: Option<f32>,
    /// Override the preset spin, 0 <= a < 1
    #[arg(long)]
    spin: Option<f32>,
    /// Number of 60 Hz frames to simulate
    #[arg(long, default_value_t = 120)]
    frames: u32,
    /// Scripted orbit rate in radians per second
    #[arg(long, default_value_t = 0.5)]
    orbit_speed: f32,
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,
    #[arg(long, value_enum, default_value_t = Quality::Medium)]
    quality: Quality,
}

fn validate(cli: &Cli) -> Result<()> {
    ensure!(cli.width > 0 && cli.height > 0, "resolution must be non-zero");
    ensure!(cli.orbit_speed.is_finite(), "orbit speed must be finite");
    if let Some(mass) = cli.mass {
        ensure!(mass.is_finite() && mass > 0.0, "mass must be a positive number of solar masses");
    }
    if let Some(spin) = cli.spin {
        ensure!((0.0..1.0).contains(&spin), "spin must satisfy 0 <= a < 1");
        if spin > MAX_SPIN {
            log::warn!("spin {} will be clamped to {}", spin, MAX_SPIN);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    validate(&cli)?;

    let mut scene = Scene::from_preset(cli.preset);
    if cli.mass.is_some() || cli.spin.is_some() {
        if let Some(mass) = cli.mass {
            scene.black_hole_mut().set_mass(mass);
        }
        if let Some(spin) = cli.spin {
            scene.black_hole_mut().set_spin(spin);
        }
        scene.fit_disk_to_black_hole();
    }
    scene.render.quality = cli.quality;
    scene.resize(cli.width, cli.height);

    log::info!("{} ({}x{}, {} quality)", cli.preset.name(), cli.width, cli.height, cli.quality.name());
    print_properties(scene.black_hole());

    let mut input = InputState::new();
    let mut controller = CameraController::new();
    // Dragging left by this many pixels per frame orbits at `orbit_speed`
    let pixels_per_frame = (cli.orbit_speed * FRAME_DT / controller.orbit_sensitivity) as f64;

    let mut cursor_x = 0.0;
    input.process_cursor_move(cursor_x, 0.0);
    input.process_mouse_button(MouseButton::Left, ElementState::Pressed);

    for frame in 0..cli.frames {
        cursor_x -= pixels_per_frame;
        input.process_cursor_move(cursor_x, 0.0);

        controller.apply(&input, &mut scene, FRAME_DT, false, false);
        scene.update(FRAME_DT);

        let uniforms = FrameUniforms::from_scene(&scene);
        log::trace!("frame {}: {} uniform bytes", frame, uniforms.as_bytes().len());

        input.end_frame();
    }
    input.process_mouse_button(MouseButton::Left, ElementState::Released);
    log::info!("simulated {} frames", cli.frames);

    print_snapshot(&scene.snapshot());
    print_disk_profile(&scene);

    Ok(())
}

fn print_properties(black_hole: &BlackHole) {
    let props = black_hole.properties();
    println!("Black hole");
    println!("  mass                 {:>12.4e} M☉", props.mass);
    println!("  spin                 {:>12.3}", props.spin);
    println!("  Schwarzschild radius {:>12.4}", props.schwarzschild_radius);
    println!("  event horizon        {:>12.4}", props.event_horizon);
    println!("  photon sphere        {:>12.4}", props.photon_sphere);
    println!("  ISCO                 {:>12.4}", props.isco);
    println!("  ergosphere (equator) {:>12.4}", props.ergosphere_equator);
}

fn print_snapshot(snapshot: &FrameSnapshot) {
    println!("Final frame");
    println!("  camera position      {:.3}", snapshot.camera_position);
    println!("  camera target        {:.3}", snapshot.camera_target);
    println!("  camera up            {:.3}", snapshot.camera_up);
    println!("  fov / aspect         {:.1} / {:.3}", snapshot.fov, snapshot.aspect_ratio);
    println!(
        "  disk                 {:.3}..{:.3} (thickness {:.2}, shown: {})",
        snapshot.disk_inner_radius,
        snapshot.disk_outer_radius,
        snapshot.disk_thickness,
        snapshot.show_accretion_disk
    );
    println!(
        "  horizon / photon sphere shown: {} / {}",
        snapshot.show_event_horizon, snapshot.show_photon_sphere
    );
    println!("  ray-march steps      {}", snapshot.max_steps);
    println!("  exposure / bloom     {:.2} / {}", snapshot.exposure, snapshot.bloom);
}

fn print_disk_profile(scene: &Scene) {
    let disk = scene.disk();
    let black_hole = scene.black_hole();
    let camera = scene.camera.position();
    let (inner, outer) = (disk.inner_radius(), disk.outer_radius());

    println!("Disk profile (Doppler towards the camera at phi = 0 and phi = pi)");
    println!(
        "  {:>8} {:>10} {:>22} {:>8} {:>8} {:>10}",
        "r", "T [K]", "emission", "δ(0)", "δ(π)", "ω_drag"
    );
    for i in 0..PROFILE_SAMPLES {
        let r = inner + (outer - inner) * i as f32 / (PROFILE_SAMPLES - 1) as f32;
        let temperature = disk.temperature(r);
        let emission = disk.emission(r, temperature);

        let front = Vec3::new(r, 0.0, 0.0);
        let back = Vec3::new(-r, 0.0, 0.0);
        let doppler_front = disk.doppler_factor(front, camera - front);
        let doppler_back = disk.doppler_factor(back, camera - back);

        println!(
            "  {:>8.3} {:>10.0} {:>22} {:>8.3} {:>8.3} {:>10.3e}",
            r,
            temperature,
            format!("{:.2}", emission),
            doppler_front,
            doppler_back,
            black_hole.frame_dragging_velocity(r, std::f32::consts::FRAC_PI_2)
        );
    }
}
