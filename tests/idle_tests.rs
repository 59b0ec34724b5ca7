mod common;

use common::{approx, ConstantNoise, CyclingNoise};
use rand::rngs::StdRng;
use rand::SeedableRng;
use viewer_core::constants::{IDLE_DRIFT_GROWTH, IDLE_DRIFT_INITIAL, INITIAL_ELEVATION};
use viewer_core::idle::light_orbit;
use viewer_core::{CameraState, ColorState, IdleAnimator, NoiseSource, RngNoise};

const DT: f32 = 1.0 / 144.0;

#[test]
fn one_tick_spins_sways_and_drifts() {
    let mut idle = IdleAnimator::default();
    let mut cam = CameraState::default();
    let mut color = ColorState::default();
    let light = idle.tick(DT, &mut cam, &mut color, &mut ConstantNoise(0.5));

    assert!(approx(idle.phase_time(), DT));
    assert!(approx(cam.azimuth, DT * 0.1));
    let sway = (DT * 0.1).sin() * -IDLE_DRIFT_INITIAL;
    assert!(approx(cam.elevation, INITIAL_ELEVATION + sway));
    assert!(approx(idle.drift(), IDLE_DRIFT_INITIAL + IDLE_DRIFT_GROWTH));

    let step = 0.5 * DT * 1.6;
    assert!(approx(color.r, step) && approx(color.g, step) && approx(color.b, step));
    assert_eq!(light, light_orbit(DT));
}

#[test]
fn colour_stays_clamped_for_extreme_noise() {
    for noise in [1.0_f32, -1.0] {
        let mut idle = IdleAnimator::default();
        let mut cam = CameraState::default();
        let mut color = ColorState::default();
        for _ in 0..10_000 {
            idle.tick(0.5, &mut cam, &mut color, &mut ConstantNoise(noise));
            for c in [color.r, color.g, color.b] {
                assert!((-1.0..=1.0).contains(&c));
            }
        }
        assert_eq!(color.r, noise);
    }
}

#[test]
fn colour_stays_clamped_for_random_noise() {
    let mut idle = IdleAnimator::default();
    let mut cam = CameraState::default();
    let mut color = ColorState::default();
    let mut noise = RngNoise(StdRng::seed_from_u64(7));
    for _ in 0..5_000 {
        idle.tick(DT, &mut cam, &mut color, &mut noise);
        for c in [color.r, color.g, color.b] {
            assert!((-1.0..=1.0).contains(&c));
        }
    }
}

#[test]
fn rng_noise_is_signed_and_bounded() {
    let mut noise = RngNoise(StdRng::seed_from_u64(42));
    let samples: Vec<f32> = (0..1000).map(|_| noise.signed()).collect();
    assert!(samples.iter().all(|v| (-1.0..=1.0).contains(v)));
    assert!(samples.iter().any(|v| *v < 0.0));
    assert!(samples.iter().any(|v| *v > 0.0));
}

#[test]
fn channels_draw_independent_noise() {
    let mut idle = IdleAnimator::default();
    let mut cam = CameraState::default();
    let mut color = ColorState::default();
    let mut noise = CyclingNoise {
        values: vec![1.0, 0.0, -1.0],
        next: 0,
    };
    idle.tick(0.1, &mut cam, &mut color, &mut noise);
    assert!(color.r > 0.0);
    assert_eq!(color.g, 0.0);
    assert!(color.b < 0.0);
}

#[test]
fn drift_grows_every_tick_and_is_never_reset() {
    let mut idle = IdleAnimator::default();
    let mut cam = CameraState::default();
    let mut color = ColorState::default();
    for _ in 0..1000 {
        idle.tick(DT, &mut cam, &mut color, &mut ConstantNoise(0.0));
    }
    assert!(approx(idle.drift(), IDLE_DRIFT_INITIAL + 1000.0 * IDLE_DRIFT_GROWTH));
}

#[test]
fn light_orbit_is_fixed_function_of_time() {
    let p = light_orbit(0.0);
    assert!(approx(p.x, 0.0) && approx(p.y, 10.0) && approx(p.z, 0.0));
    let t = 3.0_f32;
    let q = light_orbit(t);
    assert!(approx(q.x, (t * 0.5).sin() * 10.0));
    assert!(approx(q.y, (t * 0.5).cos() * 10.0));
    assert_eq!(q.x, q.z);
    assert!((q.length_squared() - q.z * q.z - 100.0).abs() < 1e-3);
}
