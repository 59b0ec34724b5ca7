//! Procedural drift applied while the user is not steering the camera.

use crate::camera::CameraState;
use crate::constants::{
    COLOR_DRIFT_RATE, IDLE_DRIFT_GROWTH, IDLE_DRIFT_INITIAL, IDLE_SPIN_RATE, IDLE_SWAY_FREQUENCY,
    LIGHT_ORBIT_RADIUS, LIGHT_ORBIT_RATE,
};
use crate::state::ColorState;
use glam::Vec3;
use rand::Rng;

/// Signed noise roughly in [-1, 1]. Distribution is not load-bearing.
pub trait NoiseSource {
    fn signed(&mut self) -> f32;
}

/// Uniform noise over [-1, 1] backed by any `rand` generator.
pub struct RngNoise<R>(pub R);

impl<R: Rng> NoiseSource for RngNoise<R> {
    fn signed(&mut self) -> f32 {
        self.0.gen_range(-1.0..=1.0)
    }
}

#[derive(Clone, Debug)]
pub struct IdleAnimator {
    /// Idle time accumulated across all idle ticks.
    phase_time: f32,
    /// Sway amplitude; grows every tick and is never reset.
    drift: f32,
}

impl Default for IdleAnimator {
    fn default() -> Self {
        Self {
            phase_time: 0.0,
            drift: IDLE_DRIFT_INITIAL,
        }
    }
}

impl IdleAnimator {
    pub fn phase_time(&self) -> f32 {
        self.phase_time
    }

    pub fn drift(&self) -> f32 {
        self.drift
    }

    /// Advance one idle tick: sway and spin the camera, drift the colour,
    /// and return the orbiting light position for this tick.
    pub fn tick<N: NoiseSource + ?Sized>(
        &mut self,
        dt: f32,
        camera: &mut CameraState,
        color: &mut ColorState,
        noise: &mut N,
    ) -> Vec3 {
        self.phase_time += dt;
        camera.elevation += (self.phase_time * IDLE_SWAY_FREQUENCY).sin() * -self.drift;
        self.drift += IDLE_DRIFT_GROWTH;
        camera.azimuth += dt * IDLE_SPIN_RATE;

        let scale = dt * COLOR_DRIFT_RATE;
        let delta = Vec3::new(
            noise.signed() * scale,
            noise.signed() * scale,
            noise.signed() * scale,
        );
        color.accumulate(delta);

        light_orbit(self.phase_time)
    }
}

/// Light position for a given idle time; a pure function of that time.
pub fn light_orbit(phase_time: f32) -> Vec3 {
    let phase = phase_time * LIGHT_ORBIT_RATE;
    Vec3::new(
        phase.sin() * LIGHT_ORBIT_RADIUS,
        phase.cos() * LIGHT_ORBIT_RADIUS,
        phase.sin() * LIGHT_ORBIT_RADIUS,
    )
}
