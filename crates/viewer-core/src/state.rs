//! Colour and light values pushed to the shading programs.

use crate::constants::STATIC_LIGHT_POSITION;
use glam::Vec3;
use rand::Rng;

/// Mesh tint. Each channel stays within [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorState {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorState {
    pub fn rgb(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Add a per-channel delta, then clamp every channel to [-1, 1].
    pub fn accumulate(&mut self, delta: Vec3) {
        self.r = (self.r + delta.x).clamp(-1.0, 1.0);
        self.g = (self.g + delta.y).clamp(-1.0, 1.0);
        self.b = (self.b + delta.z).clamp(-1.0, 1.0);
    }

    /// Fresh uniform draw in [0, 1] for every channel.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.r = rng.gen::<f32>();
        self.g = rng.gen::<f32>();
        self.b = rng.gen::<f32>();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightState {
    pub position: Vec3,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            position: STATIC_LIGHT_POSITION,
        }
    }
}
