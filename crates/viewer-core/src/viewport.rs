use crate::constants::{FOV_Y_DEGREES, WINDOW_HEIGHT, WINDOW_WIDTH, Z_FAR, Z_NEAR};
use glam::{Mat4, Vec2};

#[derive(Clone, Debug)]
pub struct ViewportState {
    pub width: u32,
    pub height: u32,
    pub aspect: f32,
    pub projection: Mat4,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(WINDOW_WIDTH, WINDOW_HEIGHT)
    }
}

impl ViewportState {
    pub fn new(width: u32, height: u32) -> Self {
        let mut viewport = Self {
            width,
            height,
            aspect: 1.0,
            projection: Mat4::IDENTITY,
        };
        viewport.resize(width, height);
        viewport
    }

    /// Recompute aspect and the fixed-fov perspective. A zero dimension keeps
    /// the previous projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.aspect = width as f32 / height as f32;
        self.projection =
            Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect, Z_NEAR, Z_FAR);
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}
