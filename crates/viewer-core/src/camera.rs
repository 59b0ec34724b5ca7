//! Orbit camera: yaw/pitch around the origin plus a signed zoom distance.

use crate::constants::{
    INITIAL_AZIMUTH, INITIAL_ELEVATION, INITIAL_ZOOM, POINTER_SENSITIVITY, SCROLL_PIXELS_PER_NOTCH,
    ZOOM_STEP,
};
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Towards the mesh.
    Up,
    /// Away from the mesh.
    Down,
}

impl ScrollDirection {
    /// Map a vertical wheel delta to a single notch; zero is no scroll.
    pub fn from_delta(dy: f32) -> Option<Self> {
        if dy > 0.0 {
            Some(Self::Up)
        } else if dy < 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }
}

/// Turns wheel input into zoom notches. Each line delta is one notch;
/// pixel deltas from touchpads are summed until they cover a whole notch.
#[derive(Clone, Debug, Default)]
pub struct ScrollAccumulator {
    pixels: f32,
}

impl ScrollAccumulator {
    pub fn lines(&mut self, dy: f32) -> Option<ScrollDirection> {
        self.pixels = 0.0;
        ScrollDirection::from_delta(dy)
    }

    /// At most one notch per event; the remainder carries over until the
    /// gesture reverses.
    pub fn pixels(&mut self, dy: f32) -> Option<ScrollDirection> {
        if dy * self.pixels < 0.0 {
            self.pixels = 0.0;
        }
        self.pixels += dy;
        if self.pixels.abs() < SCROLL_PIXELS_PER_NOTCH {
            return None;
        }
        let direction = ScrollDirection::from_delta(self.pixels);
        self.pixels %= SCROLL_PIXELS_PER_NOTCH;
        direction
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    pub azimuth: f32,
    pub elevation: f32,
    /// Negative distance along the view axis. Never above zero.
    pub zoom: f32,
    /// Pointer drives the orbit directly instead of the idle drift.
    pub captured: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            azimuth: INITIAL_AZIMUTH,
            elevation: INITIAL_ELEVATION,
            zoom: INITIAL_ZOOM,
            captured: false,
        }
    }
}

impl CameraState {
    /// Apply a pointer offset measured from the viewport centre.
    /// Ignored unless the camera is captured; returns whether it applied.
    pub fn on_pointer_moved(&mut self, delta: Vec2) -> bool {
        if !self.captured {
            return false;
        }
        self.azimuth += delta.x * POINTER_SENSITIVITY;
        self.elevation += delta.y * POINTER_SENSITIVITY;
        true
    }

    pub fn on_scroll(&mut self, direction: ScrollDirection) {
        match direction {
            ScrollDirection::Up => self.zoom -= ZOOM_STEP * self.zoom,
            ScrollDirection::Down => self.zoom += ZOOM_STEP * self.zoom,
        }
        if self.zoom > 0.0 {
            self.zoom = 0.0;
        }
    }

    /// Flip between captured and free; returns the new `captured` value.
    pub fn toggle_capture(&mut self) -> bool {
        self.captured = !self.captured;
        self.captured
    }

    /// Rebuilt from scratch every frame: translate, pitch about X, yaw about Z.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.zoom))
            * Mat4::from_rotation_x(self.elevation)
            * Mat4::from_rotation_z(self.azimuth)
    }
}
