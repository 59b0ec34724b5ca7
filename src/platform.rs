//! winit side of the platform boundary: title, cursor capture and the
//! relative pointer offset.

use glam::Vec2;
use viewer_core::Platform;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::{CursorGrabMode, Window};

pub struct WinitPlatform<'w> {
    window: &'w Window,
    size: PhysicalSize<u32>,
    /// Raw motion since the pointer was last centred.
    motion: Vec2,
}

impl<'w> WinitPlatform<'w> {
    pub fn new(window: &'w Window) -> Self {
        Self {
            window,
            size: window.inner_size(),
            motion: Vec2::ZERO,
        }
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.size = size;
    }

    pub fn accumulate_motion(&mut self, delta: (f64, f64)) {
        self.motion += Vec2::new(delta.0 as f32, delta.1 as f32);
    }
}

impl Platform for WinitPlatform<'_> {
    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        if captured {
            self.window.set_cursor_visible(false);
            let grabbed = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("cursor grab unavailable: {}", e);
            }
        } else {
            if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("cursor release failed: {}", e);
            }
            self.window.set_cursor_visible(true);
        }
    }

    fn pointer_offset(&mut self) -> Vec2 {
        // The pointer sits at centre + motion, so centre - pointer = -motion.
        -self.motion
    }

    fn center_pointer(&mut self) {
        self.motion = Vec2::ZERO;
        let centre = PhysicalPosition::new(
            f64::from(self.size.width) * 0.5,
            f64::from(self.size.height) * 0.5,
        );
        if let Err(e) = self.window.set_cursor_position(centre) {
            log::debug!("cursor warp unsupported: {}", e);
        }
    }
}
