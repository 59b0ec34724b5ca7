//! Seams between the core and the platform: the rendering collaborator and
//! the window/cursor collaborator. The native front-end implements both.

use crate::render_mode::{Blend, Shading, UniformLocation};
use glam::{Mat4, Vec2, Vec3};

pub trait RenderBackend {
    /// Make the given shading program current.
    fn use_program(&mut self, shading: Shading);
    /// Look up a named uniform of a program. `None` means the program does
    /// not expose it.
    fn uniform_location(&self, shading: Shading, name: &str) -> Option<UniformLocation>;
    fn set_uniform_f32(&mut self, location: UniformLocation, value: f32);
    fn set_uniform_vec3(&mut self, location: UniformLocation, value: Vec3);
    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4);
    fn set_blend(&mut self, blend: Blend);
    /// Clear colour and depth for the frame being built.
    fn clear(&mut self);
    /// Single indexed draw of the static mesh.
    fn draw_mesh(&mut self);
    fn present(&mut self);
}

pub trait Platform {
    fn set_title(&mut self, title: &str);
    /// Hide and lock the pointer when `true`, restore it when `false`.
    fn set_cursor_captured(&mut self, captured: bool);
    /// Pointer offset as `viewport_centre - pointer`, in pixels.
    fn pointer_offset(&mut self) -> Vec2;
    /// Warp the pointer back to the viewport centre.
    fn center_pointer(&mut self);
}
