//! Shading × blending state machine.
//!
//! The two axes are independent. Switching the shading program re-resolves
//! its uniform set and re-pushes the persistent uniforms; switching the blend
//! mode only touches the blend state. A uniform the program does not expose
//! is carried as `None` and every consumer skips it.

use crate::backend::RenderBackend;
use crate::constants::{MODE_SWITCH_OPACITY, STARTUP_COLOR, STARTUP_OPACITY, STATIC_LIGHT_POSITION};
use crate::state::{ColorState, LightState};
use glam::{Mat4, Vec3};

pub const UNIFORM_PROJECTION: &str = "projection";
pub const UNIFORM_VIEW: &str = "modelview";
pub const UNIFORM_NORMAL_MATRIX: &str = "normalmat";
pub const UNIFORM_LIGHT_POSITION: &str = "lightpos";
pub const UNIFORM_COLOR: &str = "color";
pub const UNIFORM_OPACITY: &str = "opacity";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shading {
    /// Flat Lambertian, no per-fragment normal transform.
    Lambert,
    /// Per-fragment Phong, needs the normal matrix.
    Phong,
}

impl Shading {
    pub fn uses_normal_matrix(self) -> bool {
        matches!(self, Shading::Phong)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Blend {
    Opaque,
    /// Additive: src = SRC_ALPHA, dst = ONE.
    Transparent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderMode {
    pub shading: Shading,
    pub blend: Blend,
}

impl Default for RenderMode {
    fn default() -> Self {
        Self {
            shading: Shading::Phong,
            blend: Blend::Transparent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeCommand {
    Shade(Shading),
    Blend(Blend),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// Resolved uniform handles of the active program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniformSet {
    pub projection: Option<UniformLocation>,
    pub view: Option<UniformLocation>,
    /// Always `None` for programs that do not transform normals.
    pub normal_matrix: Option<UniformLocation>,
    pub light_position: Option<UniformLocation>,
    pub color: Option<UniformLocation>,
    pub opacity: Option<UniformLocation>,
}

impl UniformSet {
    pub fn resolve<B: RenderBackend + ?Sized>(backend: &B, shading: Shading) -> Self {
        let normal_matrix = if shading.uses_normal_matrix() {
            backend.uniform_location(shading, UNIFORM_NORMAL_MATRIX)
        } else {
            None
        };
        Self {
            projection: backend.uniform_location(shading, UNIFORM_PROJECTION),
            view: backend.uniform_location(shading, UNIFORM_VIEW),
            normal_matrix,
            light_position: backend.uniform_location(shading, UNIFORM_LIGHT_POSITION),
            color: backend.uniform_location(shading, UNIFORM_COLOR),
            opacity: backend.uniform_location(shading, UNIFORM_OPACITY),
        }
    }
}

pub fn push_f32<B: RenderBackend + ?Sized>(backend: &mut B, loc: Option<UniformLocation>, v: f32) {
    if let Some(loc) = loc {
        backend.set_uniform_f32(loc, v);
    }
}

pub fn push_vec3<B: RenderBackend + ?Sized>(backend: &mut B, loc: Option<UniformLocation>, v: Vec3) {
    if let Some(loc) = loc {
        backend.set_uniform_vec3(loc, v);
    }
}

pub fn push_mat4<B: RenderBackend + ?Sized>(backend: &mut B, loc: Option<UniformLocation>, m: &Mat4) {
    if let Some(loc) = loc {
        backend.set_uniform_mat4(loc, m);
    }
}

/// Current mode plus the uniform set resolved for it.
#[derive(Clone, Debug)]
pub struct ModeMachine {
    mode: RenderMode,
    uniforms: UniformSet,
    opacity: f32,
}

impl ModeMachine {
    /// Startup state: Phong, transparent, opacity 0.5 and a white tint no
    /// matter what the colour state holds.
    pub fn startup<B: RenderBackend + ?Sized>(backend: &mut B, light: &mut LightState) -> Self {
        let mode = RenderMode::default();
        backend.set_blend(mode.blend);
        backend.use_program(mode.shading);
        let uniforms = UniformSet::resolve(&*backend, mode.shading);
        light.position = STATIC_LIGHT_POSITION;
        push_vec3(backend, uniforms.light_position, light.position);
        push_f32(backend, uniforms.opacity, STARTUP_OPACITY);
        push_vec3(backend, uniforms.color, STARTUP_COLOR);
        Self {
            mode,
            uniforms,
            opacity: STARTUP_OPACITY,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    /// Opacity last pushed to the active program.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// The single transition function. Re-selecting the current value is
    /// not a no-op: it repeats the switch, like pressing the key again.
    pub fn apply<B: RenderBackend + ?Sized>(
        &mut self,
        command: ModeCommand,
        backend: &mut B,
        light: &mut LightState,
        color: &ColorState,
    ) {
        match command {
            ModeCommand::Shade(shading) => {
                backend.use_program(shading);
                self.uniforms = UniformSet::resolve(&*backend, shading);
                self.mode.shading = shading;
                self.opacity = MODE_SWITCH_OPACITY;
                light.position = STATIC_LIGHT_POSITION;
                push_vec3(backend, self.uniforms.light_position, light.position);
                push_f32(backend, self.uniforms.opacity, self.opacity);
                push_vec3(backend, self.uniforms.color, color.rgb());
                log::debug!("shading -> {:?}", shading);
            }
            ModeCommand::Blend(blend) => {
                backend.set_blend(blend);
                self.mode.blend = blend;
                log::debug!("blend -> {:?}", blend);
            }
        }
    }
}
