// Recording fakes for the rendering and platform boundaries.

#![allow(dead_code)]

use glam::{Mat4, Vec2, Vec3};
use std::collections::HashMap;
use viewer_core::render_mode::{
    UNIFORM_COLOR, UNIFORM_LIGHT_POSITION, UNIFORM_NORMAL_MATRIX, UNIFORM_OPACITY,
    UNIFORM_PROJECTION, UNIFORM_VIEW,
};
use viewer_core::{Blend, NoiseSource, Platform, RenderBackend, Shading, UniformLocation};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    UseProgram(Shading),
    F32(&'static str, f32),
    Vec3(&'static str, Vec3),
    Mat4(&'static str, Mat4),
    Blend(Blend),
    Clear,
    Draw,
    Present,
}

pub struct FakeBackend {
    pub calls: Vec<Call>,
    pub active: Shading,
    pub blend: Option<Blend>,
    /// Last value written per (program, uniform name).
    pub values: HashMap<(Shading, &'static str), Call>,
    pub missing: Vec<&'static str>,
}

const NAMES: [&str; 6] = [
    UNIFORM_PROJECTION,
    UNIFORM_VIEW,
    UNIFORM_NORMAL_MATRIX,
    UNIFORM_LIGHT_POSITION,
    UNIFORM_COLOR,
    UNIFORM_OPACITY,
];

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            active: Shading::Phong,
            blend: None,
            values: HashMap::new(),
            missing: Vec::new(),
        }
    }

    pub fn without(names: &[&'static str]) -> Self {
        let mut backend = Self::new();
        backend.missing = names.to_vec();
        backend
    }

    fn name(location: UniformLocation) -> &'static str {
        NAMES[location.0 as usize]
    }

    fn record(&mut self, call: Call, name: &'static str) {
        self.values.insert((self.active, name), call.clone());
        self.calls.push(call);
    }

    pub fn vec3(&self, shading: Shading, name: &'static str) -> Option<Vec3> {
        match self.values.get(&(shading, name)) {
            Some(Call::Vec3(_, v)) => Some(*v),
            _ => None,
        }
    }

    pub fn f32(&self, shading: Shading, name: &'static str) -> Option<f32> {
        match self.values.get(&(shading, name)) {
            Some(Call::F32(_, v)) => Some(*v),
            _ => None,
        }
    }

    pub fn mat4_writes(&self, name: &'static str) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Mat4(n, _) if *n == name))
            .count()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for FakeBackend {
    fn use_program(&mut self, shading: Shading) {
        self.active = shading;
        self.calls.push(Call::UseProgram(shading));
    }

    fn uniform_location(&self, shading: Shading, name: &str) -> Option<UniformLocation> {
        if shading == Shading::Lambert && name == UNIFORM_NORMAL_MATRIX {
            return None;
        }
        if self.missing.iter().any(|m| *m == name) {
            return None;
        }
        NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| UniformLocation(i as u32))
    }

    fn set_uniform_f32(&mut self, location: UniformLocation, value: f32) {
        let name = Self::name(location);
        self.record(Call::F32(name, value), name);
    }

    fn set_uniform_vec3(&mut self, location: UniformLocation, value: Vec3) {
        let name = Self::name(location);
        self.record(Call::Vec3(name, value), name);
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4) {
        let name = Self::name(location);
        self.record(Call::Mat4(name, *value), name);
    }

    fn set_blend(&mut self, blend: Blend) {
        self.blend = Some(blend);
        self.calls.push(Call::Blend(blend));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn draw_mesh(&mut self) {
        self.calls.push(Call::Draw);
    }

    fn present(&mut self) {
        self.calls.push(Call::Present);
    }
}

#[derive(Default)]
pub struct FakePlatform {
    pub titles: Vec<String>,
    pub captured: bool,
    pub capture_changes: usize,
    pub offset: Vec2,
    pub centred: usize,
}

impl Platform for FakePlatform {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        self.captured = captured;
        self.capture_changes += 1;
    }

    fn pointer_offset(&mut self) -> Vec2 {
        self.offset
    }

    fn center_pointer(&mut self) {
        self.offset = Vec2::ZERO;
        self.centred += 1;
    }
}

/// Noise source returning a fixed value.
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn signed(&mut self) -> f32 {
        self.0
    }
}

/// Noise source cycling through a fixed list.
pub struct CyclingNoise {
    pub values: Vec<f32>,
    pub next: usize,
}

impl NoiseSource for CyclingNoise {
    fn signed(&mut self) -> f32 {
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}
