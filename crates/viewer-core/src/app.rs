//! The single owned application state and the per-tick orchestration.
//!
//! Everything mutable lives here and is only touched from the render thread:
//! the scheduler calls `begin_tick`, feeds pending input through `handle`,
//! runs `frame`, then `end_tick`.

use crate::backend::{Platform, RenderBackend};
use crate::camera::CameraState;
use crate::clock::{timestamp, FrameClock};
use crate::config::ViewerConfig;
use crate::idle::{IdleAnimator, NoiseSource, RngNoise};
use crate::input::{command_for, Command, InputEvent};
use crate::render_mode::{push_mat4, push_vec3, ModeMachine, RenderMode};
use crate::state::{ColorState, LightState};
use crate::title::TitleSequence;
use crate::viewport::ViewportState;
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct AppState {
    pub camera: CameraState,
    pub color: ColorState,
    pub light: LightState,
    pub idle: IdleAnimator,
    pub modes: ModeMachine,
    pub viewport: ViewportState,
    pub clock: FrameClock,
    pub title: TitleSequence,
    noise: Box<dyn NoiseSource>,
    palette: StdRng,
    jitter: StdRng,
}

impl AppState {
    /// Build the startup state with entropy-seeded random sources.
    pub fn new<B: RenderBackend + ?Sized>(
        config: &ViewerConfig,
        viewport: ViewportState,
        start_time: f64,
        backend: &mut B,
    ) -> Self {
        Self::with_sources(
            config,
            viewport,
            start_time,
            backend,
            Box::new(RngNoise(StdRng::from_entropy())),
            StdRng::from_entropy(),
        )
    }

    /// Startup with caller-supplied idle noise and palette generator.
    pub fn with_sources<B: RenderBackend + ?Sized>(
        config: &ViewerConfig,
        viewport: ViewportState,
        start_time: f64,
        backend: &mut B,
        noise: Box<dyn NoiseSource>,
        mut palette: StdRng,
    ) -> Self {
        let mut light = LightState::default();
        let modes = ModeMachine::startup(backend, &mut light);
        // Drawn now but not pushed: the startup tint stays white until the
        // first idle tick or an explicit randomize.
        let mut color = ColorState::default();
        color.randomize(&mut palette);
        let jitter = StdRng::seed_from_u64(palette.gen());
        Self {
            camera: CameraState::default(),
            color,
            light,
            idle: IdleAnimator::default(),
            modes,
            viewport,
            clock: FrameClock::new(start_time, config.fixed_dt()),
            title: TitleSequence::default(),
            noise,
            palette,
            jitter,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        self.modes.mode()
    }

    pub fn begin_tick(&mut self, now: f64) {
        self.clock.begin_tick(now);
    }

    pub fn end_tick(&mut self) {
        self.clock.end_tick();
    }

    /// Apply one input event. Returns the FPS figure when a report was made.
    pub fn handle<B, P>(&mut self, event: InputEvent, backend: &mut B, platform: &mut P) -> Option<f64>
    where
        B: RenderBackend + ?Sized,
        P: Platform + ?Sized,
    {
        let command = command_for(event)?;
        match command {
            Command::ToggleCapture => {
                let captured = self.camera.toggle_capture();
                platform.set_cursor_captured(captured);
                platform.center_pointer();
                log::debug!("camera captured: {}", captured);
            }
            Command::RandomizeColor => {
                self.color.randomize(&mut self.palette);
                push_vec3(backend, self.modes.uniforms().color, self.color.rgb());
                log::debug!("colour randomized to {:?}", self.color);
            }
            Command::Zoom(direction) => self.camera.on_scroll(direction),
            Command::ReportFps => {
                let fps = self.clock.take_fps_report()?;
                println!("[{}] FPS: {}", timestamp(&Local::now()), fps);
                return Some(fps);
            }
            Command::Mode(mode) => {
                self.modes
                    .apply(mode, backend, &mut self.light, &self.color);
            }
            Command::Resize { width, height } => self.viewport.resize(width, height),
        }
        None
    }

    /// One orchestrated frame, in fixed order: pointer, view, idle drift,
    /// title, clear, matrices, draw, present.
    pub fn frame<B, P>(&mut self, backend: &mut B, platform: &mut P)
    where
        B: RenderBackend + ?Sized,
        P: Platform + ?Sized,
    {
        if self.camera.captured {
            let offset = platform.pointer_offset();
            self.camera.on_pointer_moved(offset);
            platform.center_pointer();
        }

        let view = self.camera.view_matrix();

        if !self.camera.captured {
            let dt = self.clock.fixed_delta_time;
            self.light.position =
                self.idle
                    .tick(dt, &mut self.camera, &mut self.color, self.noise.as_mut());
            let uniforms = *self.modes.uniforms();
            push_vec3(backend, uniforms.color, self.color.rgb());
            push_vec3(backend, uniforms.light_position, self.light.position);
        }

        if let Some(title) = self.title.advance(self.clock.current_time, self.jitter.gen()) {
            platform.set_title(title);
        }

        backend.clear();
        let uniforms = *self.modes.uniforms();
        push_mat4(backend, uniforms.projection, &self.viewport.projection);
        push_mat4(backend, uniforms.view, &view);
        if let Some(loc) = uniforms.normal_matrix {
            backend.set_uniform_mat4(loc, &view.inverse().transpose());
        }
        backend.draw_mesh();
        backend.present();
    }
}
