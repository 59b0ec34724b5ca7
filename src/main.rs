use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{DeviceEvent, ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowBuilder};

use viewer_core::constants::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use viewer_core::input::HELP_TEXT;
use viewer_core::{
    AppState, FramePacer, InputEvent, Key, MonotonicClock, PointerButton, ScrollAccumulator,
    ScrollDirection,
    ViewerConfig, ViewerError, ViewportState,
};

mod cli;
mod geometry;
mod gpu;
mod platform;

use cli::Cli;
use gpu::GpuState;
use platform::WinitPlatform;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    println!("{}", HELP_TEXT);
    let config = Cli::parse().config();

    if let Err(e) = run(&config) {
        println!("{:#}", e);
        std::process::exit(1);
    }
}

fn key_from_code(code: KeyCode) -> Key {
    match code {
        KeyCode::KeyF => Key::F,
        KeyCode::KeyZ => Key::Z,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        _ => Key::Other,
    }
}

fn button_from_winit(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        _ => PointerButton::Other,
    }
}

fn scroll_notch(scroll: &mut ScrollAccumulator, delta: MouseScrollDelta) -> Option<ScrollDirection> {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => scroll.lines(y),
        MouseScrollDelta::PixelDelta(p) => scroll.pixels(p.y as f32),
    }
}

fn center_on_primary_monitor(window: &Window) {
    let Some(monitor) = window.primary_monitor().or_else(|| window.current_monitor()) else {
        return;
    };
    let desktop = monitor.size();
    let size = window.outer_size();
    let x = (desktop.width as i32 - size.width as i32) / 2;
    let y = (desktop.height as i32 - size.height as i32) / 2;
    window.set_outer_position(PhysicalPosition::new(x, y));
}

fn run(config: &ViewerConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().map_err(|e| ViewerError::WindowSystem(e.to_string()))?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .build(&event_loop)
        .map_err(|e| ViewerError::Window(e.to_string()))?;
    center_on_primary_monitor(&window);

    let mesh = geometry::menger_mesh(geometry::MENGER_LEVEL, geometry::MENGER_EXTENT);
    log::info!(
        "menger mesh: {} vertices, {} indices",
        mesh.vertices.len(),
        mesh.indices.len()
    );
    let mut gpu = pollster::block_on(GpuState::new(&window, &mesh, config.msaa))
        .context("GPU initialisation")?;
    let mut platform = WinitPlatform::new(&window);

    let clock = MonotonicClock::start();
    let size = window.inner_size();
    let viewport = ViewportState::new(size.width.max(1), size.height.max(1));
    let mut app = AppState::new(config, viewport, clock.now(), &mut gpu);

    let mut pacer = FramePacer::new(config.tick_interval());
    log::info!(
        "max fps {}, tick interval {:?}, fixed dt {:.6}s",
        config.max_fps,
        pacer.interval(),
        config.fixed_dt()
    );
    let mut next_tick = Instant::now() + pacer.wait();
    let mut tick_due = false;
    let mut scroll = ScrollAccumulator::default();

    event_loop
        .run(move |event, elwt| match event {
            Event::NewEvents(_) => {
                if !tick_due && Instant::now() >= next_tick {
                    tick_due = true;
                    app.begin_tick(clock.now());
                }
            }
            Event::WindowEvent { event, .. } => {
                let input = match event {
                    WindowEvent::CloseRequested => {
                        elwt.exit();
                        None
                    }
                    WindowEvent::Resized(size) => {
                        gpu.resize(size);
                        platform.resize(size);
                        Some(InputEvent::Resized {
                            width: size.width,
                            height: size.height,
                        })
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button,
                        ..
                    } => Some(InputEvent::ButtonPressed(button_from_winit(button))),
                    WindowEvent::MouseWheel { delta, .. } => {
                        scroll_notch(&mut scroll, delta).map(InputEvent::Scroll)
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(code),
                                state: ElementState::Pressed,
                                repeat: false,
                                ..
                            },
                        ..
                    } => Some(InputEvent::KeyPressed(key_from_code(code))),
                    _ => None,
                };
                if let Some(input) = input {
                    app.handle(input, &mut gpu, &mut platform);
                }
            }
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } => {
                if app.camera.captured {
                    platform.accumulate_motion(delta);
                }
            }
            Event::AboutToWait => {
                if tick_due {
                    tick_due = false;
                    let started = Instant::now();
                    app.frame(&mut gpu, &mut platform);
                    app.end_tick();
                    if gpu.is_fatal() {
                        elwt.exit();
                        return;
                    }
                    let wait = pacer.finish_frame(started.elapsed());
                    next_tick = Instant::now() + wait;
                }
                elwt.set_control_flow(ControlFlow::WaitUntil(next_tick));
            }
            _ => {}
        })
        .context("event loop")?;

    Ok(())
}
