pub mod app;
pub mod backend;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod idle;
pub mod input;
pub mod render_mode;
pub mod state;
pub mod title;
pub mod viewport;

pub use app::AppState;
pub use backend::{Platform, RenderBackend};
pub use camera::{CameraState, ScrollAccumulator, ScrollDirection};
pub use clock::{FrameClock, FramePacer, MonotonicClock};
pub use config::ViewerConfig;
pub use error::ViewerError;
pub use idle::{IdleAnimator, NoiseSource, RngNoise};
pub use input::{Command, InputEvent, Key, PointerButton};
pub use render_mode::{Blend, ModeCommand, ModeMachine, RenderMode, Shading, UniformLocation, UniformSet};
pub use state::{ColorState, LightState};
pub use title::TitleSequence;
pub use viewport::ViewportState;
