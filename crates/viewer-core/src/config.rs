//! Startup configuration taken from the two optional positional arguments.

use crate::constants::{DEFAULT_MAX_FPS, DEFAULT_MSAA};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    /// Requested multisample count; the GPU boundary may lower it.
    pub msaa: u32,
    /// Target frame rate driving both the pacer and the fixed animation step.
    pub max_fps: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            msaa: DEFAULT_MSAA,
            max_fps: DEFAULT_MAX_FPS,
        }
    }
}

impl ViewerConfig {
    /// Parse `[msaa] [max_fps]`, program name already stripped.
    ///
    /// Values that do not parse, or a non-positive frame rate, keep the
    /// default. Anything past the second positional is ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        if let Some(raw) = args.next() {
            match raw.as_ref().trim().parse::<u32>() {
                Ok(msaa) => config.msaa = msaa,
                Err(_) => log::warn!(
                    "ignoring msaa argument {:?}, using {}",
                    raw.as_ref(),
                    DEFAULT_MSAA
                ),
            }
        }
        if let Some(raw) = args.next() {
            match raw.as_ref().trim().parse::<f64>() {
                Ok(fps) if fps.is_finite() && fps > 0.0 => config.max_fps = fps,
                _ => log::warn!(
                    "ignoring max_fps argument {:?}, using {}",
                    raw.as_ref(),
                    DEFAULT_MAX_FPS
                ),
            }
        }
        config
    }

    /// Scheduler tick interval: 1_000_000 µs / max_fps.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_micros((1_000_000.0 / self.max_fps) as u64)
    }

    /// Fixed animation step in seconds. Deliberately not a measured delta.
    pub fn fixed_dt(&self) -> f32 {
        (1.0 / self.max_fps) as f32
    }
}
