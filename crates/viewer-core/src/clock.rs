//! Time keeping for the fixed-cadence frame loop.
//!
//! `FramePacer` owns the sleep budget between ticks, `FrameClock` the
//! session time, frame counter and the fixed animation step.

use crate::constants::FPS_REPORT_MIN_INTERVAL_SEC;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::time::{Duration, Instant};

/// Monotonic seconds since the clock was started.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Best-effort soft real-time pacing. A late frame shortens or skips the
/// next sleep; lateness never accumulates into a backlog.
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    interval: Duration,
    wait: Duration,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            wait: interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep to take before the next tick.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Record the time spent on the frame that just ran; returns the new
    /// wait, always within `[0, interval]`.
    pub fn finish_frame(&mut self, spent: Duration) -> Duration {
        self.wait = self.interval.saturating_sub(spent).min(self.interval);
        self.wait
    }
}

#[derive(Clone, Debug)]
pub struct FrameClock {
    pub current_time: f64,
    pub last_fps_report_time: f64,
    pub frame_counter: u64,
    pub fixed_delta_time: f32,
}

impl FrameClock {
    pub fn new(start_time: f64, fixed_delta_time: f32) -> Self {
        Self {
            current_time: start_time,
            last_fps_report_time: start_time,
            frame_counter: 0,
            fixed_delta_time,
        }
    }

    pub fn begin_tick(&mut self, now: f64) {
        self.current_time = now;
    }

    pub fn end_tick(&mut self) {
        self.frame_counter += 1;
    }

    /// Frames per second since the previous report, or `None` when less than
    /// the minimum report interval has elapsed. Reporting restarts the window.
    pub fn take_fps_report(&mut self) -> Option<f64> {
        let elapsed = self.current_time - self.last_fps_report_time;
        if elapsed <= FPS_REPORT_MIN_INTERVAL_SEC {
            return None;
        }
        let fps = self.frame_counter as f64 / elapsed;
        self.last_fps_report_time = self.current_time;
        self.frame_counter = 0;
        Some(fps)
    }
}

/// `HH:MM:SS` wall-clock time of day in the zone of `now`; the FPS report
/// passes `Local::now()`.
pub fn timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%H:%M:%S").to_string()
}
