//! Window-title easter egg: an explicit looping sequence of titles, each
//! held for a time window before the next one is shown.

use crate::constants::{TITLE_HOLD_SEC, TITLE_TYPE_JITTER_SEC, TITLE_TYPE_SEC};

pub const TITLE_STEPS: [&str; 12] = [
    "L3 Menger Cube",
    "F",
    "Fa",
    "Fan",
    "Fanc",
    "Fancy",
    "Fancy a",
    "Fancy a s",
    "Fancy a sp",
    "Fancy a spi",
    "Fancy a spin",
    "Fancy a spin?",
];

#[derive(Clone, Debug)]
pub struct TitleSequence {
    index: usize,
    next_change: f64,
}

impl Default for TitleSequence {
    fn default() -> Self {
        Self {
            index: 0,
            next_change: f64::NEG_INFINITY,
        }
    }
}

impl TitleSequence {
    /// Index of the title shown by the next change.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Show the next title once `now` passes the current hold window.
    /// `jitter` in [0, 1] stretches the typing steps.
    pub fn advance(&mut self, now: f64, jitter: f32) -> Option<&'static str> {
        if now <= self.next_change {
            return None;
        }
        let title = TITLE_STEPS[self.index];
        let hold = if self.index == 0 || self.index == TITLE_STEPS.len() - 1 {
            TITLE_HOLD_SEC
        } else {
            TITLE_TYPE_SEC + f64::from(jitter.clamp(0.0, 1.0)) * TITLE_TYPE_JITTER_SEC
        };
        self.next_change = now + hold;
        self.index = (self.index + 1) % TITLE_STEPS.len();
        Some(title)
    }
}
