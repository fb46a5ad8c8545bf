// SPDX-License-Identifier: MPL-2.0
//! Tick pacing for the single-threaded player.
//!
//! Each tick the pacer answers two questions:
//!
//! - Is the next video frame due? (elapsed time since the last presentation
//!   reached the frame interval)
//! - Is the audio queue running dry? (fewer than a quarter second of samples
//!   waiting)
//!
//! Either answer triggers a decode burst, but only a due frame is presented.

use crate::domain::video::{AudioFormat, FrameInterval};

/// What a tick should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickPlan {
    /// The frame interval has elapsed since the last presentation.
    pub frame_due: bool,
    /// The audio queue fell below its low-water mark.
    pub audio_starving: bool,
}

impl TickPlan {
    #[must_use]
    pub fn should_decode(self) -> bool {
        self.frame_due || self.audio_starving
    }
}

/// Decides when to decode and when to present.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: FrameInterval,
    low_water_bytes: Option<usize>,
    last_presented_ms: u64,
}

impl Pacer {
    /// Starts pacing at `now_ms`. The first frame is due one interval later.
    #[must_use]
    pub fn new(interval: FrameInterval, audio: Option<AudioFormat>, now_ms: u64) -> Self {
        Self {
            interval,
            low_water_bytes: audio.map(AudioFormat::low_water_bytes),
            last_presented_ms: now_ms,
        }
    }

    /// Plans the tick at `now_ms` given the current audio queue size.
    ///
    /// `queued_bytes` is `None` when there is no audio output.
    #[must_use]
    pub fn plan(&self, now_ms: u64, queued_bytes: Option<usize>) -> TickPlan {
        let elapsed = now_ms.saturating_sub(self.last_presented_ms);
        let audio_starving = match (self.low_water_bytes, queued_bytes) {
            (Some(low_water), Some(queued)) => queued < low_water,
            _ => false,
        };
        TickPlan {
            frame_due: elapsed >= u64::from(self.interval.as_millis()),
            audio_starving,
        }
    }

    /// Records a presentation at `now_ms`.
    pub fn mark_presented(&mut self, now_ms: u64) {
        self.last_presented_ms = now_ms;
    }

    /// Restarts the frame deadline from `now_ms`, e.g. after a seek.
    pub fn reset(&mut self, now_ms: u64) {
        self.last_presented_ms = now_ms;
    }
}
