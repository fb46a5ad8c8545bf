// SPDX-License-Identifier: MPL-2.0
//! Wall-clock time source for pacing.
//!
//! Video presentation is paced by wall-clock time, not by the audio device.
//! Audio only influences pacing through its queue occupancy (see
//! [`Pacer`](super::pacer::Pacer)).

use std::sync::OnceLock;
use std::time::Instant;

use crate::application::port::Clock;

/// Reference instant all millisecond readings are relative to.
static REFERENCE_INSTANT: OnceLock<Instant> = OnceLock::new();

/// Monotonic clock backed by [`Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        REFERENCE_INSTANT.get_or_init(Instant::now);
        Self
    }
}

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)] // u128 milliseconds won't overflow u64 for reasonable uptimes
    fn now_ms(&self) -> u64 {
        let reference = REFERENCE_INSTANT.get_or_init(Instant::now);
        reference.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now_ms();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.now_ms();
        assert!(second >= first + 4);
    }
}
