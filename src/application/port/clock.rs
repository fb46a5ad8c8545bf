// SPDX-License-Identifier: MPL-2.0
//! Monotonic clock port used by the pacer.

/// Source of monotonic wall-clock time.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}
