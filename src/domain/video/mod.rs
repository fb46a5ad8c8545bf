// SPDX-License-Identifier: MPL-2.0
//! Video playback domain types.
//!
//! This module contains video-related value objects and enums that are
//! independent of any presentation or infrastructure concerns.

pub mod media;
pub mod newtypes;
pub mod playback;
pub mod time;

// Re-export commonly used types
pub use media::{AudioFormat, MediaInfo};
pub use newtypes::{FrameInterval, TextureSize, Volume};
pub use playback::PlaybackState;
pub use time::{clamp_position_ms, duration_ms_from_micros, format_time_ms};
