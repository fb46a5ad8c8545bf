// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core playback rules with no FFmpeg or audio-device types.
//!
//! # Modules
//!
//! - [`video`]: Video playback types ([`PlaybackState`](video::PlaybackState),
//!   [`Volume`](video::Volume), [`MediaInfo`](video::MediaInfo),
//!   [`format_time_ms`](video::format_time_ms))

pub mod video;
