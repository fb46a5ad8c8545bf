// SPDX-License-Identifier: MPL-2.0
//! `reelplay` is a small video player engine built on FFmpeg and cpal.
//!
//! It demuxes a file, decodes its best video and audio streams, converts
//! frames to a YUV 4:2:0 streaming texture and resamples audio to interleaved
//! 16-bit PCM. A single-threaded transport controller paces decoding against a
//! monotonic clock and the audio queue depth, and supports seeking, volume and
//! end-of-stream detection. A playlist, a file browser and an app controller
//! sit on top.

#![doc(html_root_url = "https://docs.rs/reelplay/0.1.0")]

pub mod app;
pub mod application;
pub mod browser;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod playlist;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub mod test_utils;
