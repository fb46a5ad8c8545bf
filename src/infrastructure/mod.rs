// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer - Adapters for external libraries.
//!
//! - [`ffmpeg`]: Demuxing, decoding and conversion via `FFmpeg`

pub mod ffmpeg;
