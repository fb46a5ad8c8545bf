// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg` adapter implementing the [`MediaOpener`] and [`MediaPipeline`] ports.
//!
//! # Structure
//!
//! - [`source`]: container demuxing and stream selection
//! - [`decoder`]: the video decoder plus the optional audio path
//! - [`convert`]: pixel-format scaling and audio resampling
//! - [`pipeline`]: the per-file handle that ties them together
//!
//! [`MediaOpener`]: crate::application::port::MediaOpener
//! [`MediaPipeline`]: crate::application::port::MediaPipeline

pub mod convert;
pub mod decoder;
pub mod pipeline;
pub mod source;

pub use pipeline::{FfmpegOpener, FfmpegPipeline};
pub use source::MediaSource;

use crate::error::{Error, Result, VideoError};
use std::sync::Once;

/// Static flag to ensure `FFmpeg` is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize `FFmpeg` with appropriate log level.
///
/// Safe to call any number of times; only the first call does work. The
/// library's own log level is set to ERROR so per-packet warnings do not
/// flood stderr.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Classifies an `FFmpeg` failure, keeping `context` in the message.
pub(crate) fn video_error(context: &str, err: ffmpeg_next::Error) -> VideoError {
    VideoError::from_message(&format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_ffmpeg_is_idempotent() {
        assert!(init_ffmpeg().is_ok());
        assert!(init_ffmpeg().is_ok());
    }

    #[test]
    fn video_error_keeps_context() {
        let err = video_error("Failed to open clip.mp4", ffmpeg_next::Error::InvalidData);
        assert!(!matches!(err, VideoError::Other(_)));
    }
}
