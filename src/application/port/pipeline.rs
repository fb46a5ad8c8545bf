// SPDX-License-Identifier: MPL-2.0
//! Media pipeline port definition.
//!
//! A [`MediaPipeline`] is one opened file: the demuxer, the decoder pair and
//! both converters behind a single handle. The player drives it tick by tick;
//! infrastructure adapters (like `FFmpeg`) implement it.
//!
//! # Design Notes
//!
//! - Methods are synchronous and run on the thread that owns the player
//! - Audio is pushed out through a callback while video frames are pulled
//! - Dropping the pipeline releases every native resource it holds

use super::audio::{AudioOutput, AudioOutputOpener};
use super::surface::VideoSurface;
use crate::domain::video::MediaInfo;
use crate::error::Result;
use std::path::Path;

/// Result of one decode burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A video frame is ready to present. `pts_ms` is its best-effort
    /// presentation time, if the stream carries one.
    Frame { pts_ms: Option<i64> },
    /// The demuxer has no more input.
    EndOfStream,
}

/// Port for a single opened media file.
pub trait MediaPipeline {
    /// Properties fixed at open time.
    fn info(&self) -> &MediaInfo;

    /// Reads and decodes until one video frame is available.
    ///
    /// Every audio frame met on the way is resampled to the output format and
    /// handed to `on_audio` before this returns. Packets the decoders reject
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures that leave no frame to present.
    fn decode_next(&mut self, on_audio: &mut dyn FnMut(&mut [i16])) -> Result<DecodeOutcome>;

    /// Converts the most recently decoded video frame and writes it to `surface`.
    ///
    /// # Errors
    ///
    /// Returns an error if no frame is pending or conversion fails.
    fn present(&mut self, surface: &mut dyn VideoSurface) -> Result<()>;

    /// Repositions the demuxer at or before `target_ms` and flushes both decoders.
    ///
    /// # Errors
    ///
    /// Returns a seek error and leaves the pipeline untouched if the container refuses.
    fn seek(&mut self, target_ms: i64) -> Result<()>;
}

/// A freshly opened file together with its audio output, if any.
pub struct OpenedMedia {
    pub pipeline: Box<dyn MediaPipeline>,
    /// `None` when the file has no usable audio path.
    pub audio: Option<Box<dyn AudioOutput>>,
}

/// Port for opening media files.
pub trait MediaOpener {
    /// Opens `path`, selecting the best video stream and, if possible, the
    /// best audio stream.
    ///
    /// The audio output is opened through `audio` once the decoder's rate is
    /// known. Any audio failure degrades to video-only instead of failing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or has no decodable video stream.
    fn open(&mut self, path: &Path, audio: &mut dyn AudioOutputOpener) -> Result<OpenedMedia>;
}
