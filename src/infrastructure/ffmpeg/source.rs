// SPDX-License-Identifier: MPL-2.0
//! Container demuxing and stream selection.

use std::path::Path;

use ffmpeg_next::{codec, ffi, format, media, Packet, Rational, Rescale};
use log::{debug, info};

use super::video_error;
use crate::domain::video::{duration_ms_from_micros, FrameInterval};
use crate::error::VideoError;

/// Milliseconds as a rational time base.
pub(crate) const MILLIS: Rational = Rational(1, 1000);

/// Converts a millisecond position into a stream's time base.
fn stream_timestamp(target_ms: i64, time_base: Rational) -> i64 {
    target_ms.rescale(MILLIS, time_base)
}

/// A stream selected for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedStream {
    pub index: usize,
    pub time_base: Rational,
}

/// An opened container with its best video stream and, if present, its best
/// audio stream.
///
/// A default-constructed source is closed. [`MediaSource::close`] may be
/// called any number of times.
#[derive(Default)]
pub struct MediaSource {
    input: Option<format::context::Input>,
    video: Option<SelectedStream>,
    audio: Option<SelectedStream>,
    duration_ms: i64,
    frame_interval: FrameInterval,
}

impl MediaSource {
    /// Opens `path` and selects streams.
    ///
    /// # Errors
    ///
    /// Fails if the container cannot be read or holds no video stream. A
    /// missing audio stream is not an error.
    pub fn open(path: &Path) -> Result<Self, VideoError> {
        let input = format::input(&path)
            .map_err(|e| video_error(&format!("Failed to open {}", path.display()), e))?;

        let video_stream = input
            .streams()
            .best(media::Type::Video)
            .ok_or(VideoError::NoVideoStream)?;
        let video = SelectedStream {
            index: video_stream.index(),
            time_base: video_stream.time_base(),
        };
        let rate = video_stream.avg_frame_rate();
        let frame_interval = FrameInterval::from_frame_rate(rate.numerator(), rate.denominator());

        let audio = input
            .streams()
            .best(media::Type::Audio)
            .map(|stream| SelectedStream {
                index: stream.index(),
                time_base: stream.time_base(),
            });

        let duration_ms = duration_ms_from_micros(input.duration());

        info!(
            "Opened {}: video stream #{}, audio {}, duration {} ms, frame interval {} ms",
            path.display(),
            video.index,
            audio.map_or_else(|| "none".to_string(), |a| format!("stream #{}", a.index)),
            duration_ms,
            frame_interval.as_millis()
        );

        Ok(Self {
            input: Some(input),
            video: Some(video),
            audio,
            duration_ms,
            frame_interval,
        })
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.input.is_some()
    }

    #[must_use]
    pub fn video_stream(&self) -> Option<SelectedStream> {
        self.video
    }

    #[must_use]
    pub fn audio_stream(&self) -> Option<SelectedStream> {
        self.audio
    }

    /// Container duration, 0 when unknown.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    #[must_use]
    pub fn frame_interval(&self) -> FrameInterval {
        self.frame_interval
    }

    /// Codec parameters of a stream in this container.
    #[must_use]
    pub fn parameters(&self, stream: SelectedStream) -> Option<codec::Parameters> {
        self.input
            .as_ref()?
            .stream(stream.index)
            .map(|s| s.parameters())
    }

    /// Reads the next compressed packet.
    ///
    /// Returns `Ok(None)` at the end of the input.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::NotOpen`] on a closed source, or the demuxer's
    /// read error.
    pub fn read_next_packet(&mut self) -> Result<Option<Packet>, VideoError> {
        let input = self.input.as_mut().ok_or(VideoError::NotOpen)?;
        let mut packet = Packet::empty();
        match packet.read(input) {
            Ok(()) => Ok(Some(packet)),
            Err(ffmpeg_next::Error::Eof) => Ok(None),
            Err(e) => Err(video_error("Failed to read packet", e)),
        }
    }

    /// Seeks the video stream to the closest keyframe at or before
    /// `target_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::SeekFailed`] if the demuxer refuses; its read
    /// position is then unchanged.
    pub fn seek_ms(&mut self, target_ms: i64) -> Result<(), VideoError> {
        let video = self.video.ok_or(VideoError::NotOpen)?;
        let input = self.input.as_mut().ok_or(VideoError::NotOpen)?;
        let timestamp = stream_timestamp(target_ms, video.time_base);
        let stream_index = i32::try_from(video.index)
            .map_err(|_| VideoError::SeekFailed(format!("stream index {}", video.index)))?;

        // Input::seek has no stream-index form
        let result = unsafe {
            ffi::av_seek_frame(
                input.as_mut_ptr(),
                stream_index,
                timestamp,
                ffi::AVSEEK_FLAG_BACKWARD as i32,
            )
        };
        if result < 0 {
            return Err(VideoError::SeekFailed(
                ffmpeg_next::Error::from(result).to_string(),
            ));
        }
        debug!("Seeked to {target_ms} ms (stream timestamp {timestamp})");
        Ok(())
    }

    /// Releases the container. Does nothing on a closed source.
    pub fn close(&mut self) {
        if self.input.take().is_some() {
            debug!("Closed media source");
        }
        self.video = None;
        self.audio = None;
        self.duration_ms = 0;
        self.frame_interval = FrameInterval::default();
    }
}
