// SPDX-License-Identifier: MPL-2.0
//! Per-file `FFmpeg` pipeline.

use std::path::Path;

use ffmpeg_next::{frame, Rescale};
use log::{debug, warn};

use super::convert::VideoConverter;
use super::decoder::DecoderPair;
use super::source::{MediaSource, MILLIS};
use super::init_ffmpeg;
use crate::application::port::{
    AudioOutputOpener, DecodeOutcome, MediaOpener, MediaPipeline, OpenedMedia, VideoSurface,
};
use crate::domain::video::{MediaInfo, TextureSize};
use crate::error::{Result, VideoError};

/// An opened file: demuxer, decoder pair and video converter.
///
/// Fields drop in declaration order, so converters and decoders are released
/// before the container they read from.
pub struct FfmpegPipeline {
    converter: VideoConverter,
    decoded: frame::Video,
    frame_pending: bool,
    decoders: DecoderPair,
    source: MediaSource,
    info: MediaInfo,
}

impl FfmpegPipeline {
    /// Opens `path` and brings up every stage.
    ///
    /// # Errors
    ///
    /// Fails if the container cannot be opened or the video decoder cannot
    /// be created. Whatever was acquired before the failure is released.
    pub fn open(
        path: &Path,
        audio_opener: &mut dyn AudioOutputOpener,
    ) -> Result<OpenedMedia> {
        init_ffmpeg()?;

        let source = MediaSource::open(path)?;
        let (decoders, audio) = DecoderPair::open(&source, audio_opener)?;

        let (width, height) = decoders.video_size();
        let texture = TextureSize::from_decoder(i64::from(width), i64::from(height));
        let info = MediaInfo {
            texture,
            duration_ms: source.duration_ms(),
            frame_interval: source.frame_interval(),
            audio: decoders.audio_format(),
        };

        let pipeline = Self {
            converter: VideoConverter::new(texture),
            decoded: frame::Video::empty(),
            frame_pending: false,
            decoders,
            source,
            info,
        };

        Ok(OpenedMedia {
            pipeline: Box::new(pipeline),
            audio,
        })
    }

    fn take_frame(&mut self) -> DecodeOutcome {
        self.frame_pending = true;
        let time_base = self.decoders.video_stream().time_base;
        let pts_ms = self
            .decoded
            .timestamp()
            .map(|pts| pts.rescale(time_base, MILLIS));
        DecodeOutcome::Frame { pts_ms }
    }
}

impl MediaPipeline for FfmpegPipeline {
    fn info(&self) -> &MediaInfo {
        &self.info
    }

    fn decode_next(&mut self, on_audio: &mut dyn FnMut(&mut [i16])) -> Result<DecodeOutcome> {
        // A previous packet may have left more than one picture in the decoder.
        if self.decoders.receive_video(&mut self.decoded) {
            return Ok(self.take_frame());
        }

        let video_index = self.decoders.video_stream().index;
        loop {
            let packet = match self.source.read_next_packet() {
                Ok(Some(packet)) => packet,
                Ok(None) => return Ok(DecodeOutcome::EndOfStream),
                Err(e) => {
                    warn!("Stopping playback after read error: {e}");
                    return Ok(DecodeOutcome::EndOfStream);
                }
            };

            if packet.stream() == video_index {
                if self.decoders.send_video(&packet)
                    && self.decoders.receive_video(&mut self.decoded)
                {
                    return Ok(self.take_frame());
                }
            } else {
                self.decoders.decode_audio(&packet, on_audio);
            }
        }
    }

    fn present(&mut self, surface: &mut dyn VideoSurface) -> Result<()> {
        if !self.frame_pending {
            return Err(VideoError::DecodingFailed("no decoded frame to present".to_string()).into());
        }
        let output = self.converter.convert(&self.decoded)?;
        surface.update_yuv(
            output.data(0),
            output.stride(0),
            output.data(1),
            output.stride(1),
            output.data(2),
            output.stride(2),
        );
        Ok(())
    }

    fn seek(&mut self, target_ms: i64) -> Result<()> {
        self.source.seek_ms(target_ms)?;
        self.decoders.flush();
        self.frame_pending = false;
        debug!("Decoders flushed after seek to {target_ms} ms");
        Ok(())
    }
}

/// [`MediaOpener`] backed by `FFmpeg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegOpener;

impl MediaOpener for FfmpegOpener {
    fn open(&mut self, path: &Path, audio: &mut dyn AudioOutputOpener) -> Result<OpenedMedia> {
        FfmpegPipeline::open(path, audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::NullAudioOpener;

    #[test]
    fn opening_missing_file_fails() {
        let result = FfmpegOpener.open(Path::new("/nonexistent/clip.mkv"), &mut NullAudioOpener);
        assert!(result.is_err());
    }

    #[test]
    fn opening_non_media_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.mp4");
        std::fs::write(&path, b"definitely not a video").unwrap();

        let result = FfmpegOpener.open(&path, &mut NullAudioOpener);
        assert!(result.is_err());
    }
}
