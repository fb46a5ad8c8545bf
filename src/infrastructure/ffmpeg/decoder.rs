// SPDX-License-Identifier: MPL-2.0
//! The decoder pair: a mandatory video decoder and an optional audio path.

use ffmpeg_next::{codec, decoder, frame, Packet};
use log::{debug, info, warn};

use super::convert::AudioConverter;
use super::source::{MediaSource, SelectedStream};
use super::video_error;
use crate::application::port::{AudioOutput, AudioOutputOpener};
use crate::domain::video::AudioFormat;
use crate::error::VideoError;

/// Audio decoder, resampler and scratch frame for the selected audio stream.
pub struct AudioPath {
    decoder: decoder::Audio,
    converter: AudioConverter,
    frame: frame::Audio,
    stream_index: usize,
}

impl AudioPath {
    #[must_use]
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    #[must_use]
    pub fn format(&self) -> AudioFormat {
        self.converter.format()
    }

    /// Decodes one packet and hands every resulting frame, resampled, to `on_samples`.
    ///
    /// A packet the decoder rejects is dropped.
    pub fn decode(&mut self, packet: &Packet, on_samples: &mut dyn FnMut(&mut [i16])) {
        if let Err(e) = self.decoder.send_packet(packet) {
            debug!("Dropping audio packet: {e}");
            return;
        }
        while self.decoder.receive_frame(&mut self.frame).is_ok() {
            match self.converter.convert(&mut self.frame) {
                Ok(samples) if !samples.is_empty() => on_samples(samples),
                Ok(_) => {}
                Err(e) => debug!("Dropping audio frame: {e}"),
            }
        }
    }

    /// Drops audio buffered in the decoder and the resampler.
    pub fn flush(&mut self) {
        self.decoder.flush();
        if let Err(e) = self.converter.reset() {
            warn!("Failed to reset resampler after seek: {e}");
        }
    }
}

/// One decoder per selected stream.
pub struct DecoderPair {
    video: decoder::Video,
    video_stream: SelectedStream,
    audio: Option<AudioPath>,
}

impl DecoderPair {
    /// Opens the video decoder and tries to bring up the audio path.
    ///
    /// Returns the audio output alongside when audio is active.
    ///
    /// # Errors
    ///
    /// Fails only if the video decoder cannot be opened. Every audio failure
    /// releases what that attempt acquired and continues video-only.
    pub fn open(
        source: &MediaSource,
        audio_opener: &mut dyn AudioOutputOpener,
    ) -> Result<(Self, Option<Box<dyn AudioOutput>>), VideoError> {
        let video_stream = source.video_stream().ok_or(VideoError::NoVideoStream)?;
        let parameters = source
            .parameters(video_stream)
            .ok_or(VideoError::NoVideoStream)?;
        let video = codec::context::Context::from_parameters(parameters)
            .map_err(|e| video_error("Failed to create codec context", e))?
            .decoder()
            .video()
            .map_err(|e| video_error("Failed to create video decoder", e))?;

        let (audio, output) = match source.audio_stream() {
            Some(stream) => match Self::open_audio(source, stream, audio_opener) {
                Ok((path, output)) => {
                    info!(
                        "Audio active: {} Hz, {} channels",
                        path.format().sample_rate,
                        path.format().channels
                    );
                    (Some(path), Some(output))
                }
                Err(e) => {
                    warn!("Audio unavailable, playing video only: {e}");
                    (None, None)
                }
            },
            None => (None, None),
        };

        Ok((
            Self {
                video,
                video_stream,
                audio,
            },
            output,
        ))
    }

    fn open_audio(
        source: &MediaSource,
        stream: SelectedStream,
        audio_opener: &mut dyn AudioOutputOpener,
    ) -> Result<(AudioPath, Box<dyn AudioOutput>), VideoError> {
        let parameters = source
            .parameters(stream)
            .ok_or_else(|| VideoError::AudioUnavailable("audio stream vanished".to_string()))?;
        let decoder = codec::context::Context::from_parameters(parameters)
            .map_err(|e| video_error("Failed to create audio codec context", e))?
            .decoder()
            .audio()
            .map_err(|e| video_error("Failed to create audio decoder", e))?;

        let requested = AudioFormat::requested_for(decoder.rate());
        let output = audio_opener
            .open(requested)
            .map_err(|e| VideoError::AudioUnavailable(e.to_string()))?;

        let converter = AudioConverter::new(
            decoder.format(),
            decoder.channel_layout(),
            decoder.channels() as u16,
            decoder.rate(),
            output.format(),
        )?;

        Ok((
            AudioPath {
                decoder,
                converter,
                frame: frame::Audio::empty(),
                stream_index: stream.index,
            },
            output,
        ))
    }

    #[must_use]
    pub fn video_stream(&self) -> SelectedStream {
        self.video_stream
    }

    #[must_use]
    pub fn video_size(&self) -> (u32, u32) {
        (self.video.width(), self.video.height())
    }

    #[must_use]
    pub fn audio_format(&self) -> Option<AudioFormat> {
        self.audio.as_ref().map(AudioPath::format)
    }

    /// Feeds a video packet. Returns false if the decoder rejected it.
    pub fn send_video(&mut self, packet: &Packet) -> bool {
        match self.video.send_packet(packet) {
            Ok(()) => true,
            Err(e) => {
                debug!("Dropping video packet: {e}");
                false
            }
        }
    }

    /// Pulls one decoded picture if the decoder has one ready.
    pub fn receive_video(&mut self, frame: &mut frame::Video) -> bool {
        self.video.receive_frame(frame).is_ok()
    }

    /// Routes a packet to the audio path if it belongs to the audio stream.
    ///
    /// Returns false if the packet is not an audio packet for this pair.
    pub fn decode_audio(&mut self, packet: &Packet, on_samples: &mut dyn FnMut(&mut [i16])) -> bool {
        match self.audio.as_mut() {
            Some(audio) if audio.stream_index() == packet.stream() => {
                audio.decode(packet, on_samples);
                true
            }
            _ => false,
        }
    }

    /// Discards frames buffered inside both decoders.
    pub fn flush(&mut self) {
        self.video.flush();
        if let Some(audio) = self.audio.as_mut() {
            audio.flush();
        }
    }
}
