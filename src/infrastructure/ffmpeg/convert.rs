// SPDX-License-Identifier: MPL-2.0
//! Pixel-format scaling and audio resampling.
//!
//! Both converters have a fixed output format chosen at open time. The video
//! output frame is allocated once and overwritten for every frame. Audio
//! output frames are sized per call from the resampler's backlog, since the
//! output rate may differ from the input rate.

use ffmpeg_next::format::{sample, Pixel, Sample};
use ffmpeg_next::software::resampling::{self, Delay};
use ffmpeg_next::software::scaling;
use ffmpeg_next::{frame, ChannelLayout};

use super::video_error;
use crate::domain::video::{AudioFormat, TextureSize};
use crate::error::VideoError;

/// Planar format written to the presentation surface.
pub const DISPLAY_PIXEL_FORMAT: Pixel = Pixel::YUV420P;

/// Scales decoded pictures into the display format and texture size.
pub struct VideoConverter {
    scaler: Option<scaling::Context>,
    /// Input format and size the current scaler was built for.
    source: Option<(Pixel, u32, u32)>,
    output: frame::Video,
    size: TextureSize,
}

impl VideoConverter {
    #[must_use]
    pub fn new(size: TextureSize) -> Self {
        Self {
            scaler: None,
            source: None,
            output: frame::Video::new(DISPLAY_PIXEL_FORMAT, size.width, size.height),
            size,
        }
    }

    /// Converts `input` and returns the shared output frame.
    ///
    /// The scaler is rebuilt only when the input format or size changes.
    ///
    /// # Errors
    ///
    /// Returns a decoding error if the scaler cannot be created or fails.
    pub fn convert(&mut self, input: &frame::Video) -> Result<&frame::Video, VideoError> {
        let key = (input.format(), input.width(), input.height());
        if self.source != Some(key) || self.scaler.is_none() {
            let scaler = scaling::Context::get(
                key.0,
                key.1,
                key.2,
                DISPLAY_PIXEL_FORMAT,
                self.size.width,
                self.size.height,
                scaling::Flags::BILINEAR,
            )
            .map_err(|e| video_error("Failed to create scaler", e))?;
            self.scaler = Some(scaler);
            self.source = Some(key);
        }

        let scaler = self
            .scaler
            .as_mut()
            .ok_or_else(|| VideoError::DecodingFailed("scaler missing".to_string()))?;
        scaler
            .run(input, &mut self.output)
            .map_err(|e| video_error("Scaling failed", e))?;
        Ok(&self.output)
    }
}

/// Default channel layout for a channel count when the decoder reports none.
#[must_use]
pub fn default_layout(channels: u16) -> ChannelLayout {
    match channels {
        1 => ChannelLayout::MONO,
        2 => ChannelLayout::STEREO,
        n => ChannelLayout::default(i32::from(n)),
    }
}

const OUTPUT_SAMPLE_FORMAT: Sample = Sample::I16(sample::Type::Packed);

/// Resamples decoded audio into interleaved signed 16-bit output.
pub struct AudioConverter {
    resampler: resampling::Context,
    format: AudioFormat,
    samples: Vec<i16>,
}

impl AudioConverter {
    /// Builds a resampler from the decoder's native format to `format`.
    ///
    /// # Errors
    ///
    /// Returns a decoding error if the resampler cannot be initialised.
    pub fn new(
        input_format: Sample,
        input_layout: ChannelLayout,
        input_channels: u16,
        input_rate: u32,
        format: AudioFormat,
    ) -> Result<Self, VideoError> {
        let input_layout = if input_layout.is_empty() {
            default_layout(input_channels)
        } else {
            input_layout
        };

        let resampler = resampling::Context::get(
            input_format,
            input_layout,
            input_rate,
            OUTPUT_SAMPLE_FORMAT,
            default_layout(format.channels),
            format.sample_rate,
        )
        .map_err(|e| video_error("Failed to create resampler", e))?;

        Ok(Self {
            resampler,
            format,
            samples: Vec::new(),
        })
    }

    #[must_use]
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Resamples one decoded frame and returns its interleaved samples.
    ///
    /// Input frames that report no channel layout are tagged with the layout
    /// the resampler was built for.
    ///
    /// # Errors
    ///
    /// Returns a decoding error if the resampler rejects the frame.
    pub fn convert(&mut self, input: &mut frame::Audio) -> Result<&mut [i16], VideoError> {
        let definition = *self.resampler.input();
        if input.channel_layout().is_empty() {
            input.set_channel_layout(definition.channel_layout);
        }

        let capacity = self.output_capacity(input.samples());
        let mut output = frame::Audio::new(
            OUTPUT_SAMPLE_FORMAT,
            capacity,
            default_layout(self.format.channels),
        );
        self.resampler
            .run(input, &mut output)
            .map_err(|e| video_error("Resampling failed", e))?;

        let count = output.samples() * usize::from(self.format.channels);
        self.samples.clear();
        self.samples.extend(
            output
                .data(0)
                .chunks_exact(2)
                .take(count)
                .map(|pair| i16::from_ne_bytes([pair[0], pair[1]])),
        );
        Ok(&mut self.samples)
    }

    /// Output samples per channel needed to drain the backlog plus `input_samples`.
    fn output_capacity(&self, input_samples: usize) -> usize {
        let in_rate = u64::from(self.resampler.input().rate.max(1));
        let out_rate = u64::from(self.format.sample_rate);
        let backlog = u64::try_from(Delay::from(&self.resampler).input).unwrap_or(0);
        let pending = backlog + input_samples as u64;
        usize::try_from((pending * out_rate).div_ceil(in_rate)).unwrap_or(usize::MAX)
    }

    /// Drops every sample still buffered in the resampler.
    ///
    /// # Errors
    ///
    /// Returns a decoding error if the replacement resampler cannot be built.
    pub fn reset(&mut self) -> Result<(), VideoError> {
        let input = *self.resampler.input();
        let output = *self.resampler.output();
        self.resampler = resampling::Context::get(
            input.format,
            input.channel_layout,
            input.rate,
            output.format,
            output.channel_layout,
            output.rate,
        )
        .map_err(|e| video_error("Failed to rebuild resampler", e))?;
        Ok(())
    }
}
