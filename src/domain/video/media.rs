// SPDX-License-Identifier: MPL-2.0
//! Properties of an opened media file that the player needs for pacing.

use super::newtypes::{FrameInterval, TextureSize};
use crate::config::defaults;

/// Interleaved signed 16-bit PCM format delivered to the audio output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioFormat {
    /// Format requested from the output device for a decoder running at `decoder_rate`.
    ///
    /// A decoder that reports no rate gets the 44.1 kHz fallback.
    #[must_use]
    pub fn requested_for(decoder_rate: u32) -> Self {
        Self {
            sample_rate: if decoder_rate > 0 {
                decoder_rate
            } else {
                defaults::FALLBACK_AUDIO_RATE
            },
            channels: defaults::OUTPUT_CHANNELS,
        }
    }

    #[must_use]
    pub fn bytes_per_sample(self) -> usize {
        usize::from(defaults::OUTPUT_BYTES_PER_SAMPLE)
    }

    #[must_use]
    pub fn bytes_per_second(self) -> usize {
        self.sample_rate as usize * usize::from(self.channels) * self.bytes_per_sample()
    }

    /// Queue occupancy under which the pacer decodes regardless of the frame deadline.
    #[must_use]
    pub fn low_water_bytes(self) -> usize {
        self.bytes_per_second() / defaults::AUDIO_LOW_WATER_DIVISOR as usize
    }
}

/// What the player learns about a file when it is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub texture: TextureSize,
    /// Zero when the container does not report a duration.
    pub duration_ms: i64,
    pub frame_interval: FrameInterval,
    /// Output format of the active audio path, `None` for video-only playback.
    pub audio: Option<AudioFormat>,
}

impl MediaInfo {
    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}
