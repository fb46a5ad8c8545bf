// SPDX-License-Identifier: MPL-2.0
//! Audio output port definition.
//!
//! The output owns a queue of interleaved `i16` samples. The pacer is the only
//! writer; the device drains it on its own schedule.

use crate::domain::video::AudioFormat;
use crate::error::Result;

/// Port for a running audio output.
pub trait AudioOutput {
    /// Format the device actually accepted.
    fn format(&self) -> AudioFormat;

    /// Appends interleaved samples to the playback queue.
    fn queue(&mut self, samples: &[i16]);

    /// Bytes currently waiting in the queue.
    fn queued_bytes(&self) -> usize;

    /// Drops everything not yet played.
    fn clear(&mut self);
}

/// Port for acquiring an audio output.
pub trait AudioOutputOpener {
    /// Opens an output as close to `requested` as the device allows.
    ///
    /// # Errors
    ///
    /// Returns an error if no output device is available.
    fn open(&mut self, requested: AudioFormat) -> Result<Box<dyn AudioOutput>>;
}

/// Opener that never provides a device, forcing video-only playback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudioOpener;

impl AudioOutputOpener for NullAudioOpener {
    fn open(&mut self, _requested: AudioFormat) -> Result<Box<dyn AudioOutput>> {
        Err(crate::error::VideoError::AudioUnavailable("audio disabled".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingAudio;

    fn _assert_object_safe(_: &dyn AudioOutput, _: &dyn AudioOutputOpener) {}

    const STEREO_48K: AudioFormat = AudioFormat {
        sample_rate: 48_000,
        channels: 2,
    };

    #[test]
    fn null_opener_refuses() {
        assert!(NullAudioOpener.open(STEREO_48K).is_err());
    }

    #[test]
    fn queued_bytes_counts_sixteen_bit_samples() {
        let mut output = RecordingAudio::new(STEREO_48K);
        output.queue(&[1, 2, 3, 4]);
        assert_eq!(output.queued_bytes(), 8);
        output.clear();
        assert_eq!(output.queued_bytes(), 0);
    }
}
