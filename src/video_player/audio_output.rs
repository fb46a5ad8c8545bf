// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! The pacer pushes interleaved `i16` samples into a queue; the cpal callback
//! thread drains it and plays silence whenever the queue runs dry.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info, warn};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::application::port::{AudioFormat, AudioOutput, AudioOutputOpener};
use crate::error::{Result, VideoError};

/// Interleaved samples waiting for the device.
type SampleQueue = Arc<Mutex<VecDeque<i16>>>;

fn unavailable(context: &str, err: impl std::fmt::Display) -> VideoError {
    VideoError::AudioUnavailable(format!("{context}: {err}"))
}

/// Finds a device configuration close to the requested rate and channel count.
///
/// Preference order: exact rate and channels, exact rate with the closest
/// channel count, then the closest rate overall.
fn find_compatible_config(
    device: &cpal::Device,
    requested: AudioFormat,
) -> Option<(cpal::StreamConfig, cpal::SampleFormat)> {
    let supported: Vec<_> = device.supported_output_configs().ok()?.collect();
    let target_rate = cpal::SampleRate(requested.sample_rate);
    let channels = requested.channels;

    let stream_config = |channels: u16, sample_rate: cpal::SampleRate| cpal::StreamConfig {
        channels,
        sample_rate,
        buffer_size: cpal::BufferSize::Default,
    };

    // Exact match on rate and channel count
    if let Some(cfg) = supported.iter().find(|cfg| {
        cfg.channels() == channels
            && cfg.min_sample_rate() <= target_rate
            && cfg.max_sample_rate() >= target_rate
    }) {
        return Some((stream_config(channels, target_rate), cfg.sample_format()));
    }

    // Exact rate, closest channel count
    if let Some(cfg) = supported
        .iter()
        .filter(|cfg| cfg.min_sample_rate() <= target_rate && cfg.max_sample_rate() >= target_rate)
        .min_by_key(|cfg| cfg.channels().abs_diff(channels))
    {
        return Some((stream_config(cfg.channels(), target_rate), cfg.sample_format()));
    }

    // Closest rate overall, rate mismatch weighted above channel mismatch
    supported
        .iter()
        .map(|cfg| {
            let rate = target_rate.clamp(cfg.min_sample_rate(), cfg.max_sample_rate());
            let score = u64::from(rate.0.abs_diff(requested.sample_rate)) * 10
                + u64::from(cfg.channels().abs_diff(channels));
            (score, cfg, rate)
        })
        .min_by_key(|(score, _, _)| *score)
        .map(|(_, cfg, rate)| (stream_config(cfg.channels(), rate), cfg.sample_format()))
}

/// Audio output stream on the system's default device.
pub struct CpalAudioOutput {
    queue: SampleQueue,
    format: AudioFormat,

    /// The audio stream (kept alive to maintain playback).
    _stream: cpal::Stream,
}

impl CpalAudioOutput {
    /// Opens the default output device as close to `requested` as it allows.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::AudioUnavailable`] if no device exists or the
    /// stream cannot be built or started.
    pub fn new(requested: AudioFormat) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| VideoError::AudioUnavailable("No audio output device found".to_string()))?;

        info!("Audio device: {}", device.name().unwrap_or_default());

        let (config, sample_format) = match find_compatible_config(&device, requested) {
            Some(found) => found,
            None => {
                let default_cfg = device
                    .default_output_config()
                    .map_err(|e| unavailable("Failed to get audio config", e))?;
                warn!(
                    "Requested {} Hz/{}ch not supported, using device default {} Hz/{}ch",
                    requested.sample_rate,
                    requested.channels,
                    default_cfg.sample_rate().0,
                    default_cfg.channels()
                );
                (default_cfg.config(), default_cfg.sample_format())
            }
        };

        let format = AudioFormat {
            sample_rate: config.sample_rate.0,
            channels: config.channels,
        };
        let queue: SampleQueue = Arc::new(Mutex::new(VecDeque::new()));

        let stream = match sample_format {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, Arc::clone(&queue))?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, Arc::clone(&queue))?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, Arc::clone(&queue))?,
            other => {
                return Err(VideoError::AudioUnavailable(format!(
                    "Unsupported audio sample format: {other:?}"
                ))
                .into())
            }
        };

        stream
            .play()
            .map_err(|e| unavailable("Failed to start audio stream", e))?;

        Ok(Self {
            queue,
            format,
            _stream: stream,
        })
    }

    /// Builds an audio output stream for a specific sample format.
    fn build_stream<T: cpal::SizedSample + cpal::FromSample<i16>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        queue: SampleQueue,
    ) -> Result<cpal::Stream> {
        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut queue) = queue.lock() else {
                        // Mutex poisoned, output silence
                        data.fill(T::from_sample(0i16));
                        return;
                    };
                    for sample in data.iter_mut() {
                        *sample = T::from_sample(queue.pop_front().unwrap_or(0));
                    }
                },
                |err| {
                    error!("Audio output error: {err}");
                },
                None,
            )
            .map_err(|e| unavailable("Failed to build audio stream", e))?;

        Ok(stream)
    }
}

impl AudioOutput for CpalAudioOutput {
    fn format(&self) -> AudioFormat {
        self.format
    }

    fn queue(&mut self, samples: &[i16]) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.extend(samples.iter().copied());
        }
    }

    fn queued_bytes(&self) -> usize {
        self.queue
            .lock()
            .map(|queue| queue.len() * std::mem::size_of::<i16>())
            .unwrap_or(0)
    }

    fn clear(&mut self) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.clear();
        }
    }
}

/// Opens [`CpalAudioOutput`]s on the default device.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpalAudioOpener;

impl AudioOutputOpener for CpalAudioOpener {
    fn open(&mut self, requested: AudioFormat) -> Result<Box<dyn AudioOutput>> {
        Ok(Box::new(CpalAudioOutput::new(requested)?))
    }
}
