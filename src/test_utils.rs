// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and scripted port doubles.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.
//! It also provides a manual clock and recording audio/video sinks shared by the
//! player and app tests.

pub use approx::assert_abs_diff_eq;

use std::cell::Cell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::application::port::{
    AudioFormat, AudioOutput, AudioOutputOpener, Clock, DecodeOutcome, MediaOpener,
    MediaPipeline, OpenedMedia, VideoSurface,
};
use crate::domain::video::MediaInfo;
use crate::error::{Result, VideoError};

/// Clock whose time only moves when a test says so.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Audio output that keeps everything it is given.
#[derive(Debug, Clone)]
pub struct RecordingAudio {
    pub format: AudioFormat,
    pub queue: Arc<Mutex<VecDeque<i16>>>,
    pub clears: Arc<Mutex<usize>>,
}

impl RecordingAudio {
    pub fn new(format: AudioFormat) -> Self {
        Self {
            format,
            queue: Arc::new(Mutex::new(VecDeque::new())),
            clears: Arc::new(Mutex::new(0)),
        }
    }

    pub fn queued_samples(&self) -> Vec<i16> {
        self.queue.lock().unwrap().iter().copied().collect()
    }

    /// Simulates the device consuming everything queued so far.
    pub fn drain(&self) {
        self.queue.lock().unwrap().clear();
    }

    pub fn clear_count(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

impl AudioOutput for RecordingAudio {
    fn format(&self) -> AudioFormat {
        self.format
    }

    fn queue(&mut self, samples: &[i16]) {
        self.queue.lock().unwrap().extend(samples.iter().copied());
    }

    fn queued_bytes(&self) -> usize {
        self.queue.lock().unwrap().len() * std::mem::size_of::<i16>()
    }

    fn clear(&mut self) {
        self.queue.lock().unwrap().clear();
        *self.clears.lock().unwrap() += 1;
    }
}

/// Opens a shared [`RecordingAudio`] for every request, or refuses when `None`.
pub struct RecordingAudioOpener {
    pub output: Option<RecordingAudio>,
}

impl AudioOutputOpener for RecordingAudioOpener {
    fn open(&mut self, requested: AudioFormat) -> Result<Box<dyn AudioOutput>> {
        match &self.output {
            Some(output) => {
                let mut output = output.clone();
                output.format.sample_rate = requested.sample_rate;
                Ok(Box::new(output))
            }
            None => Err(VideoError::AudioUnavailable("no device".to_string()).into()),
        }
    }
}

/// One scripted step of a [`ScriptedPipeline`].
#[derive(Debug, Clone)]
pub enum Step {
    /// Audio samples emitted before the next video frame.
    Audio(Vec<i16>),
    /// A video frame with the given timestamp.
    Video(Option<i64>),
    /// A corrupt packet: the decode call fails and playback carries on.
    Error,
}

/// Observations a test can make about a [`ScriptedPipeline`] after it was moved into a player.
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub presented: Cell<usize>,
    pub decode_calls: Cell<usize>,
    pub seeks: std::cell::RefCell<Vec<i64>>,
    pub dropped: Cell<bool>,
}

/// Pipeline double that replays a fixed list of steps.
pub struct ScriptedPipeline {
    info: MediaInfo,
    steps: VecDeque<Step>,
    fail_seek: bool,
    fail_present: bool,
    pending_frame: bool,
    stats: Rc<PipelineStats>,
}

impl ScriptedPipeline {
    pub fn new(info: MediaInfo, steps: Vec<Step>) -> (Self, Rc<PipelineStats>) {
        let stats = Rc::new(PipelineStats::default());
        (
            Self {
                info,
                steps: steps.into(),
                fail_seek: false,
                fail_present: false,
                pending_frame: false,
                stats: Rc::clone(&stats),
            },
            stats,
        )
    }

    pub fn failing_seek(mut self) -> Self {
        self.fail_seek = true;
        self
    }

    pub fn failing_present(mut self) -> Self {
        self.fail_present = true;
        self
    }
}

impl Drop for ScriptedPipeline {
    fn drop(&mut self) {
        self.stats.dropped.set(true);
    }
}

impl MediaPipeline for ScriptedPipeline {
    fn info(&self) -> &MediaInfo {
        &self.info
    }

    fn decode_next(&mut self, on_audio: &mut dyn FnMut(&mut [i16])) -> Result<DecodeOutcome> {
        self.stats.decode_calls.set(self.stats.decode_calls.get() + 1);
        while let Some(step) = self.steps.pop_front() {
            match step {
                Step::Audio(mut samples) => on_audio(&mut samples),
                Step::Video(pts_ms) => {
                    self.pending_frame = true;
                    return Ok(DecodeOutcome::Frame { pts_ms });
                }
                Step::Error => {
                    return Err(VideoError::DecodingFailed("corrupt packet".to_string()).into());
                }
            }
        }
        Ok(DecodeOutcome::EndOfStream)
    }

    fn present(&mut self, surface: &mut dyn VideoSurface) -> Result<()> {
        if !self.pending_frame {
            return Err(VideoError::DecodingFailed("no frame".to_string()).into());
        }
        if self.fail_present {
            return Err(VideoError::DecodingFailed("surface lost".to_string()).into());
        }
        let (w, h) = surface.dimensions();
        let y = vec![16u8; (w * h) as usize];
        let c = vec![128u8; (w.div_ceil(2) * h.div_ceil(2)) as usize];
        surface.update_yuv(&y, w as usize, &c, w.div_ceil(2) as usize, &c, w.div_ceil(2) as usize);
        self.stats.presented.set(self.stats.presented.get() + 1);
        Ok(())
    }

    fn seek(&mut self, target_ms: i64) -> Result<()> {
        if self.fail_seek {
            return Err(VideoError::SeekFailed("scripted".to_string()).into());
        }
        self.stats.seeks.borrow_mut().push(target_ms);
        Ok(())
    }
}

/// Opener that hands out pipelines built by a closure, keyed by path.
pub struct ScriptedOpener<F>
where
    F: FnMut(&Path) -> Result<ScriptedPipeline>,
{
    pub build: F,
}

impl<F> MediaOpener for ScriptedOpener<F>
where
    F: FnMut(&Path) -> Result<ScriptedPipeline>,
{
    fn open(&mut self, path: &Path, audio: &mut dyn AudioOutputOpener) -> Result<OpenedMedia> {
        let mut pipeline = (self.build)(path)?;
        let audio_output = match pipeline.info.audio {
            Some(requested) => match audio.open(requested) {
                Ok(output) => {
                    pipeline.info.audio = Some(output.format());
                    Some(output)
                }
                Err(_) => {
                    pipeline.info.audio = None;
                    None
                }
            },
            None => None,
        };
        Ok(OpenedMedia {
            pipeline: Box::new(pipeline),
            audio: audio_output,
        })
    }
}
