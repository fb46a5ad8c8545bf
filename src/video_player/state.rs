// SPDX-License-Identifier: MPL-2.0
//! The transport controller: one playback session at a time.
//!
//! [`VideoPlayer`] owns the live session exclusively. Opening always tears the
//! previous session down first; closing twice is harmless. Every mutation of
//! position, end-of-stream and pacing state happens here.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::pacer::Pacer;
use super::surface::FrameSurface;
use super::volume::apply_volume;
use crate::application::port::{
    AudioOutput, AudioOutputOpener, Clock, DecodeOutcome, MediaOpener, MediaPipeline, OpenedMedia,
};
use crate::domain::video::{clamp_position_ms, MediaInfo, Volume};
use crate::error::{Result, VideoError};

/// Everything that lives exactly as long as one opened file.
///
/// Fields drop in declaration order: the texture, then the decode pipeline,
/// then the audio device.
struct Session {
    surface: FrameSurface,
    pipeline: Box<dyn MediaPipeline>,
    audio: Option<Box<dyn AudioOutput>>,
    pacer: Pacer,
    info: MediaInfo,
    path: PathBuf,
    position_ms: i64,
    end_of_stream: bool,
}

/// Single-session video player.
pub struct VideoPlayer {
    opener: Box<dyn MediaOpener>,
    audio_opener: Box<dyn AudioOutputOpener>,
    clock: Box<dyn Clock>,
    initial_volume: Volume,
    volume: Volume,
    session: Option<Session>,
}

impl VideoPlayer {
    /// Creates a closed player.
    pub fn new(
        opener: Box<dyn MediaOpener>,
        audio_opener: Box<dyn AudioOutputOpener>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            opener,
            audio_opener,
            clock,
            initial_volume: Volume::default(),
            volume: Volume::default(),
            session: None,
        }
    }

    /// Sets the volume every subsequent `open` starts with.
    #[must_use]
    pub fn with_initial_volume(mut self, volume: f32) -> Self {
        self.initial_volume = Volume::new(volume);
        self.volume = self.initial_volume;
        self
    }

    /// Opens `path`, closing any current session first.
    ///
    /// On success position is 0, end-of-stream is clear and the volume is
    /// back at its initial value.
    ///
    /// # Errors
    ///
    /// Returns the opener's error; the player is then closed.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.close();

        let OpenedMedia { pipeline, audio } = self.opener.open(path, self.audio_opener.as_mut())?;
        let info = pipeline.info().clone();
        let now = self.clock.now_ms();
        let pacer = Pacer::new(
            info.frame_interval,
            audio.as_ref().map(|output| output.format()),
            now,
        );

        info!(
            "Playing {} ({}x{}, {} ms, {})",
            path.display(),
            info.texture.width,
            info.texture.height,
            info.duration_ms,
            if audio.is_some() { "with audio" } else { "video only" }
        );

        self.volume = self.initial_volume;
        self.session = Some(Session {
            surface: FrameSurface::new(info.texture),
            pipeline,
            audio,
            pacer,
            info,
            path: path.to_path_buf(),
            position_ms: 0,
            end_of_stream: false,
        });
        Ok(())
    }

    /// Releases the current session. Does nothing when already closed.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Closed {}", session.path.display());
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Runs one pacing tick. A no-op when closed or at end of stream.
    pub fn step(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.end_of_stream {
            return;
        }

        let now = self.clock.now_ms();
        let queued = session.audio.as_ref().map(|output| output.queued_bytes());
        let plan = session.pacer.plan(now, queued);
        if !plan.should_decode() {
            return;
        }

        let volume = self.volume;
        let audio = &mut session.audio;
        let mut on_audio = |samples: &mut [i16]| {
            apply_volume(samples, volume);
            if let Some(output) = audio.as_mut() {
                output.queue(samples);
            }
        };

        let pts_ms = match session.pipeline.decode_next(&mut on_audio) {
            Ok(DecodeOutcome::Frame { pts_ms }) => pts_ms,
            Ok(DecodeOutcome::EndOfStream) => {
                info!("End of stream: {}", session.path.display());
                session.end_of_stream = true;
                return;
            }
            Err(e) => {
                warn!("Decode failed, skipping tick: {e}");
                return;
            }
        };

        if !plan.frame_due {
            return;
        }

        match session.pipeline.present(&mut session.surface) {
            Ok(()) => {
                if let Some(pts) = pts_ms {
                    session.position_ms = clamp_position_ms(pts, session.info.duration_ms);
                }
                session.pacer.mark_presented(now);
            }
            // The deadline stays where it was, so the next tick tries again
            Err(e) => warn!("Failed to present frame: {e}"),
        }
    }

    /// Seeks to `target_ms`, clamped into `[0, duration]`.
    ///
    /// On success queued audio is dropped, position equals the clamped
    /// target and end-of-stream is clear.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::NotOpen`] when closed, or the pipeline's seek
    /// error. A failed seek changes nothing.
    pub fn seek(&mut self, target_ms: i64) -> Result<()> {
        let session = self.session.as_mut().ok_or(VideoError::NotOpen)?;
        let target = clamp_position_ms(target_ms, session.info.duration_ms);

        session.pipeline.seek(target)?;

        if let Some(output) = session.audio.as_mut() {
            output.clear();
        }
        session.position_ms = target;
        session.pacer.reset(self.clock.now_ms());
        session.end_of_stream = false;
        debug!("Seek to {target} ms");
        Ok(())
    }

    /// Sets the playback volume, clamped to `[0.0, 1.0]`.
    ///
    /// Takes effect on the next decoded audio buffer.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = Volume::new(volume);
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume.value()
    }

    /// Duration of the open file, 0 when unknown or closed.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        self.session.as_ref().map_or(0, |s| s.info.duration_ms)
    }

    /// Timestamp of the last presented frame, or the last seek target.
    #[must_use]
    pub fn position_ms(&self) -> i64 {
        self.session.as_ref().map_or(0, |s| s.position_ms)
    }

    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.end_of_stream)
    }

    /// The presentation texture of the open file.
    #[must_use]
    pub fn texture(&self) -> Option<&FrameSurface> {
        self.session.as_ref().map(|s| &s.surface)
    }

    #[must_use]
    pub fn media_info(&self) -> Option<&MediaInfo> {
        self.session.as_ref().map(|s| &s.info)
    }

    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.audio.is_some())
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.session.as_ref().map(|s| s.path.as_path())
    }
}
