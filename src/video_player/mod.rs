// SPDX-License-Identifier: MPL-2.0
//! Playback engine for ReelPlay.
//!
//! A single-threaded transport controller paces decode and presentation on
//! the caller's tick while a cpal stream drains queued audio on its own thread.

pub mod audio_output;
pub mod pacer;
mod state;
pub mod surface;
pub mod sync;
mod volume;

pub use audio_output::{CpalAudioOpener, CpalAudioOutput};
pub use pacer::{Pacer, TickPlan};
pub use state::VideoPlayer;
pub use surface::FrameSurface;
pub use sync::SystemClock;
pub use volume::apply_volume;

use crate::config::Config;
use crate::infrastructure::ffmpeg::FfmpegOpener;

/// Creates a player wired to FFmpeg, the system clock and, unless disabled,
/// the default audio device.
#[must_use]
pub fn create_player(config: &Config) -> VideoPlayer {
    let audio_opener: Box<dyn crate::application::port::AudioOutputOpener> =
        if config.audio_enabled() {
            Box::new(CpalAudioOpener)
        } else {
            Box::new(crate::application::port::NullAudioOpener)
        };
    VideoPlayer::new(
        Box::new(FfmpegOpener),
        audio_opener,
        Box::new(SystemClock),
    )
    .with_initial_volume(config.initial_volume())
}
