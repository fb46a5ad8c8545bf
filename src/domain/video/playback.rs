// SPDX-License-Identifier: MPL-2.0
//! Video playback state machine.
//!
//! This module defines the playback states shown by the transport controls.

/// Represents the current playback state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing is open.
    #[default]
    Stopped,
    /// Frames are being paced out.
    Playing,
    /// A file is open but stepping is suspended.
    Paused,
    /// The demuxer ran out of input; only a seek or reopen resumes.
    Ended,
}

impl PlaybackState {
    /// Derives the state from the player's flags.
    #[must_use]
    pub fn from_flags(is_open: bool, paused: bool, end_of_stream: bool) -> Self {
        match (is_open, end_of_stream, paused) {
            (false, _, _) => Self::Stopped,
            (true, true, _) => Self::Ended,
            (true, false, true) => Self::Paused,
            (true, false, false) => Self::Playing,
        }
    }

    /// Returns true if the video is currently playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if the video is paused.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns true if nothing is open.
    #[must_use]
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }
}
