// SPDX-License-Identifier: MPL-2.0
//! Renderer-independent snapshot of the transport bar.

use crate::domain::video::{format_time_ms, Volume};
use crate::video_player::VideoPlayer;

/// What the transport bar should show this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportView {
    /// `"elapsed / total"`, or `None` when the duration is unknown.
    pub time_text: Option<String>,
    /// Filled fraction of the progress bar.
    pub progress: f64,
    /// Filled fraction of the volume bar.
    pub volume: f64,
    pub is_muted: bool,
    /// Draw the pause glyph (playing) instead of the play glyph.
    pub show_pause: bool,
}

impl TransportView {
    /// Builds the view from raw transport values.
    #[must_use]
    pub fn new(position_ms: i64, duration_ms: i64, volume: f32, paused: bool) -> Self {
        let (time_text, progress) = if duration_ms > 0 {
            #[allow(clippy::cast_precision_loss)] // millisecond timestamps fit f64 exactly
            let ratio = (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0);
            (
                Some(format!(
                    "{} / {}",
                    format_time_ms(position_ms),
                    format_time_ms(duration_ms)
                )),
                ratio,
            )
        } else {
            (None, 0.0)
        };

        let volume = Volume::new(volume);
        Self {
            time_text,
            progress,
            volume: f64::from(volume.value()),
            is_muted: volume.is_muted(),
            show_pause: !paused,
        }
    }

    /// Snapshot of `player` as the app sees it.
    #[must_use]
    pub fn from_player(player: &VideoPlayer, paused: bool) -> Self {
        Self::new(
            player.position_ms(),
            player.duration_ms(),
            player.volume(),
            paused,
        )
    }
}
