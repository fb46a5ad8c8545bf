// SPDX-License-Identifier: MPL-2.0
//! Pixel geometry of the transport bar.
//!
//! Everything here is a pure function of the output size, so a renderer and
//! the click handler always agree on where each control is.

use crate::config::{CONTROL_BAR_HEIGHT, CONTROL_MARGIN, MIN_PROGRESS_WIDTH, PROGRESS_HIT_SLACK};

const PLAY_SIZE: i32 = 32;
const SKIP_SIZE: i32 = 28;
const PLAY_TO_PREV_GAP: i32 = 12;
const PREV_TO_NEXT_GAP: i32 = 8;
const VOLUME_BAR_WIDTH: i32 = 80;
const VOLUME_BAR_HEIGHT: i32 = 6;
const VOLUME_ICON_SIZE: i32 = 24;
const VOLUME_ICON_GAP: i32 = 9;
const PROGRESS_GAP: i32 = 20;
const PROGRESS_HEIGHT: i32 = 8;

/// Axis-aligned integer rectangle; `x..x+w` by `y..y+h`, right and bottom edges exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` centred vertically on `center_y`.
    fn square(x: i32, center_y: i32, size: i32) -> Self {
        Self::new(x, center_y - size / 2, size, size)
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Horizontal position of `x` within the rect as a ratio in `[0, 1]`.
    fn ratio_at(&self, x: i32) -> f64 {
        if self.w <= 0 {
            return 0.0;
        }
        (f64::from(x - self.x) / f64::from(self.w)).clamp(0.0, 1.0)
    }
}

/// What a click on the transport bar means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    PlayPause,
    Previous,
    Next,
    Mute,
    /// Set the volume to this ratio.
    Volume(f64),
    /// Seek to this ratio of the duration.
    Seek(f64),
}

/// Positions of every transport control for one output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLayout {
    pub bar: Rect,
    pub play: Rect,
    pub previous: Rect,
    pub next: Rect,
    pub volume_icon: Rect,
    pub volume_bar: Rect,
    pub progress: Rect,
}

impl PlayerLayout {
    /// Lays out the bar along the bottom of a `width`×`height` output.
    #[must_use]
    pub fn compute(width: i32, height: i32) -> Self {
        let bar = Rect::new(0, height - CONTROL_BAR_HEIGHT, width, CONTROL_BAR_HEIGHT);
        let center_y = bar.y + CONTROL_BAR_HEIGHT / 2;

        let play = Rect::square(bar.x + CONTROL_MARGIN, center_y, PLAY_SIZE);
        let previous = Rect::square(play.right() + PLAY_TO_PREV_GAP, center_y, SKIP_SIZE);
        let next = Rect::square(previous.right() + PREV_TO_NEXT_GAP, center_y, SKIP_SIZE);

        let volume_bar = Rect::new(
            width - CONTROL_MARGIN - VOLUME_BAR_WIDTH,
            center_y - VOLUME_BAR_HEIGHT / 2,
            VOLUME_BAR_WIDTH,
            VOLUME_BAR_HEIGHT,
        );
        let volume_icon = Rect::square(
            volume_bar.x - VOLUME_ICON_SIZE - VOLUME_ICON_GAP,
            center_y,
            VOLUME_ICON_SIZE,
        );

        let progress_left = next.right() + PROGRESS_GAP;
        let progress_right = (volume_icon.x - PROGRESS_GAP).max(progress_left + MIN_PROGRESS_WIDTH);
        let progress = Rect::new(
            progress_left,
            center_y - PROGRESS_HEIGHT / 2,
            progress_right - progress_left,
            PROGRESS_HEIGHT,
        );

        Self {
            bar,
            play,
            previous,
            next,
            volume_icon,
            volume_bar,
            progress,
        }
    }

    /// Seek ratio for a click near the progress bar.
    ///
    /// The hit area extends a few pixels above and below the drawn bar.
    #[must_use]
    pub fn progress_hit(&self, x: i32, y: i32) -> Option<f64> {
        let p = self.progress;
        let inside = x >= p.x
            && x < p.right()
            && y >= p.y - PROGRESS_HIT_SLACK
            && y < p.bottom() + PROGRESS_HIT_SLACK;
        inside.then(|| p.ratio_at(x))
    }

    /// Volume ratio for a click on the volume bar.
    #[must_use]
    pub fn volume_hit(&self, x: i32, y: i32) -> Option<f64> {
        self.volume_bar
            .contains(x, y)
            .then(|| self.volume_bar.ratio_at(x))
    }

    /// Classifies a click. Buttons take precedence over the bars.
    #[must_use]
    pub fn hit(&self, x: i32, y: i32) -> Option<Control> {
        if self.play.contains(x, y) {
            Some(Control::PlayPause)
        } else if self.previous.contains(x, y) {
            Some(Control::Previous)
        } else if self.next.contains(x, y) {
            Some(Control::Next)
        } else if self.volume_icon.contains(x, y) {
            Some(Control::Mute)
        } else if let Some(ratio) = self.volume_hit(x, y) {
            Some(Control::Volume(ratio))
        } else {
            self.progress_hit(x, y).map(Control::Seek)
        }
    }
}

/// Largest rect with the texture's aspect ratio that fits the output, centred.
///
/// Returns `None` for a degenerate texture.
#[must_use]
pub fn fit_rect(texture_w: u32, texture_h: u32, out_w: i32, out_h: i32) -> Option<Rect> {
    if texture_w == 0 || texture_h == 0 {
        return None;
    }
    let (tw, th) = (f64::from(texture_w), f64::from(texture_h));
    let scale = (f64::from(out_w) / tw).min(f64::from(out_h) / th);
    #[allow(clippy::cast_possible_truncation)] // bounded by the output size
    let (w, h) = ((tw * scale) as i32, (th * scale) as i32);
    Some(Rect::new((out_w - w) / 2, (out_h - h) / 2, w, h))
}
