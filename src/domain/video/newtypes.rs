// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for video playback values,
//! ensuring they are always within valid ranges.

use crate::config::defaults;

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0, where 1.0 = unity gain).
pub mod volume_bounds {
    use super::defaults;

    /// Minimum volume level.
    pub const MIN: f32 = defaults::MIN_VOLUME;
    /// Maximum volume level. The sample-domain gain never amplifies.
    pub const MAX: f32 = defaults::MAX_VOLUME;
    /// Default volume level.
    pub const DEFAULT: f32 = defaults::DEFAULT_VOLUME;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    ///
    /// NaN is treated as silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(volume_bounds::MIN);
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively muted (at or below the audible threshold).
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 <= defaults::MUTE_THRESHOLD
    }

    /// Moves the volume by `delta`, clamping to the valid range.
    #[must_use]
    pub fn offset(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

// =============================================================================
// FrameInterval
// =============================================================================

/// Wall-clock time between two presented video frames, in milliseconds.
///
/// Always derived from the stream's average frame rate; implausible rates
/// collapse to the 25 fps default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInterval(u32);

impl FrameInterval {
    /// Derives the interval from an average frame rate given as a rational.
    ///
    /// Both terms must be positive; rates outside `(0, 120]` yield the default.
    #[must_use]
    pub fn from_frame_rate(numerator: i32, denominator: i32) -> Self {
        if numerator <= 0 || denominator <= 0 {
            return Self::default();
        }
        let fps = f64::from(numerator) / f64::from(denominator);
        if fps > 0.0 && fps <= defaults::MAX_SANE_FPS {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let ms = (1000.0 / fps) as u32;
            Self(ms)
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn as_millis(self) -> u32 {
        self.0
    }
}

impl Default for FrameInterval {
    fn default() -> Self {
        Self(defaults::DEFAULT_FRAME_INTERVAL_MS)
    }
}

// =============================================================================
// TextureSize
// =============================================================================

/// Pixel dimensions of the presentation texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

impl TextureSize {
    /// Uses the decoder's advertised size, or the 640×360 fallback when
    /// either dimension is not positive.
    #[must_use]
    pub fn from_decoder(width: i64, height: i64) -> Self {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Self {
                width: w,
                height: h,
            },
            _ => Self::default(),
        }
    }

    /// Width and height of each chroma plane in 4:2:0 layout.
    #[must_use]
    pub fn chroma(self) -> (u32, u32) {
        (self.width.div_ceil(2), self.height.div_ceil(2))
    }
}

impl Default for TextureSize {
    fn default() -> Self {
        Self {
            width: defaults::FALLBACK_TEXTURE_WIDTH,
            height: defaults::FALLBACK_TEXTURE_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn volume_clamps_to_valid_range() {
        assert_abs_diff_eq!(Volume::new(0.5).value(), 0.5);
        assert_abs_diff_eq!(Volume::new(-0.5).value(), 0.0);
        assert_abs_diff_eq!(Volume::new(1.7).value(), 1.0);
        assert_abs_diff_eq!(Volume::new(f32::NAN).value(), 0.0);
    }

    #[test]
    fn volume_muted_threshold() {
        assert!(Volume::new(0.0).is_muted());
        assert!(Volume::new(0.001).is_muted());
        assert!(!Volume::new(0.01).is_muted());
    }

    #[test]
    fn volume_offset_clamps() {
        let v = Volume::new(0.95).offset(0.1);
        assert_abs_diff_eq!(v.value(), 1.0);
        let v = Volume::new(0.05).offset(-0.1);
        assert_abs_diff_eq!(v.value(), 0.0);
    }

    #[test]
    fn frame_interval_from_common_rates() {
        assert_eq!(FrameInterval::from_frame_rate(25, 1).as_millis(), 40);
        assert_eq!(FrameInterval::from_frame_rate(30_000, 1001).as_millis(), 33);
        assert_eq!(FrameInterval::from_frame_rate(60, 1).as_millis(), 16);
        assert_eq!(FrameInterval::from_frame_rate(120, 1).as_millis(), 8);
    }

    #[test]
    fn frame_interval_rejects_implausible_rates() {
        assert_eq!(FrameInterval::from_frame_rate(0, 1).as_millis(), 40);
        assert_eq!(FrameInterval::from_frame_rate(25, 0).as_millis(), 40);
        assert_eq!(FrameInterval::from_frame_rate(-30, 1).as_millis(), 40);
        assert_eq!(FrameInterval::from_frame_rate(30, -1).as_millis(), 40);
        assert_eq!(FrameInterval::from_frame_rate(-30, -1).as_millis(), 40);
        assert_eq!(FrameInterval::from_frame_rate(1000, 1).as_millis(), 40);
    }

    #[test]
    fn texture_size_falls_back_on_unknown_dimensions() {
        assert_eq!(TextureSize::from_decoder(0, 720), TextureSize::default());
        assert_eq!(TextureSize::from_decoder(1280, -1), TextureSize::default());
        assert_eq!(
            TextureSize::from_decoder(1280, 720),
            TextureSize {
                width: 1280,
                height: 720
            }
        );
    }

    #[test]
    fn texture_chroma_rounds_up_odd_sizes() {
        let size = TextureSize {
            width: 641,
            height: 361,
        };
        assert_eq!(size.chroma(), (321, 181));
    }
}
