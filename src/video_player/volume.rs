// SPDX-License-Identifier: MPL-2.0
//! Software gain in the sample domain.
//!
//! This is the only place user volume touches audio: resampled buffers pass
//! through [`apply_volume`] right before they are queued.

use crate::domain::video::Volume;

/// Scales interleaved samples in place by `volume`.
///
/// Results truncate toward zero and saturate at the `i16` range.
///
/// # Example
///
/// ```
/// use reelplay::domain::video::Volume;
/// use reelplay::video_player::apply_volume;
///
/// let mut samples = [1000_i16, -1000, 32_767];
/// apply_volume(&mut samples, Volume::new(0.5));
/// assert_eq!(samples, [500, -500, 16_383]);
/// ```
pub fn apply_volume(samples: &mut [i16], volume: Volume) {
    let gain = f64::from(volume.value());
    if (gain - 1.0).abs() < f64::EPSILON {
        return;
    }
    let (min, max) = (f64::from(i16::MIN), f64::from(i16::MAX));
    for sample in samples.iter_mut() {
        #[allow(clippy::cast_possible_truncation)] // clamped to the i16 range first
        let scaled = (f64::from(*sample) * gain).clamp(min, max) as i16;
        *sample = scaled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_gain_is_identity() {
        let mut samples = [i16::MIN, -1, 0, 1, i16::MAX];
        apply_volume(&mut samples, Volume::new(1.0));
        assert_eq!(samples, [i16::MIN, -1, 0, 1, i16::MAX]);
    }

    #[test]
    fn zero_gain_silences() {
        let mut samples = [i16::MIN, -1234, 0, 1234, i16::MAX];
        apply_volume(&mut samples, Volume::new(0.0));
        assert_eq!(samples, [0; 5]);
    }

    #[test]
    fn half_gain_truncates_toward_zero() {
        let mut samples = [3_i16, -3, 101, -101];
        apply_volume(&mut samples, Volume::new(0.5));
        assert_eq!(samples, [1, -1, 50, -50]);
    }

    #[test]
    fn extremes_stay_in_range() {
        let mut samples = [i16::MIN, i16::MAX];
        apply_volume(&mut samples, Volume::new(0.9));
        assert_eq!(samples[0], -29_491);
        assert_eq!(samples[1], 29_490);
    }
}
