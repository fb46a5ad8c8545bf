// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the player. Constants are organized by category.
//!
//! # Categories
//!
//! - **Pacing**: Frame interval fallback and the audio low-water mark
//! - **Presentation**: Texture fallback size
//! - **Audio**: Requested output format
//! - **Volume**: Volume bounds and step
//! - **Transport**: Seek step and time display
//! - **Layout**: Control bar geometry

// ==========================================================================
// Pacing Defaults
// ==========================================================================

/// Frame interval used when the stream frame rate is missing or implausible (25 fps).
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 40;

/// Highest average frame rate accepted from container metadata.
pub const MAX_SANE_FPS: f64 = 120.0;

/// The audio low-water mark is one second of output divided by this value.
pub const AUDIO_LOW_WATER_DIVISOR: u32 = 4;

// ==========================================================================
// Presentation Defaults
// ==========================================================================

/// Texture width used when the decoder reports no usable size.
pub const FALLBACK_TEXTURE_WIDTH: u32 = 640;

/// Texture height used when the decoder reports no usable size.
pub const FALLBACK_TEXTURE_HEIGHT: u32 = 360;

// ==========================================================================
// Audio Defaults
// ==========================================================================

/// Output rate requested when the decoder does not report one.
pub const FALLBACK_AUDIO_RATE: u32 = 44_100;

/// Channel count requested from the output device.
pub const OUTPUT_CHANNELS: u16 = 2;

/// Bytes per interleaved output sample (signed 16-bit).
pub const OUTPUT_BYTES_PER_SAMPLE: u16 = 2;

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Volume applied to every newly opened file.
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume adjustment step per key press (10%).
pub const VOLUME_STEP: f32 = 0.1;

/// Volumes at or below this level are shown as muted.
pub const MUTE_THRESHOLD: f32 = 0.001;

// ==========================================================================
// Transport Defaults
// ==========================================================================

/// Relative seek distance for the arrow keys.
pub const DEFAULT_SEEK_STEP_MS: i64 = 5_000;

/// Minimum relative seek step.
pub const MIN_SEEK_STEP_MS: i64 = 500;

/// Maximum relative seek step.
pub const MAX_SEEK_STEP_MS: i64 = 600_000;

/// Hours shown in the time display never exceed this.
pub const MAX_DISPLAY_HOURS: i64 = 99;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Height of the transport bar at the bottom of the window.
pub const CONTROL_BAR_HEIGHT: i32 = 72;

/// Horizontal margin inside the transport bar.
pub const CONTROL_MARGIN: i32 = 16;

/// Minimum width of the progress bar.
pub const MIN_PROGRESS_WIDTH: i32 = 50;

/// Extra vertical slack accepted around the progress bar for clicks.
pub const PROGRESS_HIT_SLACK: i32 = 4;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Pacing validation
    assert!(DEFAULT_FRAME_INTERVAL_MS > 0);
    assert!(MAX_SANE_FPS > 0.0);
    assert!(AUDIO_LOW_WATER_DIVISOR > 0);

    // Presentation validation
    assert!(FALLBACK_TEXTURE_WIDTH > 0);
    assert!(FALLBACK_TEXTURE_HEIGHT > 0);

    // Audio validation
    assert!(FALLBACK_AUDIO_RATE > 0);
    assert!(OUTPUT_CHANNELS > 0);
    assert!(OUTPUT_BYTES_PER_SAMPLE == 2);

    // Volume validation
    assert!(MIN_VOLUME < MAX_VOLUME);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_STEP > 0.0);
    assert!(MUTE_THRESHOLD < VOLUME_STEP);

    // Transport validation
    assert!(MIN_SEEK_STEP_MS > 0);
    assert!(MAX_SEEK_STEP_MS >= MIN_SEEK_STEP_MS);
    assert!(DEFAULT_SEEK_STEP_MS >= MIN_SEEK_STEP_MS);
    assert!(DEFAULT_SEEK_STEP_MS <= MAX_SEEK_STEP_MS);
    assert!(MAX_DISPLAY_HOURS > 0);

    // Layout validation
    assert!(CONTROL_BAR_HEIGHT > 0);
    assert!(CONTROL_MARGIN >= 0);
    assert!(MIN_PROGRESS_WIDTH > 0);
};
