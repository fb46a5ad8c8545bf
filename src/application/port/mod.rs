// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the player remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`pipeline`]: Opening files and decoding them frame by frame
//! - [`audio`]: The audio output queue
//! - [`surface`]: The presentation texture
//! - [`clock`]: Monotonic time for pacing
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `FFmpeg` or `cpal` types)
//! - Traits are not `Send`: playback is single-threaded
//! - Methods return `Result` with the crate error type

pub mod audio;
pub mod clock;
pub mod pipeline;
pub mod surface;

// Re-export main types for convenience
pub use crate::domain::video::AudioFormat;
pub use audio::{AudioOutput, AudioOutputOpener, NullAudioOpener};
pub use clock::Clock;
pub use pipeline::{DecodeOutcome, MediaOpener, MediaPipeline, OpenedMedia};
pub use surface::VideoSurface;
