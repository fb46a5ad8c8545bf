// SPDX-License-Identifier: MPL-2.0
//! Renderer-independent presentation logic.
//!
//! - [`layout`] - Transport bar geometry, hit testing and letterboxing
//! - [`transport`] - Per-frame transport bar snapshot
//! - [`palette`] - Interface colors

pub mod layout;
pub mod palette;
pub mod transport;

pub use layout::{fit_rect, Control, PlayerLayout, Rect};
pub use palette::{Palette, Rgba};
pub use transport::TransportView;
