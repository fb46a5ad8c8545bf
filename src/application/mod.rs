// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports between the player and its adapters.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The player and app controller use the ports only

pub mod port;
