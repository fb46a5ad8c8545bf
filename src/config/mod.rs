// SPDX-License-Identifier: MPL-2.0
//! This module handles the player's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use reelplay::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.volume = Some(0.5);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ReelPlay";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Volume applied whenever a file is opened.
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default)]
    pub seek_step_ms: Option<i64>,
    #[serde(default)]
    pub volume_step: Option<f32>,
    /// When false, playback always runs video-only.
    #[serde(default)]
    pub audio_enabled: Option<bool>,
    /// Font resource handed to the rendering layer; playback never reads it.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    /// Wrap to the first playlist entry after the last one ends.
    #[serde(default)]
    pub repeat_playlist: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volume: Some(DEFAULT_VOLUME),
            seek_step_ms: Some(DEFAULT_SEEK_STEP_MS),
            volume_step: Some(VOLUME_STEP),
            audio_enabled: Some(true),
            font_path: None,
            repeat_playlist: Some(true),
        }
    }
}

impl Config {
    /// Initial per-file volume, clamped to the valid range.
    #[must_use]
    pub fn initial_volume(&self) -> f32 {
        self.volume
            .unwrap_or(DEFAULT_VOLUME)
            .clamp(MIN_VOLUME, MAX_VOLUME)
    }

    #[must_use]
    pub fn seek_step_ms(&self) -> i64 {
        self.seek_step_ms
            .unwrap_or(DEFAULT_SEEK_STEP_MS)
            .clamp(MIN_SEEK_STEP_MS, MAX_SEEK_STEP_MS)
    }

    #[must_use]
    pub fn volume_step(&self) -> f32 {
        self.volume_step
            .unwrap_or(VOLUME_STEP)
            .clamp(MUTE_THRESHOLD, MAX_VOLUME)
    }

    #[must_use]
    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled.unwrap_or(true)
    }

    #[must_use]
    pub fn repeat_playlist(&self) -> bool {
        self.repeat_playlist.unwrap_or(true)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            log::warn!("Ignoring invalid settings file {}: {e}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
