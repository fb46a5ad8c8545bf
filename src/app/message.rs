// SPDX-License-Identifier: MPL-2.0
//! Commands understood by the app controller, and runtime flags.

use crate::config::Config;
use crate::ui::Control;
use std::path::PathBuf;

/// A user intent, independent of the input device that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TogglePause,
    /// Seek one step forward from the current position.
    SeekForward,
    /// Seek one step back from the current position.
    SeekBackward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    /// Set the volume from a bar ratio in `[0, 1]`.
    SetVolume(f64),
    /// Seek to a ratio of the known duration.
    SeekToRatio(f64),
    Next,
    Previous,
    /// Replace the playlist with one built from this path.
    Open(PathBuf),
    /// Close the current item and browse its directory.
    Browse,
}

impl From<Control> for Command {
    fn from(control: Control) -> Self {
        match control {
            Control::PlayPause => Command::TogglePause,
            Control::Previous => Command::Previous,
            Control::Next => Command::Next,
            Control::Mute => Command::ToggleMute,
            Control::Volume(ratio) => Command::SetVolume(ratio),
            Control::Seek(ratio) => Command::SeekToRatio(ratio),
        }
    }
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flags {
    /// File or directory to play; the current directory when absent.
    pub path: Option<PathBuf>,
    pub volume: Option<f32>,
    pub no_audio: bool,
    /// Stop after the last playlist item instead of wrapping.
    pub once: bool,
    /// Settings file overriding the default location.
    pub config: Option<PathBuf>,
    pub font: Option<PathBuf>,
}

impl Flags {
    /// Overlays command-line choices on top of the loaded settings.
    pub fn apply(&self, config: &mut Config) {
        if let Some(volume) = self.volume {
            config.volume = Some(volume);
        }
        if self.no_audio {
            config.audio_enabled = Some(false);
        }
        if self.once {
            config.repeat_playlist = Some(false);
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_map_to_commands() {
        assert_eq!(Command::from(Control::PlayPause), Command::TogglePause);
        assert_eq!(Command::from(Control::Mute), Command::ToggleMute);
        assert_eq!(
            Command::from(Control::Seek(0.25)),
            Command::SeekToRatio(0.25)
        );
        assert_eq!(Command::from(Control::Volume(0.5)), Command::SetVolume(0.5));
    }

    #[test]
    fn flags_override_config() {
        let flags = Flags {
            volume: Some(0.3),
            no_audio: true,
            once: true,
            font: Some(PathBuf::from("font.ttf")),
            ..Flags::default()
        };
        let mut config = Config::default();
        flags.apply(&mut config);
        assert_eq!(config.volume, Some(0.3));
        assert!(!config.audio_enabled());
        assert!(!config.repeat_playlist());
        assert_eq!(config.font_path, Some(PathBuf::from("font.ttf")));
    }

    #[test]
    fn empty_flags_leave_config_untouched() {
        let mut config = Config::default();
        Flags::default().apply(&mut config);
        assert_eq!(config, Config::default());
    }
}
