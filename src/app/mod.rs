// SPDX-License-Identifier: MPL-2.0
//! Application controller: the player, its playlist and the user-facing
//! transport state (paused, muted) that the player itself does not track.

mod message;

pub use message::{Command, Flags};

use crate::browser::{BrowserInput, BrowserResult, FileBrowser};
use crate::config::Config;
use crate::domain::video::{PlaybackState, Volume};
use crate::playlist::Playlist;
use crate::ui::{PlayerLayout, TransportView};
use crate::video_player::VideoPlayer;
use log::{info, warn};
use std::path::Path;

/// Root controller driven by a host loop.
pub struct App {
    player: VideoPlayer,
    playlist: Playlist,
    paused: bool,
    muted: bool,
    /// Volume restored when unmuting.
    volume_before_mute: f32,
    seek_step_ms: i64,
    volume_step: f32,
    repeat_playlist: bool,
    finished: bool,
    /// Present while the user is picking a file instead of watching.
    browser: Option<FileBrowser>,
}

impl App {
    /// Creates the controller and opens the playlist's current item.
    ///
    /// If that item cannot be opened the next playable one is tried.
    pub fn new(player: VideoPlayer, playlist: Playlist, config: &Config) -> Self {
        let mut app = Self {
            player,
            playlist,
            paused: false,
            muted: false,
            volume_before_mute: config.initial_volume(),
            seek_step_ms: config.seek_step_ms(),
            volume_step: config.volume_step(),
            repeat_playlist: config.repeat_playlist(),
            finished: false,
            browser: None,
        };
        if !app.open_current() {
            app.advance();
        }
        app
    }

    /// Applies one user command.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::TogglePause => self.paused = !self.paused,
            Command::SeekForward => self.seek_relative(self.seek_step_ms),
            Command::SeekBackward => self.seek_relative(-self.seek_step_ms),
            Command::VolumeUp => self.step_volume(self.volume_step),
            Command::VolumeDown => self.step_volume(-self.volume_step),
            Command::SetVolume(ratio) => {
                #[allow(clippy::cast_possible_truncation)] // ratio is in [0, 1]
                self.change_volume(ratio as f32);
            }
            Command::ToggleMute => self.toggle_mute(),
            Command::SeekToRatio(ratio) => self.seek_to_ratio(ratio),
            Command::Next => {
                self.playlist.next();
                self.open_current();
            }
            Command::Previous => {
                self.playlist.previous();
                self.open_current();
            }
            Command::Open(path) => self.open_path(&path),
            Command::Browse => self.enter_browser(),
        }
    }

    /// Forwards input to the file browser while it is shown.
    ///
    /// A picked file replaces the playlist and leaves the browser; if no
    /// playlist can be built from it the browser stays up. Quitting the
    /// browser finishes the app.
    pub fn browse(&mut self, input: BrowserInput) {
        let Some(browser) = self.browser.as_mut() else {
            return;
        };
        browser.handle(input);
        if let Some(path) = browser.take_picked() {
            self.handle(Command::Open(path));
        } else if *browser.result() == BrowserResult::Quit {
            self.browser = None;
            self.finished = true;
        }
    }

    /// Routes a click at `(x, y)` through the transport bar layout.
    pub fn click(&mut self, layout: &PlayerLayout, x: i32, y: i32) {
        if let Some(control) = layout.hit(x, y) {
            self.handle(control.into());
        }
    }

    /// Advances playback by one host tick.
    ///
    /// Steps the player unless paused, and moves on to the next playlist item
    /// once the current one has ended.
    pub fn tick(&mut self) {
        if self.finished || self.paused || self.browser.is_some() {
            return;
        }
        self.player.step();
        if self.player.is_end_of_stream() || !self.player.is_open() {
            self.advance();
        }
    }

    #[must_use]
    pub fn transport_view(&self) -> TransportView {
        TransportView::from_player(&self.player, self.paused)
    }

    /// True once the last item ended and the playlist does not repeat, or
    /// when nothing in the playlist could be opened.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        PlaybackState::from_flags(
            self.player.is_open(),
            self.paused,
            self.player.is_end_of_stream(),
        )
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn is_browsing(&self) -> bool {
        self.browser.is_some()
    }

    #[must_use]
    pub fn browser(&self) -> Option<&FileBrowser> {
        self.browser.as_ref()
    }

    #[must_use]
    pub fn player(&self) -> &VideoPlayer {
        &self.player
    }

    #[must_use]
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Replaces the playlist with one built from `path` and leaves the
    /// browser. Keeps the old playlist if none can be built.
    fn open_path(&mut self, path: &Path) {
        match Playlist::build(path) {
            Ok(playlist) => {
                self.playlist = playlist;
                self.browser = None;
                self.finished = false;
                if !self.open_current() {
                    self.advance();
                }
            }
            Err(e) => warn!("Cannot play {}: {e}", path.display()),
        }
    }

    fn enter_browser(&mut self) {
        self.player.close();
        self.paused = false;
        let start = self.playlist.current().parent();
        info!("Browsing for media");
        self.browser = Some(FileBrowser::new(start));
    }

    fn open_current(&mut self) -> bool {
        let path = self.playlist.current().to_path_buf();
        match self.player.open(&path) {
            Ok(()) => {
                self.paused = false;
                self.sync_mute_state();
                true
            }
            Err(e) => {
                warn!("Failed to open video {}: {e}", path.display());
                false
            }
        }
    }

    /// Moves past the current item after it ended or failed to open.
    fn advance(&mut self) {
        for _ in 0..self.playlist.len() {
            if self.playlist.is_at_last() && !self.repeat_playlist {
                info!("Playlist finished");
                self.finished = true;
                return;
            }
            self.playlist.next();
            if self.open_current() {
                return;
            }
        }
        warn!("No playable item in playlist");
        self.finished = true;
    }

    fn seek_relative(&mut self, delta_ms: i64) {
        let target = self.player.position_ms().saturating_add(delta_ms);
        if let Err(e) = self.player.seek(target) {
            warn!("Seek to {target} ms failed: {e}");
        }
    }

    fn seek_to_ratio(&mut self, ratio: f64) {
        let duration = self.player.duration_ms();
        if duration <= 0 {
            return;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let target = (duration as f64 * ratio.clamp(0.0, 1.0)) as i64;
        if let Err(e) = self.player.seek(target) {
            warn!("Seek to {target} ms failed: {e}");
        }
    }

    fn change_volume(&mut self, volume: f32) {
        self.player.set_volume(volume);
        self.sync_mute_state();
    }

    fn step_volume(&mut self, delta: f32) {
        let volume = Volume::new(self.player.volume()).offset(delta);
        self.change_volume(volume.value());
    }

    fn sync_mute_state(&mut self) {
        let volume = Volume::new(self.player.volume());
        self.muted = volume.is_muted();
        if !self.muted {
            self.volume_before_mute = volume.value();
        }
    }

    fn toggle_mute(&mut self) {
        if self.muted {
            let restore = if self.volume_before_mute > 0.0 {
                self.volume_before_mute
            } else {
                1.0
            };
            self.player.set_volume(restore);
            self.muted = false;
        } else {
            self.volume_before_mute = self.player.volume();
            self.player.set_volume(0.0);
            self.muted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::NullAudioOpener;
    use crate::domain::video::{FrameInterval, MediaInfo, TextureSize};
    use crate::error::VideoError;
    use crate::test_utils::{assert_abs_diff_eq, ManualClock, ScriptedOpener, ScriptedPipeline, Step};
    use std::path::{Path, PathBuf};

    fn info(duration_ms: i64) -> MediaInfo {
        MediaInfo {
            texture: TextureSize {
                width: 2,
                height: 2,
            },
            duration_ms,
            frame_interval: FrameInterval::default(),
            audio: None,
        }
    }

    /// Files named `broken*` fail to open; everything else plays two frames.
    fn app_with(names: &[&str], repeat: bool) -> (App, ManualClock) {
        let clock = ManualClock::new();
        let opener = ScriptedOpener {
            build: |path: &Path| {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                if name.starts_with("broken") {
                    return Err(VideoError::CorruptedFile.into());
                }
                let (pipeline, _) = ScriptedPipeline::new(
                    info(10_000),
                    vec![Step::Video(Some(0)), Step::Video(Some(40))],
                );
                Ok(pipeline)
            },
        };
        let player = VideoPlayer::new(
            Box::new(opener),
            Box::new(NullAudioOpener),
            Box::new(clock.clone()),
        );
        let playlist =
            Playlist::from_items(names.iter().map(PathBuf::from).collect()).unwrap();
        let config = Config {
            repeat_playlist: Some(repeat),
            ..Config::default()
        };
        (App::new(player, playlist, &config), clock)
    }

    fn run_until_switch(app: &mut App, clock: &ManualClock) {
        let start = app.playlist().current_index();
        for _ in 0..100 {
            clock.advance(40);
            app.tick();
            if app.playlist().current_index() != start || app.is_finished() {
                return;
            }
        }
    }

    fn current(app: &App) -> &Path {
        app.player().current_path().unwrap()
    }

    #[test]
    fn opens_first_item_on_start() {
        let (app, _) = app_with(&["a.mp4", "b.mp4"], true);
        assert_eq!(current(&app), Path::new("a.mp4"));
        assert!(!app.is_paused());
    }

    #[test]
    fn skips_unopenable_first_item() {
        let (app, _) = app_with(&["broken.mp4", "b.mp4"], true);
        assert_eq!(current(&app), Path::new("b.mp4"));
    }

    #[test]
    fn all_items_broken_finishes() {
        let (app, _) = app_with(&["broken1.mp4", "broken2.mp4"], true);
        assert!(app.is_finished());
    }

    #[test]
    fn end_of_stream_advances_to_next_item() {
        let (mut app, clock) = app_with(&["a.mp4", "b.mp4"], true);
        run_until_switch(&mut app, &clock);
        assert_eq!(current(&app), Path::new("b.mp4"));
        assert_eq!(app.player().position_ms(), 0);
    }

    #[test]
    fn repeat_wraps_to_first_item() {
        let (mut app, clock) = app_with(&["a.mp4", "b.mp4"], true);
        run_until_switch(&mut app, &clock);
        run_until_switch(&mut app, &clock);
        assert_eq!(current(&app), Path::new("a.mp4"));
        assert!(!app.is_finished());
    }

    #[test]
    fn without_repeat_last_item_finishes() {
        let (mut app, clock) = app_with(&["a.mp4"], false);
        run_until_switch(&mut app, &clock);
        assert!(app.is_finished());
        assert_eq!(app.playback_state(), PlaybackState::Ended);
    }

    #[test]
    fn paused_app_does_not_step() {
        let (mut app, clock) = app_with(&["a.mp4"], true);
        app.handle(Command::TogglePause);
        clock.advance(40);
        app.tick();
        assert!(app.player().texture().unwrap().generation() == 0);
        assert!(!app.transport_view().show_pause);
        assert_eq!(app.playback_state(), PlaybackState::Paused);
    }

    #[test]
    fn next_resets_pause() {
        let (mut app, _) = app_with(&["a.mp4", "b.mp4"], true);
        app.handle(Command::TogglePause);
        app.handle(Command::Next);
        assert_eq!(current(&app), Path::new("b.mp4"));
        assert!(!app.is_paused());
        app.handle(Command::Previous);
        assert_eq!(current(&app), Path::new("a.mp4"));
    }

    #[test]
    fn relative_seek_uses_step_and_clamps() {
        let (mut app, _) = app_with(&["a.mp4"], true);
        app.handle(Command::SeekForward);
        assert_eq!(app.player().position_ms(), 5_000);
        app.handle(Command::SeekForward);
        app.handle(Command::SeekForward);
        assert_eq!(app.player().position_ms(), 10_000);
        app.handle(Command::SeekBackward);
        assert_eq!(app.player().position_ms(), 5_000);
    }

    #[test]
    fn ratio_seek_targets_fraction_of_duration() {
        let (mut app, _) = app_with(&["a.mp4"], true);
        app.handle(Command::SeekToRatio(0.25));
        assert_eq!(app.player().position_ms(), 2_500);
    }

    #[test]
    fn volume_steps_and_mute_tracking() {
        let (mut app, _) = app_with(&["a.mp4"], true);
        app.handle(Command::VolumeDown);
        assert_abs_diff_eq!(app.player().volume(), 0.9, epsilon = 1e-6);

        app.handle(Command::SetVolume(0.0));
        assert!(app.is_muted());
        // Unmuting restores the last audible volume
        app.handle(Command::ToggleMute);
        assert!(!app.is_muted());
        assert_abs_diff_eq!(app.player().volume(), 0.9, epsilon = 1e-6);
    }

    #[test]
    fn toggle_mute_round_trip() {
        let (mut app, _) = app_with(&["a.mp4"], true);
        app.handle(Command::SetVolume(0.4));
        app.handle(Command::ToggleMute);
        assert!(app.is_muted());
        assert_abs_diff_eq!(app.player().volume(), 0.0);
        assert!(app.transport_view().is_muted);
        app.handle(Command::ToggleMute);
        assert_abs_diff_eq!(app.player().volume(), 0.4, epsilon = 1e-6);
    }

    #[test]
    fn click_on_play_button_toggles_pause() {
        let (mut app, _) = app_with(&["a.mp4"], true);
        let layout = PlayerLayout::compute(1280, 720);
        app.click(&layout, layout.play.x + 1, layout.play.y + 1);
        assert!(app.is_paused());
        app.click(&layout, 600, 10);
        assert!(app.is_paused());
    }

    #[test]
    fn open_with_bad_path_keeps_current_playlist() {
        let (mut app, _) = app_with(&["a.mp4"], true);
        app.handle(Command::Open(PathBuf::from("/definitely/not/here.txt")));
        assert_eq!(current(&app), Path::new("a.mp4"));
    }

    /// An app playing `a.mp4` from a temp dir that also holds `b.mp4`.
    fn app_in_dir() -> (App, ManualClock, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        for name in ["a.mp4", "b.mp4"] {
            std::fs::write(temp_dir.path().join(name), b"").expect("failed to write file");
        }
        let first = temp_dir.path().join("a.mp4");
        let (app, clock) = app_with(&[first.to_str().unwrap()], true);
        (app, clock, temp_dir)
    }

    #[test]
    fn browse_closes_player_and_lists_current_directory() {
        let (mut app, clock, temp_dir) = app_in_dir();
        app.handle(Command::Browse);

        assert!(app.is_browsing());
        assert!(!app.player().is_open());
        let browser = app.browser().unwrap();
        assert_eq!(browser.cwd(), temp_dir.path());
        assert_eq!(browser.entries().len(), 3);

        // Ticks do not advance the playlist while browsing
        clock.advance(40);
        app.tick();
        assert!(!app.player().is_open());
        assert!(!app.is_finished());
    }

    #[test]
    fn picked_file_opens_with_its_siblings() {
        let (mut app, _, temp_dir) = app_in_dir();
        app.handle(Command::Browse);
        app.browse(BrowserInput::Down);
        app.browse(BrowserInput::Down);
        app.browse(BrowserInput::Activate);

        let picked = temp_dir.path().join("b.mp4");
        assert!(!app.is_browsing());
        assert_eq!(current(&app), picked.as_path());
        assert_eq!(app.playlist().len(), 2);
        assert_eq!(app.playlist().current_index(), 1);
    }

    #[test]
    fn quitting_the_browser_finishes() {
        let (mut app, _, _temp_dir) = app_in_dir();
        app.handle(Command::Browse);
        app.browse(BrowserInput::Quit);
        assert!(!app.is_browsing());
        assert!(app.is_finished());
    }

    #[test]
    fn browser_input_is_ignored_while_playing() {
        let (mut app, _, _temp_dir) = app_in_dir();
        app.browse(BrowserInput::Quit);
        assert!(!app.is_finished());
        assert!(app.player().is_open());
    }
}
