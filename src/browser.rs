// SPDX-License-Identifier: MPL-2.0
//! Headless file browser for picking what to play.
//!
//! The listing starts with a `..` entry, followed by sub-directories and then
//! video files, each group ordered by name. Hidden entries are skipped. The
//! host feeds keyboard, wheel and click input as [`BrowserInput`] and draws
//! [`FileBrowser::entries`] from [`FileBrowser::scroll`] onward.

use crate::error::Result;
use crate::playlist::{is_hidden, is_video_file};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Name of the entry that leads to the parent directory.
pub const PARENT_ENTRY: &str = "..";

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Input the browser reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserInput {
    Up,
    Down,
    /// Enter the selected directory or pick the selected file.
    Activate,
    /// Wheel movement; positive values scroll towards the top.
    Wheel(i32),
    /// Click on a visible row, counted from the first drawn row.
    ClickRow(usize),
    Quit,
}

/// Where the browser stands after handling input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrowserResult {
    #[default]
    Browsing,
    Picked(PathBuf),
    Quit,
}

/// Directory listing with a selection and a scroll offset.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    cwd: PathBuf,
    entries: Vec<BrowserEntry>,
    selected: usize,
    scroll: usize,
    visible_rows: usize,
    result: BrowserResult,
}

impl FileBrowser {
    /// Opens the browser at `start_dir`, or at the working directory when
    /// none is given.
    ///
    /// A directory that cannot be read shows an empty listing.
    pub fn new(start_dir: Option<&Path>) -> Self {
        let cwd = match start_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };
        let mut browser = Self {
            cwd,
            entries: Vec::new(),
            selected: 0,
            scroll: 0,
            visible_rows: 1,
            result: BrowserResult::Browsing,
        };
        browser.rescan();
        browser
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Index of the first drawn row.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn result(&self) -> &BrowserResult {
        &self.result
    }

    /// Sets how many rows the host can draw. At least one.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
    }

    /// Applies one input.
    ///
    /// Once a file is picked or the browser quits, input is ignored until the
    /// pick is taken with [`FileBrowser::take_picked`].
    pub fn handle(&mut self, input: BrowserInput) -> &BrowserResult {
        if self.result != BrowserResult::Browsing {
            return &self.result;
        }
        match input {
            BrowserInput::Up => self.select_previous(),
            BrowserInput::Down => self.select_next(),
            BrowserInput::Activate => self.activate(self.selected),
            BrowserInput::Wheel(delta) => self.scroll_by(delta),
            BrowserInput::ClickRow(row) => {
                let index = self.scroll + row;
                if index < self.entries.len() {
                    self.selected = index;
                    self.activate(index);
                }
            }
            BrowserInput::Quit => self.result = BrowserResult::Quit,
        }
        &self.result
    }

    /// Hands out the picked path once and resumes browsing.
    pub fn take_picked(&mut self) -> Option<PathBuf> {
        match std::mem::take(&mut self.result) {
            BrowserResult::Picked(path) => Some(path),
            other => {
                self.result = other;
                None
            }
        }
    }

    /// Lists `entry` if it is a directory. Files are ignored.
    pub fn navigate_into(&mut self, entry: &BrowserEntry) {
        if !entry.is_dir {
            return;
        }
        self.cwd = entry.path.clone();
        self.rescan();
    }

    fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.entries.len() - 1);
        if self.selected >= self.scroll + self.visible_rows {
            self.scroll = self.selected + 1 - self.visible_rows;
        }
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let max_scroll = self.entries.len().saturating_sub(self.visible_rows);
        let target = if delta >= 0 {
            self.scroll.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.scroll.saturating_add(delta.unsigned_abs() as usize)
        };
        self.scroll = target.min(max_scroll);
    }

    fn activate(&mut self, index: usize) {
        let Some(entry) = self.entries.get(index).cloned() else {
            return;
        };
        if entry.is_dir {
            self.navigate_into(&entry);
        } else {
            debug!("Picked {}", entry.path.display());
            self.result = BrowserResult::Picked(entry.path);
        }
    }

    fn rescan(&mut self) {
        self.selected = 0;
        self.scroll = 0;
        self.entries = match scan(&self.cwd) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to list {}: {e}", self.cwd.display());
                Vec::new()
            }
        };
        debug!("Browsing {} ({} entries)", self.cwd.display(), self.entries.len());
    }
}

fn parent_of(directory: &Path) -> PathBuf {
    match directory.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => directory.to_path_buf(),
    }
}

fn scan(directory: &Path) -> Result<Vec<BrowserEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if is_hidden(&path) {
            continue;
        }
        let is_dir = path.is_dir();
        if !is_dir && !is_video_file(&path) {
            continue;
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        entries.push(BrowserEntry { name, path, is_dir });
    }

    // Directories first
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    entries.insert(
        0,
        BrowserEntry {
            name: PARENT_ENTRY.to_string(),
            path: parent_of(directory),
            is_dir: true,
        },
    );
    Ok(entries)
}
