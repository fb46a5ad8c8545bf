// SPDX-License-Identifier: MPL-2.0
//! Playlist built from a directory scan.
//!
//! Opening a directory lists its video files; opening a single file lists its
//! siblings with that file selected. Entries are sorted by path and
//! navigation wraps around in both directions.

use crate::error::{Error, Result, VideoError};
use std::path::{Path, PathBuf};

/// Extensions recognised as video, compared case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mkv", "avi", "mov"];

/// Returns true if `path` has a recognised video extension.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Ordered list of video files with a current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    items: Vec<PathBuf>,
    current: usize,
}

impl Playlist {
    /// Builds a playlist from a directory or a single video file.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read, holds no video files, or if
    /// `path` is a file without a video extension.
    pub fn build(path: &Path) -> Result<Self> {
        if path.is_dir() {
            let items = scan_directory(path)?;
            return Ok(Self { items, current: 0 });
        }

        if !is_video_file(path) {
            return Err(VideoError::UnsupportedFormat.into());
        }

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut items = scan_directory(parent)?;
        let current = match items.iter().position(|item| item.file_name() == path.file_name()) {
            Some(index) => index,
            None => {
                // The picked file may be hidden or otherwise skipped by the scan
                items.push(parent.join(path.file_name().unwrap_or_default()));
                items.sort();
                items
                    .iter()
                    .position(|item| item.file_name() == path.file_name())
                    .unwrap_or(0)
            }
        };
        Ok(Self { items, current })
    }

    /// Builds a playlist from an explicit list, selecting the first entry.
    ///
    /// # Errors
    ///
    /// Fails when `items` is empty.
    pub fn from_items(items: Vec<PathBuf>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::Io("Playlist is empty".to_string()));
        }
        Ok(Self { items, current: 0 })
    }

    pub fn current(&self) -> &Path {
        &self.items[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a built playlist; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true when the current entry is the last one.
    pub fn is_at_last(&self) -> bool {
        self.current + 1 == self.items.len()
    }

    /// Moves to the next entry, wrapping to the first.
    pub fn next(&mut self) -> &Path {
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    /// Moves to the previous entry, wrapping to the last.
    pub fn previous(&mut self) -> &Path {
        let len = self.items.len();
        self.current = (self.current + len - 1) % len;
        self.current()
    }

    pub fn items(&self) -> &[PathBuf] {
        &self.items
    }
}

fn scan_directory(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut items = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_file() && !is_hidden(&path) && is_video_file(&path) {
            items.push(path);
        }
    }

    if items.is_empty() {
        return Err(Error::Io(format!(
            "No video files found in {}",
            directory.display()
        )));
    }

    items.sort();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"").expect("failed to write file");
        path
    }

    #[test]
    fn extensions_match_case_insensitively() {
        assert!(is_video_file(Path::new("a.mp4")));
        assert!(is_video_file(Path::new("a.MKV")));
        assert!(is_video_file(Path::new("a.Avi")));
        assert!(is_video_file(Path::new("dir/a.mov")));
        assert!(!is_video_file(Path::new("a.webm")));
        assert!(!is_video_file(Path::new("mp4")));
    }

    #[test]
    fn directory_lists_sorted_videos_and_skips_others() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        touch(temp_dir.path(), "b.mkv");
        touch(temp_dir.path(), "a.mp4");
        touch(temp_dir.path(), "notes.txt");
        touch(temp_dir.path(), ".hidden.mp4");
        fs::create_dir(temp_dir.path().join("sub.mp4")).expect("failed to create dir");

        let playlist = Playlist::build(temp_dir.path()).expect("build failed");
        let names: Vec<_> = playlist
            .items()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.mp4", "b.mkv"]);
        assert_eq!(playlist.current_index(), 0);
    }

    #[test]
    fn file_selects_itself_among_siblings() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        touch(temp_dir.path(), "a.mp4");
        let picked = touch(temp_dir.path(), "b.mov");
        touch(temp_dir.path(), "c.avi");

        let playlist = Playlist::build(&picked).expect("build failed");
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.current_index(), 1);
        assert_eq!(playlist.current(), picked.as_path());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let a = touch(temp_dir.path(), "a.mp4");
        let b = touch(temp_dir.path(), "b.mp4");

        let mut playlist = Playlist::build(temp_dir.path()).expect("build failed");
        assert!(!playlist.is_at_last());
        assert_eq!(playlist.next(), b.as_path());
        assert!(playlist.is_at_last());
        assert_eq!(playlist.next(), a.as_path());
        assert_eq!(playlist.previous(), b.as_path());
    }

    #[test]
    fn empty_directory_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        touch(temp_dir.path(), "readme.md");
        assert!(matches!(
            Playlist::build(temp_dir.path()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn non_video_file_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let text = touch(temp_dir.path(), "readme.md");
        assert!(matches!(
            Playlist::build(&text),
            Err(Error::Video(VideoError::UnsupportedFormat))
        ));
    }

    #[test]
    fn from_items_rejects_empty_list() {
        assert!(Playlist::from_items(Vec::new()).is_err());
        let playlist = Playlist::from_items(vec![PathBuf::from("x.mp4")]).unwrap();
        assert_eq!(playlist.current(), Path::new("x.mp4"));
        assert!(!playlist.is_empty());
    }
}
