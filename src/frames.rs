use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Returns true for files with a supported image extension, matched
/// case-insensitively.
pub fn is_frame_file(path: &Path) -> bool {
    if let Some(extension) = path.extension() {
        if let Some(ext_str) = extension.to_str() {
            matches!(
                ext_str.to_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "gif" | "bmp"
            )
        } else {
            false
        }
    } else {
        false
    }
}

/// The ordered list of source images that make up the animation.
///
/// Indices are contiguous from 0; reorder and delete keep the relative order
/// of every untouched element. All operations are in-memory and never fail on
/// a valid list; only [`FrameList::scan`] can error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameList {
    paths: Vec<PathBuf>,
}

impl FrameList {
    /// Scan `dir` for supported images, sorted lexicographically by filename.
    ///
    /// An empty directory is not an error; callers surface it as an
    /// informational message.
    pub fn scan(dir: &Path) -> Result<Self, Error> {
        if !dir.is_dir() {
            return Err(Error::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_frame_file(path))
            .collect();

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        if paths.is_empty() {
            log::info!("no supported images found in {}", dir.display());
        }

        Ok(FrameList { paths })
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        FrameList { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Swap the element at `index` with its predecessor. No-op at the top of
    /// the list or out of bounds; returns whether a move happened so the
    /// interface layer can follow the selection.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.paths.len() {
            return false;
        }
        self.paths.swap(index, index - 1);
        true
    }

    /// Swap the element at `index` with its successor. No-op at the bottom of
    /// the list or out of bounds.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.paths.len() {
            return false;
        }
        self.paths.swap(index, index + 1);
        true
    }

    /// Remove and return the element at `index`, or `None` if out of bounds.
    /// Asking the user for confirmation is the interface layer's job.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        if index >= self.paths.len() {
            return None;
        }
        Some(self.paths.remove(index))
    }
}
