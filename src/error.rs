use std::path::PathBuf;

use thiserror::Error;

/// Errors reported to the user at the action that triggered them.
///
/// Settings persistence failures are not part of this taxonomy: they are
/// logged and never block the main flow. A cancelled save dialog is a guard
/// in the interface layer, not an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("the frame list is empty; add images before previewing or exporting")]
    EmptyFrameList,

    #[error("failed to encode animation: {0}")]
    Encode(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
