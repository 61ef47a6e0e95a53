//! Types for file collection.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while collecting source files.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// A source root given on the command line does not exist.
    #[error("no such source path: {path}")]
    SourceNotFound { path: PathBuf },

    /// I/O failure while descending a source root.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A candidate audio file discovered during collection. Read-only after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// Lowercased extension, no dot.
    pub extension: String,
    /// The source root this file was found under, for relative relocation.
    pub root: PathBuf,
}

/// A non-audio file relocated alongside transcoded output (art, playlists,
/// text, checksum logs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarFile {
    pub path: PathBuf,
    pub extension: String,
    pub root: PathBuf,
}

/// The outcome of a collection pass over all source roots.
#[derive(Debug, Default)]
pub struct Collection {
    /// Audio files matching the operation's source format set, lexicographic
    /// by full path, no duplicates.
    pub files: Vec<SourceFile>,
    /// Sidecar files, same ordering guarantees.
    pub sidecars: Vec<SidecarFile>,
    /// Roots that failed mid-descent; the rest of the run proceeds.
    pub root_errors: Vec<CollectorError>,
}

/// Lowercased extension of a path, if any.
pub(crate) fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
