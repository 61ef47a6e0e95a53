//! Error types for relocation.

use std::path::PathBuf;
use thiserror::Error;

/// Per-file relocation errors. These are recorded in the report and never
/// abort the run.
#[derive(Debug, Error)]
pub enum RelocatorError {
    /// Source file disappeared between collection and relocation.
    #[error("source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Destination already exists and overwrite is disabled.
    #[error("destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    /// Parent directory creation failed.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Move (rename or copy+remove) failed.
    #[error("failed to move {source_path} to {destination}: {source}")]
    MoveFailed {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copy failed.
    #[error("failed to copy {source_path} to {destination}: {source}")]
    CopyFailed {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copied data does not match the source checksum.
    #[error("checksum mismatch after copying to {path}")]
    ChecksumMismatch { path: PathBuf },
}
