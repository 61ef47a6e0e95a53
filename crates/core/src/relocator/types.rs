//! Types for file relocation.

use std::path::PathBuf;

/// One file to relocate: its current path and where it lands relative to
/// the target directory.
#[derive(Debug, Clone)]
pub struct RelocationEntry {
    pub source: PathBuf,
    pub relative: PathBuf,
}

/// A batch of relocations into one target directory.
#[derive(Debug, Clone)]
pub struct RelocationJob {
    pub target_dir: PathBuf,
    /// Entries moved into the target (transcoded outputs).
    pub moves: Vec<RelocationEntry>,
    /// Entries copied into the target, originals retained (sidecars).
    pub copies: Vec<RelocationEntry>,
}

/// A successfully relocated file.
#[derive(Debug, Clone)]
pub struct RelocatedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub size_bytes: u64,
}

/// A per-file relocation failure; the original is retained in place.
#[derive(Debug, Clone)]
pub struct RelocationFailure {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub reason: String,
}

/// Accumulated outcome of one relocation batch.
#[derive(Debug, Clone, Default)]
pub struct RelocationReport {
    pub moved: Vec<RelocatedFile>,
    pub copied: Vec<RelocatedFile>,
    pub failures: Vec<RelocationFailure>,
    pub total_bytes: u64,
    pub duration_ms: u64,
}

impl RelocationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
