//! Relocator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the file system relocator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocatorConfig {
    /// Buffer size for streamed copies, in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Replace existing destination files instead of failing the entry.
    #[serde(default)]
    pub overwrite: bool,

    /// Verify sidecar copies with SHA-256 before trusting them.
    #[serde(default)]
    pub verify_copies: bool,

    /// Prefer atomic rename for moves, falling back to copy+remove across
    /// filesystems.
    #[serde(default = "default_true")]
    pub prefer_atomic_moves: bool,
}

fn default_buffer_size() -> usize {
    128 * 1024
}

fn default_true() -> bool {
    true
}

impl Default for RelocatorConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
            overwrite: false,
            verify_copies: false,
            prefer_atomic_moves: true,
        }
    }
}
