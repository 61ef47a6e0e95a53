//! Source file collection.
//!
//! Enumerates candidate audio files under the requested source paths
//! (recursive, deterministic ordering) and the sidecar files eligible for
//! relocation alongside them. Filtering is by extension only; file contents
//! are never read, so a mismatched payload is the external tool's problem
//! to reject.

mod config;
mod types;
mod walker;

pub use config::CollectorConfig;
pub use types::{Collection, CollectorError, SidecarFile, SourceFile};
pub use walker::FileCollector;
