//! Relocation of transcoded outputs and sidecar files into a target tree.
//!
//! Outputs are MOVED (the source tree keeps only originals), sidecars are
//! COPIED so the source tree's integrity is untouched. Relative structure
//! under each source root is preserved. Every relocation error is per-file
//! and non-fatal: the original stays in place, the failure lands in the
//! report.

mod config;
mod error;
mod fs_relocator;
mod traits;
mod types;

pub use config::RelocatorConfig;
pub use error::RelocatorError;
pub use fs_relocator::FsRelocator;
pub use traits::Relocator;
pub use types::{
    RelocatedFile, RelocationEntry, RelocationFailure, RelocationJob, RelocationReport,
};
