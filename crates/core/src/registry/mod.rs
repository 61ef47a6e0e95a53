//! Tool registry: maps (platform, operation, format) to an external
//! transcode tool and its argument template.
//!
//! The registry is built once at startup from validated configuration and
//! never mutated afterwards. Lookups are pure; the only I/O is the startup
//! executable check (`validate_spec`), so a missing tool fails the run
//! before any file is touched.

mod config;
mod table;
mod types;

pub use config::ToolsConfig;
pub use table::ToolRegistry;
pub use types::{ArgToken, AudioFormat, OperationKind, Platform, RegistryError, ToolSpec};
