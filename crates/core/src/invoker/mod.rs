//! Subprocess invocation of external transcode tools.
//!
//! One invocation per file: the tool is executed with an explicit argument
//! vector (never a shell), its exit code and stderr are captured, and the
//! produced file is inspected on disk. A single file's failure is recorded
//! in its [`TranscodeResult`] and never aborts the run.

mod config;
mod process;
mod traits;
mod types;

pub use config::InvokerConfig;
pub use process::ProcessInvoker;
pub use traits::Invoker;
pub use types::{TranscodeOutcome, TranscodeResult};
