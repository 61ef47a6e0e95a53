//! Run orchestration.
//!
//! Drives a batch run end to end: fail-fast tool validation, file
//! collection, sequential per-file invocation with failure isolation,
//! optional relocation into a target tree, and summary construction. One
//! external process runs at a time; the codec tools are the bottleneck and
//! already use multiple cores internally.

mod runner;
mod types;

pub use runner::Orchestrator;
pub use types::{FileFailure, Operation, OrchestratorError, RunOptions, RunProgress, RunSummary};
