//! Types for run orchestration.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::collector::CollectorError;
use crate::invoker::TranscodeResult;
use crate::registry::{AudioFormat, OperationKind, RegistryError};
use crate::relocator::RelocationReport;

/// Fatal errors that abort a run before (or instead of) producing a summary.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Tool registry resolution or validation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A source root could not be collected.
    #[error(transparent)]
    Collection(#[from] CollectorError),
}

/// The single operation active for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Transcode eligible sources into `format`.
    EncodeTo(AudioFormat),
    /// Decode `format` sources back to wav.
    DecodeFrom(AudioFormat),
    /// Relocate existing `format` files without transcoding.
    MoveFormat(AudioFormat),
}

impl Operation {
    /// The format this operation is keyed on.
    pub fn format(&self) -> AudioFormat {
        match self {
            Self::EncodeTo(f) | Self::DecodeFrom(f) | Self::MoveFormat(f) => *f,
        }
    }

    /// The transcode direction, if any; `MoveFormat` invokes no tool.
    pub fn kind(&self) -> Option<OperationKind> {
        match self {
            Self::EncodeTo(_) => Some(OperationKind::Encode),
            Self::DecodeFrom(_) => Some(OperationKind::Decode),
            Self::MoveFormat(_) => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncodeTo(format) => write!(f, "encode to {}", format),
            Self::DecodeFrom(format) => write!(f, "decode from {}", format),
            Self::MoveFormat(format) => write!(f, "move {}", format),
        }
    }
}

/// Validated options for one run, produced by the CLI layer.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Source files or directories, at least one.
    pub sources: Vec<PathBuf>,
    /// Target directory for relocation; outputs stay alongside sources
    /// when unset.
    pub target: Option<PathBuf>,
    /// The active operation.
    pub operation: Operation,
}

/// Incremental progress, one per processed file.
#[derive(Debug, Clone)]
pub struct RunProgress {
    /// 1-based index of the file just finished.
    pub index: usize,
    pub total: usize,
    /// `(index / total) * 100`, rounded.
    pub percent: u8,
    pub path: PathBuf,
    pub success: bool,
}

/// One failed file with its captured diagnostic, in collection order.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// End-of-run summary. Counters are derived from the result list, never
/// independently mutated.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
    pub started_at: DateTime<Utc>,
    /// Failures in collection order.
    pub failures: Vec<FileFailure>,
    /// Relocation outcome when a target directory was set.
    pub relocation: Option<RelocationReport>,
    /// Non-fatal warnings (roots that failed mid-descent).
    pub warnings: Vec<String>,
    /// True when a shutdown signal stopped the run at a file boundary.
    pub cancelled: bool,
}

impl RunSummary {
    /// Derives the summary from the accumulated per-file results.
    pub fn from_results(
        results: &[TranscodeResult],
        elapsed_ms: u64,
        started_at: DateTime<Utc>,
    ) -> Self {
        let failures: Vec<FileFailure> = results
            .iter()
            .filter_map(|r| {
                r.failure_reason().map(|reason| FileFailure {
                    path: r.source.path.clone(),
                    reason: reason.to_string(),
                })
            })
            .collect();

        Self {
            attempted: results.len(),
            succeeded: results.len() - failures.len(),
            failed: failures.len(),
            elapsed_ms,
            started_at,
            failures,
            relocation: None,
            warnings: Vec::new(),
            cancelled: false,
        }
    }

    /// Whether anything at all went wrong.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
            && self.warnings.is_empty()
            && self.relocation.as_ref().map_or(true, |r| r.is_clean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::TranscodeOutcome;
    use crate::testing::fixtures::source_file;

    fn result(path: &str, outcome: TranscodeOutcome) -> TranscodeResult {
        TranscodeResult {
            source: source_file(path),
            outcome,
            duration_ms: 5,
        }
    }

    #[test]
    fn test_summary_derived_from_results() {
        let results = vec![
            result(
                "/music/a.wav",
                TranscodeOutcome::Success {
                    output: PathBuf::from("/music/a.opus"),
                },
            ),
            result(
                "/music/b.wav",
                TranscodeOutcome::Failure {
                    reason: "exit 1".to_string(),
                },
            ),
            result(
                "/music/c.wav",
                TranscodeOutcome::Success {
                    output: PathBuf::from("/music/c.opus"),
                },
            ),
        ];

        let summary = RunSummary::from_results(&results, 100, Utc::now());
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].path, PathBuf::from("/music/b.wav"));
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_operation_accessors() {
        let op = Operation::EncodeTo(AudioFormat::Opus);
        assert_eq!(op.format(), AudioFormat::Opus);
        assert_eq!(op.kind(), Some(OperationKind::Encode));
        assert_eq!(op.to_string(), "encode to opus");

        assert_eq!(Operation::MoveFormat(AudioFormat::Flac).kind(), None);
    }
}
