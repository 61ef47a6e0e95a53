//! Types for tool invocation results.

use std::path::PathBuf;

use crate::collector::SourceFile;

/// Outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeOutcome {
    /// The tool exited zero and the output exists with nonzero size.
    Success { output: PathBuf },
    /// Nonzero exit, missing/empty output, spawn failure or timeout.
    Failure { reason: String },
}

/// The result of attempting one file. Exactly one is created per collected
/// SourceFile and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TranscodeResult {
    pub source: SourceFile,
    pub outcome: TranscodeOutcome,
    pub duration_ms: u64,
}

impl TranscodeResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, TranscodeOutcome::Success { .. })
    }

    /// Output path for successful results.
    pub fn output(&self) -> Option<&PathBuf> {
        match &self.outcome {
            TranscodeOutcome::Success { output } => Some(output),
            TranscodeOutcome::Failure { .. } => None,
        }
    }

    /// Failure diagnostic, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            TranscodeOutcome::Failure { reason } => Some(reason),
            TranscodeOutcome::Success { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::source_file as source;

    #[test]
    fn test_result_accessors() {
        let ok = TranscodeResult {
            source: source("/music/a.wav"),
            outcome: TranscodeOutcome::Success {
                output: PathBuf::from("/music/a.opus"),
            },
            duration_ms: 12,
        };
        assert!(ok.is_success());
        assert_eq!(ok.output(), Some(&PathBuf::from("/music/a.opus")));
        assert!(ok.failure_reason().is_none());

        let failed = TranscodeResult {
            source: source("/music/b.wav"),
            outcome: TranscodeOutcome::Failure {
                reason: "exit code 1".to_string(),
            },
            duration_ms: 3,
        };
        assert!(!failed.is_success());
        assert_eq!(failed.failure_reason(), Some("exit code 1"));
    }
}
