//! Mock invoker for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::collector::SourceFile;
use crate::invoker::{Invoker, TranscodeOutcome, TranscodeResult};
use crate::registry::ToolSpec;

/// A recorded invocation for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedInvocation {
    /// The executable named by the spec.
    pub executable: PathBuf,
    /// The source file submitted.
    pub source: SourceFile,
    /// The requested output path.
    pub destination: PathBuf,
}

/// Mock implementation of the Invoker trait.
///
/// Provides controllable behavior for testing:
/// - Track invocations for assertions
/// - Script per-path failures
/// - Optionally materialize output files so relocation can run
///
/// Clones share state, so a test can keep a handle after handing the mock
/// to an orchestrator.
#[derive(Debug, Clone)]
pub struct MockInvoker {
    /// Recorded invocations.
    invocations: Arc<RwLock<Vec<RecordedInvocation>>>,
    /// Scripted failure reasons by source path.
    failures: Arc<RwLock<HashMap<PathBuf, String>>>,
    /// Whether successful invocations write the output file to disk.
    create_outputs: Arc<RwLock<bool>>,
    /// Simulated per-file duration in milliseconds.
    duration_ms: Arc<RwLock<u64>>,
}

impl Default for MockInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockInvoker {
    /// Create a new mock invoker.
    pub fn new() -> Self {
        Self {
            invocations: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            create_outputs: Arc::new(RwLock::new(false)),
            duration_ms: Arc::new(RwLock::new(5)),
        }
    }

    /// Get all recorded invocations.
    pub async fn recorded_invocations(&self) -> Vec<RecordedInvocation> {
        self.invocations.read().await.clone()
    }

    /// Get the number of invocations performed.
    pub async fn invocation_count(&self) -> usize {
        self.invocations.read().await.len()
    }

    /// Script a failure for a specific source path.
    pub async fn set_failure(&self, path: impl AsRef<Path>, reason: &str) {
        self.failures
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), reason.to_string());
    }

    /// When enabled, successful invocations write a small output file so
    /// relocation has something to move.
    pub async fn set_create_outputs(&self, create: bool) {
        *self.create_outputs.write().await = create;
    }

    /// Set the simulated per-file duration.
    pub async fn set_duration_ms(&self, ms: u64) {
        *self.duration_ms.write().await = ms;
    }
}

#[async_trait]
impl Invoker for MockInvoker {
    fn name(&self) -> &str {
        "mock"
    }

    async fn run(
        &self,
        spec: &ToolSpec,
        source: &SourceFile,
        destination: &Path,
    ) -> TranscodeResult {
        self.invocations.write().await.push(RecordedInvocation {
            executable: spec.executable.clone(),
            source: source.clone(),
            destination: destination.to_path_buf(),
        });

        let duration_ms = *self.duration_ms.read().await;

        if let Some(reason) = self.failures.read().await.get(&source.path) {
            return TranscodeResult {
                source: source.clone(),
                outcome: TranscodeOutcome::Failure {
                    reason: reason.clone(),
                },
                duration_ms,
            };
        }

        if *self.create_outputs.read().await {
            if let Err(e) = std::fs::write(destination, b"mock output") {
                return TranscodeResult {
                    source: source.clone(),
                    outcome: TranscodeOutcome::Failure {
                        reason: format!("mock output write failed: {}", e),
                    },
                    duration_ms,
                };
            }
        }

        TranscodeResult {
            source: source.clone(),
            outcome: TranscodeOutcome::Success {
                output: destination.to_path_buf(),
            },
            duration_ms,
        }
    }
}
