//! Mock relocator for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::relocator::{
    RelocatedFile, RelocationFailure, RelocationJob, RelocationReport, Relocator,
};

/// Mock implementation of the Relocator trait.
///
/// Records submitted jobs and reports every entry as relocated, except
/// paths scripted to fail. Clones share state.
#[derive(Debug, Clone)]
pub struct MockRelocator {
    /// Recorded jobs.
    jobs: Arc<RwLock<Vec<RelocationJob>>>,
    /// Scripted failure reasons by source path.
    failures: Arc<RwLock<HashMap<PathBuf, String>>>,
    /// Reported size per relocated file.
    file_size: Arc<RwLock<u64>>,
}

impl Default for MockRelocator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRelocator {
    /// Create a new mock relocator.
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            file_size: Arc::new(RwLock::new(1024)),
        }
    }

    /// Get all recorded jobs.
    pub async fn recorded_jobs(&self) -> Vec<RelocationJob> {
        self.jobs.read().await.clone()
    }

    /// Get the number of jobs submitted.
    pub async fn job_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Script a failure for a specific source path.
    pub async fn set_failure(&self, path: impl AsRef<Path>, reason: &str) {
        self.failures
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), reason.to_string());
    }

    /// Set the size reported for each relocated file.
    pub async fn set_file_size(&self, bytes: u64) {
        *self.file_size.write().await = bytes;
    }
}

#[async_trait]
impl Relocator for MockRelocator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn relocate(&self, job: RelocationJob) -> RelocationReport {
        let failures = self.failures.read().await;
        let size = *self.file_size.read().await;
        let mut report = RelocationReport::default();

        for (entries, moved) in [(&job.moves, true), (&job.copies, false)] {
            for entry in entries {
                let destination = job.target_dir.join(&entry.relative);
                if let Some(reason) = failures.get(&entry.source) {
                    report.failures.push(RelocationFailure {
                        source: entry.source.clone(),
                        destination,
                        reason: reason.clone(),
                    });
                    continue;
                }
                let file = RelocatedFile {
                    source: entry.source.clone(),
                    destination,
                    size_bytes: size,
                };
                report.total_bytes += size;
                if moved {
                    report.moved.push(file);
                } else {
                    report.copied.push(file);
                }
            }
        }

        drop(failures);
        self.jobs.write().await.push(job);
        report
    }
}
