//! Orchestrator implementation.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::collector::FileCollector;
use crate::invoker::{Invoker, TranscodeOutcome, TranscodeResult};
use crate::registry::ToolRegistry;
use crate::relocator::{RelocationEntry, RelocationJob, Relocator};

use super::types::{Operation, OrchestratorError, RunOptions, RunProgress, RunSummary};

/// Drives a batch run: collect, invoke per file, relocate, summarize.
pub struct Orchestrator<I, R>
where
    I: Invoker + 'static,
    R: Relocator + 'static,
{
    registry: ToolRegistry,
    collector: FileCollector,
    invoker: Arc<I>,
    relocator: Arc<R>,
    shutdown: Arc<AtomicBool>,
}

impl<I, R> Orchestrator<I, R>
where
    I: Invoker + 'static,
    R: Relocator + 'static,
{
    /// Creates a new orchestrator.
    pub fn new(registry: ToolRegistry, collector: FileCollector, invoker: I, relocator: R) -> Self {
        Self {
            registry,
            collector,
            invoker: Arc::new(invoker),
            relocator: Arc::new(relocator),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for requesting a clean shutdown; honored between files.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Executes one run.
    ///
    /// Fatal errors (unresolved tool, unknown format, bad source roots)
    /// abort before any file is touched. Per-file failures are recorded and
    /// never stop the batch; the summary is produced even when every file
    /// failed.
    pub async fn run(
        &self,
        options: &RunOptions,
        progress_tx: Option<mpsc::Sender<RunProgress>>,
    ) -> Result<RunSummary, OrchestratorError> {
        let started_at = Utc::now();
        let start = Instant::now();
        let format = options.operation.format();

        // Fail fast: resolve and validate the tool before collecting
        // anything, so a missing binary cannot strand a half-finished run.
        let resolved = match options.operation.kind() {
            Some(kind) => {
                let spec = self.registry.resolve(kind, format)?;
                self.registry.validate_spec(spec)?;
                let extensions = self.registry.source_extensions(kind, format)?;
                let target_ext = self.registry.target_extension(kind, format);
                Some((spec, extensions, target_ext))
            }
            None => None,
        };

        let move_extensions = [format.extension()];
        let source_extensions: &[&str] = match &resolved {
            Some((_, extensions, _)) => *extensions,
            None => &move_extensions,
        };

        let collection = self
            .collector
            .collect(&options.sources, source_extensions)
            .await?;

        let warnings: Vec<String> = collection
            .root_errors
            .iter()
            .map(|e| {
                warn!("source root skipped: {}", e);
                e.to_string()
            })
            .collect();

        info!(
            operation = %options.operation,
            invoker = self.invoker.name(),
            files = collection.files.len(),
            sidecars = collection.sidecars.len(),
            "starting run"
        );

        let total = collection.files.len();
        let mut results: Vec<TranscodeResult> = Vec::with_capacity(total);
        let mut cancelled = false;

        for (idx, file) in collection.files.iter().enumerate() {
            if self.shutdown.load(Ordering::SeqCst) {
                info!(
                    processed = results.len(),
                    remaining = total - results.len(),
                    "shutdown requested, stopping at file boundary"
                );
                cancelled = true;
                break;
            }

            let result = match &resolved {
                Some((spec, _, target_ext)) => {
                    let destination = file.path.with_extension(target_ext);
                    self.invoker.run(spec, file, &destination).await
                }
                // MoveFormat: no tool; the file itself is the output to
                // relocate.
                None => TranscodeResult {
                    source: file.clone(),
                    outcome: TranscodeOutcome::Success {
                        output: file.path.clone(),
                    },
                    duration_ms: 0,
                },
            };

            match &result.outcome {
                TranscodeOutcome::Success { output } => info!(
                    file = %file.path.display(),
                    output = %output.display(),
                    duration_ms = result.duration_ms,
                    "file processed"
                ),
                TranscodeOutcome::Failure { reason } => warn!(
                    file = %file.path.display(),
                    duration_ms = result.duration_ms,
                    "file failed: {}", reason
                ),
            }

            if let Some(ref tx) = progress_tx {
                let index = idx + 1;
                let progress = RunProgress {
                    index,
                    total,
                    percent: ((index as f64 / total as f64) * 100.0).round() as u8,
                    path: file.path.clone(),
                    success: result.is_success(),
                };
                let _ = tx.send(progress).await;
            }

            results.push(result);
        }

        let relocation = match &options.target {
            Some(target_dir) => {
                let job = Self::build_relocation_job(target_dir, &results, &collection.sidecars);
                info!(
                    target = %target_dir.display(),
                    relocator = self.relocator.name(),
                    moves = job.moves.len(),
                    copies = job.copies.len(),
                    "relocating"
                );
                Some(self.relocator.relocate(job).await)
            }
            None => None,
        };

        let mut summary =
            RunSummary::from_results(&results, start.elapsed().as_millis() as u64, started_at);
        summary.relocation = relocation;
        summary.warnings = warnings;
        summary.cancelled = cancelled;

        info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            elapsed_ms = summary.elapsed_ms,
            "run complete"
        );

        Ok(summary)
    }

    /// Moves for successful outputs, copies for every collected sidecar,
    /// both preserving relative structure from their source root.
    fn build_relocation_job(
        target_dir: &PathBuf,
        results: &[TranscodeResult],
        sidecars: &[crate::collector::SidecarFile],
    ) -> RelocationJob {
        let relative_to = |path: &PathBuf, root: &PathBuf| -> PathBuf {
            path.strip_prefix(root)
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|_| {
                    PathBuf::from(path.file_name().unwrap_or(path.as_os_str()))
                })
        };

        let moves = results
            .iter()
            .filter_map(|r| {
                r.output().map(|output| RelocationEntry {
                    source: output.clone(),
                    relative: relative_to(output, &r.source.root),
                })
            })
            .collect();

        let copies = sidecars
            .iter()
            .map(|s| RelocationEntry {
                source: s.path.clone(),
                relative: relative_to(&s.path, &s.root),
            })
            .collect();

        RelocationJob {
            target_dir: target_dir.clone(),
            moves,
            copies,
        }
    }
}
