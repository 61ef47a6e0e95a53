//! Process-based invoker implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use crate::collector::SourceFile;
use crate::registry::ToolSpec;

use super::config::InvokerConfig;
use super::traits::Invoker;
use super::types::{TranscodeOutcome, TranscodeResult};

/// Invoker that spawns the external tool as a child process, synchronously
/// driving one file at a time.
pub struct ProcessInvoker {
    config: InvokerConfig,
}

impl ProcessInvoker {
    /// Creates a new process invoker with the given configuration.
    pub fn new(config: InvokerConfig) -> Self {
        Self { config }
    }

    /// Creates an invoker with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(InvokerConfig::default())
    }

    fn truncate(&self, text: &str) -> String {
        if text.chars().count() <= self.config.stderr_limit {
            return text.trim_end().to_string();
        }
        let mut truncated: String = text.chars().take(self.config.stderr_limit).collect();
        truncated.push_str(" [truncated]");
        truncated
    }

    async fn execute(
        &self,
        spec: &ToolSpec,
        source: &SourceFile,
        destination: &Path,
    ) -> Result<TranscodeOutcome, String> {
        // Remove a stale output so re-runs overwrite instead of tripping the
        // tool's own refusal to clobber existing files.
        match tokio::fs::remove_file(destination).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(format!(
                    "cannot replace existing output {}: {}",
                    destination.display(),
                    e
                ))
            }
        }

        let args = spec.render(&source.path, destination);
        debug!(
            tool = %spec.executable.display(),
            input = %source.path.display(),
            output = %destination.display(),
            "invoking transcode tool"
        );

        let mut child = Command::new(&spec.executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to start {}: {}", spec.executable.display(), e))?;

        // Drain stderr concurrently so a chatty tool cannot fill the pipe
        // and deadlock against our wait().
        let stderr_pipe = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut buf).await;
            }
            buf
        });

        let status = if self.config.timeout_secs == 0 {
            child.wait().await
        } else {
            match timeout(
                Duration::from_secs(self.config.timeout_secs),
                child.wait(),
            )
            .await
            {
                Ok(status) => status,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(format!(
                        "tool timed out after {} seconds and was killed",
                        self.config.timeout_secs
                    ));
                }
            }
        }
        .map_err(|e| format!("failed waiting for tool: {}", e))?;

        let stderr = stderr_task.await.unwrap_or_default();

        if !status.success() {
            return Err(format!(
                "tool exited with {:?}: {}",
                status.code(),
                self.truncate(&stderr)
            ));
        }

        // A zero exit is not enough: some tools report success while writing
        // nothing, so the output must exist with nonzero size.
        match tokio::fs::metadata(destination).await {
            Ok(meta) if meta.len() > 0 => Ok(TranscodeOutcome::Success {
                output: destination.to_path_buf(),
            }),
            Ok(_) => Err(format!(
                "tool exited zero but output {} is empty: {}",
                destination.display(),
                self.truncate(&stderr)
            )),
            Err(_) => Err(format!(
                "tool exited zero but output {} is missing: {}",
                destination.display(),
                self.truncate(&stderr)
            )),
        }
    }
}

#[async_trait]
impl Invoker for ProcessInvoker {
    fn name(&self) -> &str {
        "process"
    }

    async fn run(
        &self,
        spec: &ToolSpec,
        source: &SourceFile,
        destination: &Path,
    ) -> TranscodeResult {
        let start = Instant::now();
        let outcome = match self.execute(spec, source, destination).await {
            Ok(outcome) => outcome,
            Err(reason) => TranscodeOutcome::Failure { reason },
        };

        TranscodeResult {
            source: source.clone(),
            outcome,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}
