//! Best-effort desktop notification at the end of a run.

use async_trait::async_trait;
use tracing::{debug, warn};

/// Delivers a short end-of-run notification. Failures are logged and
/// swallowed; a missing notification daemon must never fail a run.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, body: &str);
}

/// Sends notifications via `notify-send`.
pub struct CommandNotifier;

#[async_trait]
impl Notifier for CommandNotifier {
    async fn notify(&self, title: &str, body: &str) {
        if !cfg!(target_os = "linux") {
            debug!("desktop notifications unsupported on this platform");
            return;
        }

        let result = tokio::process::Command::new("notify-send")
            .arg(title)
            .arg(body)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("notify-send exited with {}", status),
            Err(e) => warn!("notify-send could not be spawned: {}", e),
        }
    }
}

/// Discards notifications. Used when notifications are disabled.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _title: &str, _body: &str) {}
}
