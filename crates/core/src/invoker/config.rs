//! Invoker configuration.

use serde::{Deserialize, Serialize};

/// Configuration for external process execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokerConfig {
    /// Per-file timeout in seconds; 0 disables the timeout and a stalled
    /// tool blocks that file indefinitely.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of characters of captured stderr kept in a failure
    /// diagnostic.
    #[serde(default = "default_stderr_limit")]
    pub stderr_limit: usize,
}

fn default_timeout() -> u64 {
    1800 // 30 minutes per file
}

fn default_stderr_limit() -> usize {
    2048
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            stderr_limit: default_stderr_limit(),
        }
    }
}
