use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::collector::CollectorConfig;
use crate::invoker::InvokerConfig;
use crate::registry::ToolsConfig;
use crate::relocator::RelocatorConfig;

/// Root configuration. Every section has working defaults, so an empty
/// file (or no file at all) yields a usable setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub collector: CollectorConfig,

    #[serde(default)]
    pub invoker: InvokerConfig,

    #[serde(default)]
    pub relocator: RelocatorConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Desktop notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Send a desktop toast when a run finishes.
    #[serde(default = "default_notify_enabled")]
    pub enabled: bool,
}

fn default_notify_enabled() -> bool {
    true
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: default_notify_enabled(),
        }
    }
}

/// Log file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory for timestamped run logs. When unset, logs go to stderr
    /// only.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}
