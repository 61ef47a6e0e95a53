//! Collector configuration.

use serde::{Deserialize, Serialize};

/// Configuration for sidecar detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Extensions (lowercase, no dot) treated as relocatable sidecars.
    #[serde(default = "default_sidecar_extensions")]
    pub sidecar_extensions: Vec<String>,
}

fn default_sidecar_extensions() -> Vec<String> {
    // Album art, playlists, text notes and rip checksum logs.
    ["jpg", "jpeg", "png", "pls", "rtf", "txt", "accurip", "mpc"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            sidecar_extensions: default_sidecar_extensions(),
        }
    }
}
