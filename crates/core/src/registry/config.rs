//! Configuration for external transcode tool locations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Paths to the external codec executables.
///
/// Defaults are bare names resolved via PATH at startup; absolute paths may
/// be configured to pin a specific installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Opus encoder binary (opus-tools).
    #[serde(default = "default_opus_encoder")]
    pub opus_encoder: PathBuf,

    /// Opus decoder binary (opus-tools).
    #[serde(default = "default_opus_decoder")]
    pub opus_decoder: PathBuf,

    /// FLAC binary, used for both encoding and decoding.
    #[serde(default = "default_flac")]
    pub flac: PathBuf,
}

fn default_opus_encoder() -> PathBuf {
    PathBuf::from("opusenc")
}

fn default_opus_decoder() -> PathBuf {
    PathBuf::from("opusdec")
}

fn default_flac() -> PathBuf {
    PathBuf::from("flac")
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            opus_encoder: default_opus_encoder(),
            opus_decoder: default_opus_decoder(),
            flac: default_flac(),
        }
    }
}
