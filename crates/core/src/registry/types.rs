//! Types for the tool registry.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur resolving or validating transcode tools.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The host OS is not supported.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The format is not registered for the requested operation.
    #[error("format '{format}' is not registered for {operation} on this platform")]
    UnsupportedFormat {
        operation: OperationKind,
        format: AudioFormat,
    },

    /// The configured executable does not exist and is not on PATH.
    #[error("transcode tool not found: {path} (check the [tools] config and PATH)")]
    ToolPathUnresolved { path: PathBuf },
}

/// Supported host platforms, detected once at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Linux,
    Windows,
}

impl Platform {
    /// Detects the current platform.
    pub fn current() -> Result<Self, RegistryError> {
        match std::env::consts::OS {
            "linux" => Ok(Self::Linux),
            "windows" => Ok(Self::Windows),
            other => Err(RegistryError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Audio formats the registry knows how to encode and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    Opus,
    Flac,
}

impl AudioFormat {
    /// File extension for this format, lowercase, no dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Opus => "opus",
            Self::Flac => "flac",
        }
    }

    /// All formats the registry supports.
    pub fn all() -> &'static [AudioFormat] {
        &[Self::Opus, Self::Flac]
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "opus" => Ok(Self::Opus),
            "flac" => Ok(Self::Flac),
            other => Err(format!("unknown audio format '{}'", other)),
        }
    }
}

/// The direction of a transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Encode,
    Decode,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "encode"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

/// One token in a tool's argument template.
///
/// Paths are substituted verbatim into the argument vector; nothing is ever
/// passed through a shell, so spaces and quoting in paths are a non-issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgToken {
    Literal(String),
    InputPath,
    OutputPath,
}

impl ArgToken {
    pub(crate) fn lit(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

/// A resolved (executable, argument template) pair for one
/// platform/operation/format combination.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Absolute path or PATH-resolved executable name.
    pub executable: PathBuf,
    /// Ordered argument tokens with input/output placeholders.
    pub template: Vec<ArgToken>,
}

impl ToolSpec {
    /// Renders the concrete argument vector for one invocation.
    pub fn render(&self, input: &Path, output: &Path) -> Vec<OsString> {
        self.template
            .iter()
            .map(|token| match token {
                ArgToken::Literal(s) => OsString::from(s),
                ArgToken::InputPath => input.as_os_str().to_os_string(),
                ArgToken::OutputPath => output.as_os_str().to_os_string(),
            })
            .collect()
    }

    /// Whether the template contains both path placeholders.
    pub fn has_path_placeholders(&self) -> bool {
        self.template.contains(&ArgToken::InputPath)
            && self.template.contains(&ArgToken::OutputPath)
    }
}
