//! Command line interface.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use tracklift_core::registry::AudioFormat;
use tracklift_core::{Operation, RunOptions};

/// Batch audio transcoding and relocation via external codec tools.
#[derive(Parser, Debug)]
#[command(name = "tracklift", version)]
#[command(group = ArgGroup::new("operation").required(true))]
pub struct Args {
    /// Source file or directory; may be given multiple times.
    #[arg(short = 's', long = "source", value_name = "PATH", required = true)]
    pub sources: Vec<PathBuf>,

    /// Target directory for transcoded outputs and sidecar copies. When
    /// omitted, outputs stay next to their sources.
    #[arg(short = 't', long = "target", value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Encode eligible sources into this format.
    #[arg(short = 'e', long = "encode-to", value_name = "FORMAT", group = "operation")]
    pub encode_to: Option<AudioFormat>,

    /// Decode files of this format back to wav.
    #[arg(short = 'd', long = "decode-from", value_name = "FORMAT", group = "operation")]
    pub decode_from: Option<AudioFormat>,

    /// Relocate existing files of this format without transcoding.
    /// Requires --target.
    #[arg(
        short = 'm',
        long = "move-format",
        value_name = "FORMAT",
        group = "operation",
        requires = "target"
    )]
    pub move_format: Option<AudioFormat>,

    /// Print per-file completion percentage while transcoding.
    #[arg(
        short = 'p',
        long = "percentage-completion",
        conflicts_with = "move_format"
    )]
    pub percentage: bool,

    /// Configuration file (defaults to tracklift.toml when present).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn operation(&self) -> Operation {
        // The clap group guarantees exactly one is set.
        if let Some(format) = self.encode_to {
            Operation::EncodeTo(format)
        } else if let Some(format) = self.decode_from {
            Operation::DecodeFrom(format)
        } else {
            Operation::MoveFormat(self.move_format.unwrap())
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            sources: self.sources.clone(),
            target: self.target.clone(),
            operation: self.operation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_operation_parsed() {
        let args = Args::try_parse_from(["tracklift", "-s", "/music", "-e", "opus"]).unwrap();
        assert_eq!(args.operation(), Operation::EncodeTo(AudioFormat::Opus));
        assert_eq!(args.sources, vec![PathBuf::from("/music")]);
        assert!(args.target.is_none());
    }

    #[test]
    fn test_multiple_sources_accumulate() {
        let args = Args::try_parse_from([
            "tracklift", "-s", "/a", "-s", "/b", "-d", "flac", "-t", "/out",
        ])
        .unwrap();
        assert_eq!(args.sources.len(), 2);
        assert_eq!(args.operation(), Operation::DecodeFrom(AudioFormat::Flac));
        assert_eq!(args.target, Some(PathBuf::from("/out")));
    }

    #[test]
    fn test_operation_is_required() {
        assert!(Args::try_parse_from(["tracklift", "-s", "/music"]).is_err());
    }

    #[test]
    fn test_operations_are_mutually_exclusive() {
        let result =
            Args::try_parse_from(["tracklift", "-s", "/music", "-e", "opus", "-d", "flac"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_percentage_rejected_with_move() {
        let result =
            Args::try_parse_from(["tracklift", "-s", "/music", "-m", "opus", "-p", "-t", "/out"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_move_requires_target() {
        assert!(Args::try_parse_from(["tracklift", "-s", "/music", "-m", "opus"]).is_err());
        let ok =
            Args::try_parse_from(["tracklift", "-s", "/music", "-m", "opus", "-t", "/out"]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["tracklift", "-s", "/music", "-e", "mp3"]).is_err());
    }
}
