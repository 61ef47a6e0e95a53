//! The static per-platform tool table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::config::ToolsConfig;
use super::types::{ArgToken, AudioFormat, OperationKind, Platform, RegistryError, ToolSpec};

/// Source extensions accepted by the Opus encoder.
const OPUS_ENCODE_SOURCES: &[&str] = &["wav", "aiff", "flac", "oga", "pcm"];
/// Source extensions accepted by the FLAC encoder.
const FLAC_ENCODE_SOURCES: &[&str] = &["wav", "aiff", "rf64", "w64"];

/// Registry of transcode tools for one platform.
///
/// Built once from validated config; read-only afterwards.
pub struct ToolRegistry {
    platform: Platform,
    encode: HashMap<AudioFormat, ToolSpec>,
    decode: HashMap<AudioFormat, ToolSpec>,
}

impl ToolRegistry {
    /// Builds the registry for `platform` from the configured tool paths.
    pub fn new(platform: Platform, tools: &ToolsConfig) -> Self {
        let mut encode = HashMap::new();
        let mut decode = HashMap::new();

        // Argument order matters for these tools: input first, options, then
        // the output path.
        encode.insert(
            AudioFormat::Opus,
            ToolSpec {
                executable: tools.opus_encoder.clone(),
                template: vec![
                    ArgToken::InputPath,
                    ArgToken::lit("--music"),
                    ArgToken::lit("--bitrate"),
                    ArgToken::lit("160"),
                    ArgToken::lit("--vbr"),
                    ArgToken::lit("--framesize"),
                    ArgToken::lit("20"),
                    ArgToken::lit("--comp"),
                    ArgToken::lit("10"),
                    ArgToken::OutputPath,
                ],
            },
        );
        encode.insert(
            AudioFormat::Flac,
            ToolSpec {
                executable: tools.flac.clone(),
                template: vec![
                    ArgToken::InputPath,
                    ArgToken::lit("--keep-foreign-metadata"),
                    ArgToken::lit("--replay-gain"),
                    ArgToken::lit("--mid-side"),
                    ArgToken::lit("--best"),
                    ArgToken::lit("--verify"),
                    ArgToken::lit("--output-name"),
                    ArgToken::OutputPath,
                ],
            },
        );

        // opusdec takes no useful options beyond the paths.
        decode.insert(
            AudioFormat::Opus,
            ToolSpec {
                executable: tools.opus_decoder.clone(),
                template: vec![ArgToken::InputPath, ArgToken::OutputPath],
            },
        );
        // --keep-foreign-metadata refuses files without foreign metadata, so
        // the decode template omits it.
        decode.insert(
            AudioFormat::Flac,
            ToolSpec {
                executable: tools.flac.clone(),
                template: vec![
                    ArgToken::InputPath,
                    ArgToken::lit("--decode"),
                    ArgToken::lit("--output-name"),
                    ArgToken::OutputPath,
                ],
            },
        );

        Self {
            platform,
            encode,
            decode,
        }
    }

    /// The platform this registry was built for.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Whether `format` is registered at all.
    pub fn supports(&self, format: AudioFormat) -> bool {
        self.encode.contains_key(&format)
    }

    /// Looks up the tool spec for an operation/format pair.
    pub fn resolve(
        &self,
        operation: OperationKind,
        format: AudioFormat,
    ) -> Result<&ToolSpec, RegistryError> {
        let table = match operation {
            OperationKind::Encode => &self.encode,
            OperationKind::Decode => &self.decode,
        };
        table.get(&format).ok_or(RegistryError::UnsupportedFormat {
            operation,
            format,
        })
    }

    /// Source extensions eligible for an operation/format pair.
    pub fn source_extensions(
        &self,
        operation: OperationKind,
        format: AudioFormat,
    ) -> Result<&'static [&'static str], RegistryError> {
        // Resolve first so unknown combinations fail the same way everywhere.
        self.resolve(operation, format)?;
        Ok(match (operation, format) {
            (OperationKind::Encode, AudioFormat::Opus) => OPUS_ENCODE_SOURCES,
            (OperationKind::Encode, AudioFormat::Flac) => FLAC_ENCODE_SOURCES,
            (OperationKind::Decode, AudioFormat::Opus) => &["opus"],
            (OperationKind::Decode, AudioFormat::Flac) => &["flac"],
        })
    }

    /// Extension produced by an operation on `format`.
    pub fn target_extension(&self, operation: OperationKind, format: AudioFormat) -> &'static str {
        match operation {
            OperationKind::Encode => format.extension(),
            OperationKind::Decode => "wav",
        }
    }

    /// Checks that a spec's executable exists, resolving bare names via PATH.
    ///
    /// Called once at startup so a whole run cannot partially complete before
    /// discovering a missing tool.
    pub fn validate_spec(&self, spec: &ToolSpec) -> Result<(), RegistryError> {
        resolve_executable(&spec.executable, self.platform).map(|_| ())
    }
}

/// Resolves an executable: explicit paths must exist as files, bare names
/// are searched on PATH (with an `.exe` fallback on Windows).
fn resolve_executable(path: &Path, platform: Platform) -> Result<PathBuf, RegistryError> {
    let unresolved = || RegistryError::ToolPathUnresolved {
        path: path.to_path_buf(),
    };

    if path.components().count() > 1 {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(unresolved())
        };
    }

    let name = path.as_os_str();
    if let Some(paths) = std::env::var_os("PATH") {
        for dir in std::env::split_paths(&paths) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if platform == Platform::Windows {
                let mut with_exe = candidate.into_os_string();
                with_exe.push(".exe");
                let candidate = PathBuf::from(with_exe);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }
    }

    Err(unresolved())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Platform::Linux, &ToolsConfig::default())
    }

    #[test]
    fn test_all_registered_combinations_have_placeholders() {
        let registry = registry();
        for &format in AudioFormat::all() {
            for operation in [OperationKind::Encode, OperationKind::Decode] {
                let spec = registry.resolve(operation, format).unwrap();
                assert!(
                    spec.has_path_placeholders(),
                    "{operation} {format} template is missing a placeholder"
                );
            }
        }
    }

    #[test]
    fn test_rendered_args_contain_both_paths() {
        let registry = registry();
        let input = Path::new("/in/track.wav");
        let output = Path::new("/in/track.opus");

        let spec = registry
            .resolve(OperationKind::Encode, AudioFormat::Opus)
            .unwrap();
        let args = spec.render(input, output);

        assert!(args.contains(&input.as_os_str().to_os_string()));
        assert!(args.contains(&output.as_os_str().to_os_string()));
    }

    #[test]
    fn test_source_extensions() {
        let registry = registry();
        let exts = registry
            .source_extensions(OperationKind::Encode, AudioFormat::Opus)
            .unwrap();
        assert!(exts.contains(&"wav"));
        assert!(exts.contains(&"flac"));

        let exts = registry
            .source_extensions(OperationKind::Decode, AudioFormat::Flac)
            .unwrap();
        assert_eq!(exts, &["flac"]);
    }

    #[test]
    fn test_target_extension() {
        let registry = registry();
        assert_eq!(
            registry.target_extension(OperationKind::Encode, AudioFormat::Opus),
            "opus"
        );
        assert_eq!(
            registry.target_extension(OperationKind::Decode, AudioFormat::Opus),
            "wav"
        );
    }

    #[test]
    fn test_validate_spec_missing_absolute_path() {
        let registry = registry();
        let spec = ToolSpec {
            executable: PathBuf::from("/nonexistent/bin/flac"),
            template: vec![ArgToken::InputPath, ArgToken::OutputPath],
        };
        let err = registry.validate_spec(&spec).unwrap_err();
        assert!(matches!(err, RegistryError::ToolPathUnresolved { .. }));
    }

    #[test]
    fn test_validate_spec_path_lookup() {
        let registry = registry();
        // `ls` exists on any Linux PATH; good enough to exercise the lookup.
        let spec = ToolSpec {
            executable: PathBuf::from("ls"),
            template: vec![ArgToken::InputPath, ArgToken::OutputPath],
        };
        assert!(registry.validate_spec(&spec).is_ok());
    }

    #[test]
    fn test_flac_decode_has_no_foreign_metadata_flag() {
        let registry = registry();
        let spec = registry
            .resolve(OperationKind::Decode, AudioFormat::Flac)
            .unwrap();
        assert!(!spec
            .template
            .contains(&ArgToken::lit("--keep-foreign-metadata")));
    }
}
