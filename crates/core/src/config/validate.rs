use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Tool paths are not empty
/// - Sidecar extensions are non-empty and bare (no leading dot)
/// - Relocator buffer size and invoker stderr limit are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    for (name, path) in [
        ("tools.opus_encoder", &config.tools.opus_encoder),
        ("tools.opus_decoder", &config.tools.opus_decoder),
        ("tools.flac", &config.tools.flac),
    ] {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                name
            )));
        }
    }

    for ext in &config.collector.sidecar_extensions {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::ValidationError(format!(
                "collector.sidecar_extensions entries must be bare extensions, got '{}'",
                ext
            )));
        }
    }

    if config.relocator.buffer_size == 0 {
        return Err(ConfigError::ValidationError(
            "relocator.buffer_size cannot be 0".to_string(),
        ));
    }

    if config.invoker.stderr_limit == 0 {
        return Err(ConfigError::ValidationError(
            "invoker.stderr_limit cannot be 0".to_string(),
        ));
    }

    Ok(())
}
