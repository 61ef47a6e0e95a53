//! Trait definition for tool invocation.

use async_trait::async_trait;
use std::path::Path;

use crate::collector::SourceFile;
use crate::registry::ToolSpec;

use super::types::TranscodeResult;

/// Runs one external tool against one file.
///
/// Implementations must be failure-isolating: whatever goes wrong with a
/// single file is captured in the returned [`TranscodeResult`], never raised
/// as an error that could abort the batch.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Returns the name of this invoker implementation.
    fn name(&self) -> &str;

    /// Executes `spec` on `source`, producing `destination`.
    async fn run(
        &self,
        spec: &ToolSpec,
        source: &SourceFile,
        destination: &Path,
    ) -> TranscodeResult;
}
