//! Trait definition for relocation.

use async_trait::async_trait;

use super::types::{RelocationJob, RelocationReport};

/// Relocates transcoded outputs and sidecars into a target tree.
///
/// Failures are per-file and land in the report; `relocate` itself never
/// fails, so a bad disk sector in one album cannot abort the batch.
#[async_trait]
pub trait Relocator: Send + Sync {
    /// Returns the name of this relocator implementation.
    fn name(&self) -> &str;

    /// Executes the relocation batch.
    async fn relocate(&self, job: RelocationJob) -> RelocationReport;
}
