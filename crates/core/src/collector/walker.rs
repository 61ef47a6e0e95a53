//! Recursive directory walker with deterministic ordering.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::config::CollectorConfig;
use super::types::{lowercase_extension, Collection, CollectorError, SidecarFile, SourceFile};

/// Collects source files and sidecars under a set of roots.
pub struct FileCollector {
    config: CollectorConfig,
}

impl FileCollector {
    /// Creates a collector with the given configuration.
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// Creates a collector with default sidecar extensions.
    pub fn with_defaults() -> Self {
        Self::new(CollectorConfig::default())
    }

    /// Collects files matching `source_extensions` (plus sidecars) under the
    /// given roots.
    ///
    /// A nonexistent root is fatal. An I/O error while descending one root
    /// aborts that root only and is recorded in `Collection::root_errors`;
    /// other roots are still processed. The output is sorted lexicographic
    /// by full path with duplicates removed, so progress percentages and
    /// logs are reproducible for the same filesystem state.
    pub async fn collect(
        &self,
        sources: &[PathBuf],
        source_extensions: &[&str],
    ) -> Result<Collection, CollectorError> {
        let mut collection = Collection::default();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for source in sources {
            if !source.exists() {
                return Err(CollectorError::SourceNotFound {
                    path: source.clone(),
                });
            }

            if source.is_file() {
                let root = source
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                self.classify(source, &root, source_extensions, &mut collection, &mut seen);
            } else if let Err(e) = self
                .walk_root(source, source_extensions, &mut collection, &mut seen)
                .await
            {
                collection.root_errors.push(e);
            }
        }

        collection.files.sort_by(|a, b| a.path.cmp(&b.path));
        collection.sidecars.sort_by(|a, b| a.path.cmp(&b.path));

        debug!(
            files = collection.files.len(),
            sidecars = collection.sidecars.len(),
            failed_roots = collection.root_errors.len(),
            "collection complete"
        );

        Ok(collection)
    }

    /// Depth-first walk of one root, directory entries alphabetically.
    async fn walk_root(
        &self,
        root: &Path,
        source_extensions: &[&str],
        collection: &mut Collection,
        seen: &mut HashSet<PathBuf>,
    ) -> Result<(), CollectorError> {
        let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let mut entries = Vec::new();
            let mut reader = fs::read_dir(&dir).await.map_err(|e| CollectorError::Io {
                path: dir.clone(),
                source: e,
            })?;
            while let Some(entry) = reader.next_entry().await.map_err(|e| CollectorError::Io {
                path: dir.clone(),
                source: e,
            })? {
                entries.push(entry.path());
            }
            entries.sort();

            // Reverse so the stack pops subdirectories in alphabetical order.
            for path in entries.iter().rev() {
                if path.is_dir() {
                    pending.push(path.clone());
                }
            }
            for path in &entries {
                if path.is_file() {
                    self.classify(path, root, source_extensions, collection, seen);
                }
            }
        }

        Ok(())
    }

    fn classify(
        &self,
        path: &Path,
        root: &Path,
        source_extensions: &[&str],
        collection: &mut Collection,
        seen: &mut HashSet<PathBuf>,
    ) {
        let Some(extension) = lowercase_extension(path) else {
            return;
        };
        if !seen.insert(path.to_path_buf()) {
            return;
        }

        if source_extensions.contains(&extension.as_str()) {
            collection.files.push(SourceFile {
                path: path.to_path_buf(),
                extension,
                root: root.to_path_buf(),
            });
        } else if self.config.sidecar_extensions.contains(&extension) {
            collection.sidecars.push(SidecarFile {
                path: path.to_path_buf(),
                extension,
                root: root.to_path_buf(),
            });
        }
    }
}
