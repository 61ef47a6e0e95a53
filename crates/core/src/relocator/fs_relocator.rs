//! File system relocator implementation.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, warn};

use super::config::RelocatorConfig;
use super::error::RelocatorError;
use super::traits::Relocator;
use super::types::{
    RelocatedFile, RelocationEntry, RelocationFailure, RelocationJob, RelocationReport,
};

/// File system based relocator.
pub struct FsRelocator {
    config: RelocatorConfig,
}

impl FsRelocator {
    /// Creates a new file system relocator with the given configuration.
    pub fn new(config: RelocatorConfig) -> Self {
        Self { config }
    }

    /// Creates a relocator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RelocatorConfig::default())
    }

    /// Attempts an atomic rename; returns Ok(false) on cross-device moves.
    async fn try_atomic_move(source: &Path, destination: &Path) -> Result<bool, std::io::Error> {
        match fs::rename(source, destination).await {
            Ok(()) => Ok(true),
            Err(e) => {
                // Cross-filesystem moves fail with EXDEV (18 on Linux).
                if e.kind() == std::io::ErrorKind::CrossesDevices || e.raw_os_error() == Some(18) {
                    Ok(false)
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Streams a copy, hashing the written bytes when requested.
    async fn copy_file(
        &self,
        source: &Path,
        destination: &Path,
        hash: bool,
    ) -> Result<(u64, Option<String>), std::io::Error> {
        let source_file = File::open(source).await?;
        let dest_file = File::create(destination).await?;

        let mut reader = BufReader::with_capacity(self.config.buffer_size, source_file);
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, dest_file);

        let mut hasher = hash.then(Sha256::new);
        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; self.config.buffer_size];

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            if let Some(ref mut h) = hasher {
                h.update(&buffer[..bytes_read]);
            }
            writer.write_all(&buffer[..bytes_read]).await?;
            total_bytes += bytes_read as u64;
        }
        writer.flush().await?;

        Ok((total_bytes, hasher.map(|h| format!("{:x}", h.finalize()))))
    }

    /// SHA-256 of a file on disk.
    async fn hash_file(&self, path: &Path) -> Result<String, std::io::Error> {
        let file = File::open(path).await?;
        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; self.config.buffer_size];

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }
        Ok(format!("{:x}", hasher.finalize()))
    }

    fn destination_for(&self, job: &RelocationJob, entry: &RelocationEntry) -> PathBuf {
        job.target_dir.join(&entry.relative)
    }

    async fn check_and_prepare(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<(), RelocatorError> {
        if !source.exists() {
            return Err(RelocatorError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        // Fail loudly on collisions unless overwrite is configured.
        if destination.exists() && !self.config.overwrite {
            return Err(RelocatorError::DestinationExists {
                path: destination.to_path_buf(),
            });
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                RelocatorError::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source: e,
                }
            })?;
        }
        Ok(())
    }

    /// Moves one transcoded output into the target tree.
    async fn move_entry(
        &self,
        job: &RelocationJob,
        entry: &RelocationEntry,
    ) -> Result<RelocatedFile, (PathBuf, RelocatorError)> {
        let destination = self.destination_for(job, entry);
        let fail = |e| (destination.clone(), e);

        self.check_and_prepare(&entry.source, &destination)
            .await
            .map_err(fail)?;

        let renamed = if self.config.prefer_atomic_moves {
            Self::try_atomic_move(&entry.source, &destination)
                .await
                .map_err(|e| {
                    fail(RelocatorError::MoveFailed {
                        source_path: entry.source.clone(),
                        destination: destination.clone(),
                        source: e,
                    })
                })?
        } else {
            false
        };

        let size_bytes = if renamed {
            fs::metadata(&destination)
                .await
                .map(|m| m.len())
                .unwrap_or(0)
        } else {
            // Cross-device: copy, then remove the source.
            let (bytes, _) = self
                .copy_file(&entry.source, &destination, false)
                .await
                .map_err(|e| {
                    fail(RelocatorError::MoveFailed {
                        source_path: entry.source.clone(),
                        destination: destination.clone(),
                        source: e,
                    })
                })?;
            if let Err(e) = fs::remove_file(&entry.source).await {
                warn!(
                    source = %entry.source.display(),
                    "moved file but failed to remove original: {}", e
                );
            }
            bytes
        };

        debug!(
            from = %entry.source.display(),
            to = %destination.display(),
            size_bytes,
            "moved output"
        );

        Ok(RelocatedFile {
            source: entry.source.clone(),
            destination,
            size_bytes,
        })
    }

    /// Copies one sidecar into the target tree, original left in place.
    async fn copy_entry(
        &self,
        job: &RelocationJob,
        entry: &RelocationEntry,
    ) -> Result<RelocatedFile, (PathBuf, RelocatorError)> {
        let destination = self.destination_for(job, entry);
        let fail = |e| (destination.clone(), e);

        self.check_and_prepare(&entry.source, &destination)
            .await
            .map_err(fail)?;

        let (size_bytes, source_hash) = self
            .copy_file(&entry.source, &destination, self.config.verify_copies)
            .await
            .map_err(|e| {
                fail(RelocatorError::CopyFailed {
                    source_path: entry.source.clone(),
                    destination: destination.clone(),
                    source: e,
                })
            })?;

        if let Some(expected) = source_hash {
            let actual = self.hash_file(&destination).await.map_err(|e| {
                fail(RelocatorError::CopyFailed {
                    source_path: entry.source.clone(),
                    destination: destination.clone(),
                    source: e,
                })
            })?;
            if actual != expected {
                return Err(fail(RelocatorError::ChecksumMismatch {
                    path: destination.clone(),
                }));
            }
        }

        debug!(
            from = %entry.source.display(),
            to = %destination.display(),
            size_bytes,
            "copied sidecar"
        );

        Ok(RelocatedFile {
            source: entry.source.clone(),
            destination,
            size_bytes,
        })
    }
}

#[async_trait]
impl Relocator for FsRelocator {
    fn name(&self) -> &str {
        "fs"
    }

    async fn relocate(&self, job: RelocationJob) -> RelocationReport {
        let start = Instant::now();
        let mut report = RelocationReport::default();

        for entry in &job.moves {
            match self.move_entry(&job, entry).await {
                Ok(relocated) => {
                    report.total_bytes += relocated.size_bytes;
                    report.moved.push(relocated);
                }
                Err((destination, e)) => report.failures.push(RelocationFailure {
                    source: entry.source.clone(),
                    destination,
                    reason: e.to_string(),
                }),
            }
        }

        for entry in &job.copies {
            match self.copy_entry(&job, entry).await {
                Ok(relocated) => {
                    report.total_bytes += relocated.size_bytes;
                    report.copied.push(relocated);
                }
                Err((destination, e)) => report.failures.push(RelocationFailure {
                    source: entry.source.clone(),
                    destination,
                    reason: e.to_string(),
                }),
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }
}
