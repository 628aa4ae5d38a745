//! Durable snapshot of the full upstream message corpus.
//!
//! The snapshot is either absent or complete. A cold load paginates the
//! upstream source from offset 0 until it sees an empty page and only then
//! writes the file, so a failed pagination never leaves partial state behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::error::RetrievalError;
use super::fetcher::MessageSource;
use super::types::Message;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Snapshot state as seen on disk, without contacting upstream.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotStatus {
    pub path: PathBuf,
    pub cached: bool,
    pub messages: usize,
    /// Consecutive rebuilds whose snapshot could not be written.
    pub persist_failures: usize,
}

pub struct CorpusCache {
    source: Arc<dyn MessageSource>,
    cache_path: PathBuf,
    page_size: usize,
    persist_failures: AtomicUsize,
}

impl CorpusCache {
    pub fn new(
        source: Arc<dyn MessageSource>,
        cache_path: impl Into<PathBuf>,
        page_size: usize,
    ) -> Self {
        Self {
            source,
            cache_path: cache_path.into(),
            page_size: page_size.max(1),
            persist_failures: AtomicUsize::new(0),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Return the cached corpus, paginating upstream on a cold load.
    ///
    /// A readable snapshot is served as-is with no staleness check. Use
    /// [`CorpusCache::refresh`] to rebuild it.
    pub async fn load_corpus(&self) -> Result<Vec<Message>, RetrievalError> {
        if let Some(corpus) = self.read_snapshot() {
            tracing::debug!(
                path = %self.cache_path.display(),
                messages = corpus.len(),
                "Serving corpus from snapshot"
            );
            return Ok(corpus);
        }

        tracing::info!(path = %self.cache_path.display(), "No usable snapshot; starting cold load");
        self.rebuild().await
    }

    /// Re-paginate upstream and overwrite the snapshot regardless of its state.
    ///
    /// On failure the existing snapshot is left untouched.
    pub async fn refresh(&self) -> Result<Vec<Message>, RetrievalError> {
        tracing::info!(path = %self.cache_path.display(), "Refreshing corpus snapshot");
        self.rebuild().await
    }

    pub fn snapshot_status(&self) -> SnapshotStatus {
        let snapshot = self.read_snapshot();
        SnapshotStatus {
            path: self.cache_path.clone(),
            cached: snapshot.is_some(),
            messages: snapshot.map(|corpus| corpus.len()).unwrap_or(0),
            persist_failures: self.persist_failures.load(Ordering::Relaxed),
        }
    }

    async fn rebuild(&self) -> Result<Vec<Message>, RetrievalError> {
        let corpus = self.paginate().await?;
        match self.persist(&corpus) {
            Ok(()) => self.persist_failures.store(0, Ordering::Relaxed),
            Err(err) => {
                let failures = self.persist_failures.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::error!(
                    path = %self.cache_path.display(),
                    consecutive_failures = failures,
                    "Failed to persist corpus snapshot; every request will cold-load until it can be written: {}",
                    err
                );
            }
        }
        Ok(corpus)
    }

    async fn paginate(&self) -> Result<Vec<Message>, RetrievalError> {
        let mut corpus = Vec::new();
        let mut offset = 0;
        let mut pages = 0usize;

        loop {
            let batch = self.source.fetch_page(offset, self.page_size).await?;
            pages += 1;
            if batch.is_empty() {
                break;
            }
            corpus.extend(batch);
            offset += self.page_size;
        }

        tracing::info!(
            messages = corpus.len(),
            pages,
            page_size = self.page_size,
            "Fetched full corpus from upstream"
        );
        Ok(corpus)
    }

    /// Missing, unreadable and corrupt snapshots all read as `None`.
    fn read_snapshot(&self) -> Option<Vec<Message>> {
        let contents = match fs::read(&self.cache_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(
                    path = %self.cache_path.display(),
                    "Failed to read corpus snapshot, rebuilding: {}",
                    err
                );
                return None;
            }
        };

        match serde_json::from_slice::<Vec<Message>>(&contents) {
            Ok(corpus) => Some(corpus),
            Err(err) => {
                tracing::warn!(
                    path = %self.cache_path.display(),
                    "Corpus snapshot is corrupt, rebuilding: {}",
                    err
                );
                None
            }
        }
    }

    fn persist(&self, corpus: &[Message]) -> io::Result<()> {
        let payload = serde_json::to_vec(corpus)?;

        let file_name = self
            .cache_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("messages_cache.json");
        let partial_path = self
            .cache_path
            .with_file_name(format!(".{}.{}.part", file_name, Uuid::new_v4()));

        if let Some(parent) = self.cache_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let written = fs::write(&partial_path, payload)
            .and_then(|()| fs::rename(&partial_path, &self.cache_path));
        if let Err(err) = written {
            let _ = fs::remove_file(&partial_path);
            return Err(err);
        }

        tracing::debug!(
            path = %self.cache_path.display(),
            messages = corpus.len(),
            "Persisted corpus snapshot"
        );
        Ok(())
    }
}
