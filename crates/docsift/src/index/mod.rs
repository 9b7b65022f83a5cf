//! The in-memory document cache and scan orchestration.
//!
//! [`DocumentIndex`] owns the cache as an immutable snapshot. A scan walks the
//! documents directory, processes every file into a fresh map and swaps that
//! map in as a whole, so entries for deleted or now-failing files disappear.
//! Readers clone the current `Arc` and never wait for extraction; scans are
//! serialised by a separate lock.
//!
//! # Example
//!
//! ```rust,no_run
//! use docsift::{DocumentIndex, IndexConfig};
//!
//! # fn main() -> docsift::Result<()> {
//! let index = DocumentIndex::new(IndexConfig::with_documents_dir("./documents"))?;
//! let scanned = index.scan()?;
//! println!("Indexed {} documents", scanned.len());
//!
//! for hit in index.search("invoice", 10)? {
//!     println!("{}: {}", hit.filename, hit.context);
//! }
//! # Ok(())
//! # }
//! ```

use crate::Result;
use crate::core::config::IndexConfig;
use crate::core::io::{ensure_directory, walk_files};
use crate::core::pipeline::DocumentPipeline;
use crate::search::search_documents;
use crate::stats::compute_stats;
use crate::types::{CorpusStats, DocumentRecord, SearchMatch};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Cache contents keyed by canonical path, in scan order.
pub type DocumentCache = IndexMap<String, DocumentRecord>;

/// Document cache plus the machinery that fills it.
pub struct DocumentIndex {
    config: IndexConfig,
    pipeline: DocumentPipeline,
    snapshot: RwLock<Arc<DocumentCache>>,
    scan_lock: Mutex<()>,
}

impl DocumentIndex {
    /// Create an empty index, creating the documents directory if missing.
    ///
    /// # Errors
    ///
    /// Returns `DocsiftError::Io` when the directory cannot be created.
    pub fn new(config: IndexConfig) -> Result<Self> {
        ensure_directory(&config.documents_dir)?;

        Ok(Self {
            pipeline: DocumentPipeline::new(&config),
            config,
            snapshot: RwLock::new(Arc::new(DocumentCache::new())),
            scan_lock: Mutex::new(()),
        })
    }

    /// Directory that is scanned.
    pub fn root(&self) -> &Path {
        &self.config.documents_dir
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Rebuild the cache from disk and return the records processed.
    ///
    /// Per-file failures are logged and skipped. The previous cache stays
    /// visible to readers until the new one is complete.
    pub fn scan(&self) -> Result<Vec<DocumentRecord>> {
        let _guard = self.scan_lock.lock();
        let started = Instant::now();
        let root = self.root();

        ensure_directory(root)?;
        tracing::info!("Scanning documents in {}", root.display());

        let mut cache = DocumentCache::new();
        let mut skipped = 0_usize;

        for path in walk_files(root) {
            match self.pipeline.process(&path) {
                Some(record) => {
                    tracing::info!("Processed: {} ({})", record.filename, record.language);
                    cache.insert(record.path.clone(), record);
                }
                None => skipped += 1,
            }
        }

        let cache = Arc::new(cache);
        *self.snapshot.write() = Arc::clone(&cache);

        tracing::info!(
            "Scan finished: {} documents indexed, {} files skipped in {:?}",
            cache.len(),
            skipped,
            started.elapsed()
        );

        Ok(cache.values().cloned().collect())
    }

    /// Process one file without touching the cache.
    pub fn process_document(&self, path: &Path) -> Option<DocumentRecord> {
        self.pipeline.process(path)
    }

    /// The current cache snapshot.
    pub fn snapshot(&self) -> Arc<DocumentCache> {
        self.snapshot.read().clone()
    }

    /// All cached records in cache order.
    pub fn documents(&self) -> Vec<DocumentRecord> {
        self.snapshot().values().cloned().collect()
    }

    /// First cached record whose base name equals `filename`.
    ///
    /// Base names are not unique across subdirectories; the first record in
    /// cache order wins.
    pub fn find_by_filename(&self, filename: &str) -> Option<DocumentRecord> {
        self.snapshot()
            .values()
            .find(|record| record.filename == filename)
            .cloned()
    }

    /// Case-insensitive substring search over the current snapshot.
    pub fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchMatch>> {
        let snapshot = self.snapshot();
        search_documents(snapshot.values(), query, max_results, &self.config.search)
    }

    /// Corpus statistics over the current snapshot.
    pub fn stats(&self) -> CorpusStats {
        compute_stats(self.snapshot().values())
    }

    pub fn len(&self) -> usize {
        self.snapshot.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for DocumentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentIndex")
            .field("root", &self.config.documents_dir)
            .field("documents", &self.len())
            .finish()
    }
}
