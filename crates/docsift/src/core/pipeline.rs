//! Per-document processing: extract, classify, stat.
//!
//! [`DocumentPipeline`] turns one file path into a [`DocumentRecord`]. Every
//! failure is contained to that file: unsupported extensions, extractor errors,
//! extractor panics, timeouts and empty text all produce `None` and a log line.

use crate::core::config::IndexConfig;
use crate::core::formats::DocumentFormat;
use crate::core::io::{canonical_path, file_stats};
use crate::extraction::ExtractorSet;
use crate::language_detection::detect_language_with_threshold;
use crate::types::DocumentRecord;
use crate::{DocsiftError, Result};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Duration;

/// Extraction and classification for single files.
#[derive(Clone)]
pub struct DocumentPipeline {
    extractors: Arc<ExtractorSet>,
    min_language_chars: usize,
    timeout: Option<Duration>,
}

impl DocumentPipeline {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            extractors: Arc::new(ExtractorSet::from_config(config)),
            min_language_chars: config.min_language_chars,
            timeout: config.extraction_timeout(),
        }
    }

    /// Process one file into a record.
    ///
    /// Returns `None` for missing files, unsupported extensions, failed
    /// extraction and empty text.
    pub fn process(&self, path: &Path) -> Option<DocumentRecord> {
        if !path.is_file() {
            tracing::debug!("Skipping missing file: {}", path.display());
            return None;
        }

        let Some(format) = DocumentFormat::from_path(path) else {
            tracing::warn!(
                "Unsupported file type: {}",
                crate::core::formats::extension_of(path)
            );
            return None;
        };

        let text = match self.extract(format, path) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Error extracting text from {}: {}", path.display(), e);
                return None;
            }
        };

        if text.is_empty() {
            tracing::warn!("No text extracted from {}", path.display());
            return None;
        }

        let language = detect_language_with_threshold(&text, self.min_language_chars);

        let stats = match file_stats(path) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!("Failed to read metadata of {}: {}", path.display(), e);
                return None;
            }
        };

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(
            "Processed {} ({}, {} bytes, language {})",
            filename,
            format,
            stats.size,
            language
        );

        Some(DocumentRecord {
            path: canonical_path(path).to_string_lossy().into_owned(),
            filename,
            content: text,
            language,
            file_type: format,
            size: stats.size,
            last_modified: stats.modified,
        })
    }

    /// Run the extractor for `format`, bounded by the configured timeout.
    pub fn extract(&self, format: DocumentFormat, path: &Path) -> Result<String> {
        match self.timeout {
            Some(timeout) => self.extract_with_timeout(format, path.to_path_buf(), timeout),
            None => extract_guarded(&self.extractors, format, path),
        }
    }

    fn extract_with_timeout(&self, format: DocumentFormat, path: PathBuf, timeout: Duration) -> Result<String> {
        let (sender, receiver) = mpsc::channel();
        let extractors = Arc::clone(&self.extractors);
        let worker_path = path.clone();

        std::thread::Builder::new()
            .name("docsift-extract".to_string())
            .spawn(move || {
                let result = extract_guarded(&extractors, format, &worker_path);
                // Receiver is gone once the caller timed out.
                let _ = sender.send(result);
            })?;

        match receiver.recv_timeout(timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    "Extraction of {} exceeded {}s; skipping file",
                    path.display(),
                    timeout.as_secs()
                );
                Err(DocsiftError::Timeout {
                    path: path.display().to_string(),
                    seconds: timeout.as_secs(),
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(DocsiftError::Other(format!(
                "Extraction worker for {} exited without a result",
                path.display()
            ))),
        }
    }
}

/// Call the extractor, turning a panic into an error.
fn extract_guarded(extractors: &ExtractorSet, format: DocumentFormat, path: &Path) -> Result<String> {
    let extractor = extractors.get(format);
    match catch_unwind(AssertUnwindSafe(|| extractor.extract_path(path))) {
        Ok(result) => result,
        Err(payload) => Err(DocsiftError::Other(format!(
            "{} panicked: {}",
            extractor.name(),
            panic_message(payload.as_ref())
        ))),
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_text_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "Hello world").unwrap();

        let record = DocumentPipeline::new(&IndexConfig::default()).process(&path).unwrap();
        assert_eq!(record.filename, "note.txt");
        assert_eq!(record.content, "Hello world");
        assert_eq!(record.language, "unknown");
        assert_eq!(record.file_type, DocumentFormat::Text);
        assert_eq!(record.size, 11);
        assert!(record.last_modified > 0.0);
        assert_eq!(Path::new(&record.path), fs::canonicalize(&path).unwrap());
    }

    #[test]
    fn test_process_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.png");
        fs::write(&path, b"\x89PNG").unwrap();

        assert!(DocumentPipeline::new(&IndexConfig::default()).process(&path).is_none());
    }

    #[test]
    fn test_process_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, b"").unwrap();

        assert!(DocumentPipeline::new(&IndexConfig::default()).process(&path).is_none());
    }

    #[test]
    fn test_process_corrupt_files() {
        let dir = tempdir().unwrap();
        let pipeline = DocumentPipeline::new(&IndexConfig::default());

        for name in ["broken.pdf", "broken.docx", "broken.xlsx"] {
            let path = dir.path().join(name);
            fs::write(&path, b"definitely not an office document").unwrap();
            assert!(pipeline.process(&path).is_none(), "{} should be skipped", name);
        }
    }

    #[test]
    fn test_process_missing_file() {
        let pipeline = DocumentPipeline::new(&IndexConfig::default());
        assert!(pipeline.process(Path::new("/nonexistent/missing.txt")).is_none());
    }

    #[test]
    fn test_extract_with_timeout_returns_result() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quick.txt");
        fs::write(&path, "fast enough").unwrap();

        let config = IndexConfig {
            extraction_timeout_secs: Some(30),
            ..IndexConfig::default()
        };
        let text = DocumentPipeline::new(&config)
            .extract(DocumentFormat::Text, &path)
            .unwrap();
        assert_eq!(text, "fast enough");
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_times_out_on_blocking_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stalled.txt");
        // Opening a FIFO for reading blocks until a writer appears.
        let status = std::process::Command::new("mkfifo").arg(&path).status().unwrap();
        assert!(status.success());

        let config = IndexConfig {
            extraction_timeout_secs: Some(1),
            ..IndexConfig::default()
        };
        let started = std::time::Instant::now();
        let result = DocumentPipeline::new(&config).extract(DocumentFormat::Text, &path);

        match result {
            Err(DocsiftError::Timeout { path: reported, seconds }) => {
                assert_eq!(seconds, 1);
                assert!(reported.ends_with("stalled.txt"));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
