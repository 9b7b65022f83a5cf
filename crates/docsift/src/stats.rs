//! Corpus statistics, recomputed from the cache on every call.

use crate::types::{CorpusStats, DocumentRecord};
use indexmap::IndexMap;

const BYTES_PER_KB: f64 = 1024.0;

/// Aggregate counts and sizes over `documents`.
///
/// An empty corpus yields only `total_documents: 0`. Language and file type
/// counts keep the order in which each key is first seen.
pub fn compute_stats<'a, I>(documents: I) -> CorpusStats
where
    I: IntoIterator<Item = &'a DocumentRecord>,
{
    let mut total_documents = 0_usize;
    let mut total_size = 0_u64;
    let mut languages: IndexMap<String, usize> = IndexMap::new();
    let mut file_types: IndexMap<String, usize> = IndexMap::new();

    for document in documents {
        total_documents += 1;
        total_size += document.size;
        *languages.entry(document.language.clone()).or_default() += 1;
        *file_types.entry(document.file_type.label().to_string()).or_default() += 1;
    }

    if total_documents == 0 {
        return CorpusStats::default();
    }

    let total_bytes = total_size as f64;
    CorpusStats {
        total_documents,
        total_size_bytes: Some(total_size),
        total_size_mb: Some(round2(total_bytes / BYTES_PER_KB / BYTES_PER_KB)),
        avg_size_kb: Some(round2(total_bytes / total_documents as f64 / BYTES_PER_KB)),
        languages: Some(languages),
        file_types: Some(file_types),
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formats::DocumentFormat;

    fn doc(name: &str, language: &str, file_type: DocumentFormat, size: u64) -> DocumentRecord {
        DocumentRecord {
            path: format!("/docs/{}", name),
            filename: name.to_string(),
            content: "content".to_string(),
            language: language.to_string(),
            file_type,
            size,
            last_modified: 0.0,
        }
    }

    #[test]
    fn test_empty_corpus() {
        let docs: Vec<DocumentRecord> = Vec::new();
        let stats = compute_stats(&docs);
        assert_eq!(stats, CorpusStats::default());
        assert_eq!(serde_json::to_value(&stats).unwrap(), serde_json::json!({"total_documents": 0}));
    }

    #[test]
    fn test_sizes_and_counts() {
        let docs = [
            doc("a.txt", "en", DocumentFormat::Text, 2048),
            doc("b.pdf", "de", DocumentFormat::Pdf, 1000),
            doc("c.txt", "en", DocumentFormat::Text, 500),
        ];
        let stats = compute_stats(&docs);

        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.total_size_bytes, Some(3548));
        assert_eq!(stats.avg_size_kb, Some(1.15));
        assert_eq!(stats.total_size_mb, Some(0.0));

        let languages = stats.languages.unwrap();
        assert_eq!(languages.get_index(0), Some((&"en".to_string(), &2)));
        assert_eq!(languages.get("de"), Some(&1));

        let file_types = stats.file_types.unwrap();
        assert_eq!(file_types.keys().collect::<Vec<_>>(), vec!["Text File", "PDF"]);
        assert_eq!(file_types["Text File"], 2);
    }

    #[test]
    fn test_total_size_mb() {
        let docs = [doc("big.pdf", "en", DocumentFormat::Pdf, 3 * 1024 * 1024 + 512 * 1024)];
        let stats = compute_stats(&docs);
        assert_eq!(stats.total_size_mb, Some(3.5));
        assert_eq!(stats.avg_size_kb, Some(3584.0));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(2.0), 2.0);
    }
}
