//! Case-insensitive literal substring search over cached documents.
//!
//! Documents are visited in cache order. Within a document, occurrences are
//! found left to right and the search resumes one character after each match
//! start, so overlapping occurrences are counted. Occurrences per document and
//! matches overall are both capped.
//!
//! Positions and context windows are measured in characters of the original
//! content. The match inside each context window is wrapped in `**` at its exact
//! offset.

use crate::core::config::SearchConfig;
use crate::types::{DocumentRecord, SearchMatch};
use crate::{DocsiftError, Result};

/// Search `documents` for `query`, returning at most `max_results` matches.
///
/// # Errors
///
/// Returns a validation error for an empty query.
///
/// # Example
///
/// ```rust
/// use docsift::search::search_documents;
/// use docsift::{DocumentFormat, DocumentRecord, SearchConfig};
///
/// let doc = DocumentRecord {
///     path: "/docs/a.txt".into(),
///     filename: "a.txt".into(),
///     content: "Hello world".into(),
///     language: "unknown".into(),
///     file_type: DocumentFormat::Text,
///     size: 11,
///     last_modified: 0.0,
/// };
///
/// let matches = search_documents([&doc], "WORLD", 50, &SearchConfig::default()).unwrap();
/// assert_eq!(matches[0].position, 6);
/// assert_eq!(matches[0].context, "Hello **world**");
/// ```
pub fn search_documents<'a, I>(
    documents: I,
    query: &str,
    max_results: usize,
    config: &SearchConfig,
) -> Result<Vec<SearchMatch>>
where
    I: IntoIterator<Item = &'a DocumentRecord>,
{
    if query.is_empty() {
        return Err(DocsiftError::validation("query parameter must not be empty"));
    }

    let needle = fold_case(query);
    let mut results = Vec::new();

    for document in documents {
        if results.len() >= max_results {
            break;
        }

        let folded = FoldedText::new(&document.content);
        let occurrences = folded.find_all(&needle, config.max_matches_per_document);
        if occurrences.is_empty() {
            continue;
        }

        let offsets = char_offsets(&document.content);
        let total_matches = occurrences.len();

        for (index, (start, end)) in occurrences.into_iter().enumerate() {
            results.push(SearchMatch {
                filename: document.filename.clone(),
                path: document.path.clone(),
                language: document.language.clone(),
                file_type: document.file_type,
                context: highlighted_context(&document.content, &offsets, start, end, config.context_chars),
                position: start,
                match_number: index + 1,
                total_matches,
                size: document.size,
            });

            if results.len() >= max_results {
                break;
            }
        }
    }

    tracing::debug!("Search for {:?} produced {} matches", query, results.len());
    Ok(results)
}

/// Lower-case `text` one character at a time.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Lower-cased text that remembers where each byte came from.
///
/// Lower-casing can change byte and char lengths (`İ` becomes two chars), so
/// every byte of the folded text records the index of the original character
/// it was produced from.
struct FoldedText {
    folded: String,
    origin: Vec<usize>,
}

impl FoldedText {
    fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());

        for (index, ch) in text.chars().enumerate() {
            for lower in ch.to_lowercase() {
                folded.push(lower);
                origin.extend(std::iter::repeat_n(index, lower.len_utf8()));
            }
        }

        Self { folded, origin }
    }

    /// Up to `limit` occurrences of `needle` as original char ranges.
    fn find_all(&self, needle: &str, limit: usize) -> Vec<(usize, usize)> {
        let mut occurrences = Vec::new();
        let mut cursor = 0;

        while occurrences.len() < limit {
            let Some(found) = self.folded[cursor..].find(needle) else {
                break;
            };
            let pos = cursor + found;

            let start = self.origin[pos];
            let end = self.origin[pos + needle.len() - 1] + 1;
            occurrences.push((start, end));

            let step = self.folded[pos..].chars().next().map_or(1, char::len_utf8);
            cursor = pos + step;
        }

        occurrences
    }
}

/// Byte offset of every char, plus the total length.
fn char_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect()
}

fn highlighted_context(content: &str, offsets: &[usize], start: usize, end: usize, context_chars: usize) -> String {
    let char_count = offsets.len() - 1;
    let window_start = start.saturating_sub(context_chars);
    let window_end = end.saturating_add(context_chars).min(char_count);

    let before = &content[offsets[window_start]..offsets[start]];
    let matched = &content[offsets[start]..offsets[end]];
    let after = &content[offsets[end]..offsets[window_end]];

    format!("{}**{}**{}", before, matched, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formats::DocumentFormat;

    fn doc(filename: &str, content: &str) -> DocumentRecord {
        DocumentRecord {
            path: format!("/docs/{}", filename),
            filename: filename.to_string(),
            content: content.to_string(),
            language: "unknown".to_string(),
            file_type: DocumentFormat::Text,
            size: content.len() as u64,
            last_modified: 0.0,
        }
    }

    fn search(docs: &[DocumentRecord], query: &str, max_results: usize) -> Vec<SearchMatch> {
        search_documents(docs, query, max_results, &SearchConfig::default()).unwrap()
    }

    #[test]
    fn test_one_match_per_file() {
        let docs = [doc("a.txt", "Hello world"), doc("b.txt", "Hello there")];
        let matches = search(&docs, "hello", 50);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].filename, "a.txt");
        assert_eq!(matches[1].filename, "b.txt");
        assert!(matches.iter().all(|m| m.position == 0));
        assert!(matches.iter().all(|m| m.match_number == 1 && m.total_matches == 1));
        assert_eq!(matches[0].context, "**Hello** world");
    }

    #[test]
    fn test_case_insensitive() {
        let docs = [doc("a.txt", "Find the SearchTerm here, and searchterm there")];
        let upper = search(&docs, "SearchTerm", 50);
        let lower = search(&docs, "searchterm", 50);

        assert_eq!(upper.len(), 2);
        assert_eq!(upper.len(), lower.len());
        assert_eq!(upper[0].position, lower[0].position);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let docs = [doc("a.txt", "Hello world")];
        assert!(search(&docs, "absent", 50).is_empty());
    }

    #[test]
    fn test_empty_query_rejected() {
        let docs = [doc("a.txt", "Hello world")];
        let result = search_documents(&docs, "", 50, &SearchConfig::default());
        assert!(matches!(result, Err(DocsiftError::Validation { .. })));
    }

    #[test]
    fn test_overlapping_matches_counted() {
        let docs = [doc("a.txt", "aaaa")];
        let matches = search(&docs, "aa", 50);

        let positions: Vec<usize> = matches.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert!(matches.iter().all(|m| m.total_matches == 3));
    }

    #[test]
    fn test_per_document_cap() {
        let docs = [doc("a.txt", &"test ".repeat(100))];
        let matches = search(&docs, "test", 50);

        assert_eq!(matches.len(), 5);
        assert_eq!(matches.last().unwrap().match_number, 5);
        assert!(matches.iter().all(|m| m.total_matches == 5));
    }

    #[test]
    fn test_global_cap_truncates_document() {
        let docs = [doc("a.txt", &"test ".repeat(100)), doc("b.txt", "test")];
        let matches = search(&docs, "test", 3);

        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|m| m.filename == "a.txt"));
        assert_eq!(matches[2].match_number, 3);
        assert_eq!(matches[2].total_matches, 5);
    }

    #[test]
    fn test_zero_max_results() {
        let docs = [doc("a.txt", "test")];
        assert!(search(&docs, "test", 0).is_empty());
    }

    #[test]
    fn test_highlight_uses_match_offset() {
        let docs = [doc("a.txt", "ab aab")];
        let matches = search(&docs, "ab", 50);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].context, "**ab** aab");
        assert_eq!(matches[1].context, "ab a**ab**");
        assert_eq!(matches[1].position, 4);
    }

    #[test]
    fn test_highlight_keeps_original_case() {
        let docs = [doc("a.txt", "Say HELLO")];
        let matches = search(&docs, "hello", 50);
        assert_eq!(matches[0].context, "Say **HELLO**");
    }

    #[test]
    fn test_context_window_clamped() {
        let content = format!("{}needle{}", "x".repeat(400), "y".repeat(400));
        let docs = [doc("a.txt", &content)];
        let matches = search(&docs, "needle", 50);

        let expected = format!("{}**needle**{}", "x".repeat(150), "y".repeat(150));
        assert_eq!(matches[0].context, expected);
        assert_eq!(matches[0].position, 400);
    }

    #[test]
    fn test_context_window_respects_config() {
        let docs = [doc("a.txt", "0123456789 match 0123456789")];
        let config = SearchConfig {
            context_chars: 3,
            ..SearchConfig::default()
        };
        let matches = search_documents(&docs, "match", 50, &config).unwrap();
        assert_eq!(matches[0].context, "89 **match** 01");
    }

    #[test]
    fn test_positions_count_characters() {
        let docs = [doc("a.txt", "Grüße aus Köln")];
        let matches = search(&docs, "KÖLN", 50);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].position, 10);
        assert_eq!(matches[0].context, "Grüße aus **Köln**");
    }

    #[test]
    fn test_folded_text_expanding_lowercase() {
        // 'İ' lower-cases to two chars; offsets still map back to the original.
        let docs = [doc("a.txt", "İstanbul and more")];
        let matches = search(&docs, "and", 50);

        assert_eq!(matches[0].position, 9);
        assert_eq!(matches[0].context, "İstanbul **and** more");
    }
}
