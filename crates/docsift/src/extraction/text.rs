//! Plain text extraction with an ordered encoding fallback.
//!
//! Bytes are decoded with each configured encoding in turn and the first
//! decoding that succeeds without a single malformed sequence wins. There is no
//! lossy fallback: if every encoding fails the file is reported as undecodable.
//!
//! UTF-16 is only attempted when the data starts with a UTF-16 byte-order mark.
//! A leading UTF-8 byte-order mark is dropped.

use super::DocumentExtractor;
use crate::core::config::DEFAULT_ENCODINGS;
use crate::core::formats::DocumentFormat;
use crate::{DocsiftError, Result};
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use std::borrow::Cow;
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Extractor for `.txt` files.
#[derive(Debug, Clone)]
pub struct PlainTextExtractor {
    encodings: Vec<&'static Encoding>,
}

impl PlainTextExtractor {
    /// Build an extractor from WHATWG encoding labels, in priority order.
    ///
    /// Unknown labels are logged and ignored.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut encodings: Vec<&'static Encoding> = Vec::with_capacity(labels.len());

        for label in labels {
            let label = label.as_ref();
            match Encoding::for_label(label.as_bytes()) {
                Some(encoding) if !encodings.contains(&encoding) => encodings.push(encoding),
                Some(_) => {}
                None => tracing::warn!("Ignoring unknown text encoding label: {}", label),
            }
        }

        Self { encodings }
    }

    /// Encodings in the order they are tried.
    pub fn encodings(&self) -> &[&'static Encoding] {
        &self.encodings
    }

    /// Decode `bytes` with the first encoding that accepts them.
    ///
    /// Returns the decoded text together with the encoding that produced it.
    pub fn decode(&self, bytes: &[u8]) -> Result<(String, &'static Encoding)> {
        for encoding in &self.encodings {
            if let Some(text) = decode_strict(bytes, encoding) {
                return Ok((text.into_owned(), encoding));
            }
            tracing::debug!("Text is not valid {}", encoding.name());
        }

        Err(DocsiftError::encoding(format!(
            "Could not decode text with any of: {}",
            self.encodings
                .iter()
                .map(|encoding| encoding.name())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::from_labels(&DEFAULT_ENCODINGS)
    }
}

impl DocumentExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "text-extractor"
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Text
    }

    fn extract_path(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let (text, encoding) = self.decode(&bytes).map_err(|e| match e {
            DocsiftError::Encoding { message } => DocsiftError::Encoding {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })?;

        tracing::debug!("Decoded {} as {}", path.display(), encoding.name());
        Ok(text)
    }
}

/// Decode without replacement characters; `None` on any malformed sequence.
fn decode_strict<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Option<Cow<'a, str>> {
    if encoding == UTF_16LE || encoding == UTF_16BE {
        let (bom_encoding, bom_length) = Encoding::for_bom(bytes)?;
        if bom_encoding != UTF_16LE && bom_encoding != UTF_16BE {
            return None;
        }
        return bom_encoding.decode_without_bom_handling_and_without_replacement(&bytes[bom_length..]);
    }

    let body = if encoding == UTF_8 {
        bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
    } else {
        bytes
    };

    encoding.decode_without_bom_handling_and_without_replacement(body)
}
