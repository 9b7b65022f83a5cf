//! Language classification using the whatlang library.
//!
//! Punctuation is stripped before classification. Text that is too short after
//! cleaning is reported as [`UNKNOWN_LANGUAGE`] without consulting the detector,
//! and any detector failure maps to the same sentinel.

use once_cell::sync::Lazy;
use regex::Regex;
use whatlang::Lang;

/// Sentinel returned when no language can be determined.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Cleaned text must be longer than this many characters to be classified.
pub const DEFAULT_MIN_CHARS: usize = 20;

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("Punctuation regex pattern is valid and should compile"));

/// Classify `text` with the default length threshold.
///
/// # Example
///
/// ```rust
/// use docsift::language_detection::{UNKNOWN_LANGUAGE, detect_language};
///
/// assert_eq!(detect_language("Hi!"), UNKNOWN_LANGUAGE);
/// ```
pub fn detect_language(text: &str) -> String {
    detect_language_with_threshold(text, DEFAULT_MIN_CHARS)
}

/// Classify `text`, requiring more than `min_chars` characters after cleaning.
///
/// Returns an ISO 639-1 code (`"en"`, `"de"`, ...) or `"unknown"`.
pub fn detect_language_with_threshold(text: &str, min_chars: usize) -> String {
    let cleaned = strip_punctuation(text);
    if cleaned.trim().chars().count() <= min_chars {
        return UNKNOWN_LANGUAGE.to_string();
    }

    match std::panic::catch_unwind(|| whatlang::detect(&cleaned)) {
        Ok(Some(info)) => lang_to_iso639_1(info.lang()).to_string(),
        Ok(None) => UNKNOWN_LANGUAGE.to_string(),
        Err(_) => {
            tracing::warn!("Language detector panicked; reporting unknown");
            UNKNOWN_LANGUAGE.to_string()
        }
    }
}

/// Remove every character that is neither a word character nor whitespace.
pub fn strip_punctuation(text: &str) -> String {
    PUNCTUATION.replace_all(text, "").into_owned()
}

/// Convert whatlang Lang enum to ISO 639-1 language code.
fn lang_to_iso639_1(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Rus => "ru",
        Lang::Cmn => "zh",
        Lang::Spa => "es",
        Lang::Por => "pt",
        Lang::Ita => "it",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ukr => "uk",
        Lang::Kat => "ka",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Jpn => "ja",
        Lang::Heb => "he",
        Lang::Yid => "yi",
        Lang::Pol => "pl",
        Lang::Amh => "am",
        Lang::Jav => "jv",
        Lang::Kor => "ko",
        Lang::Nob => "no",
        Lang::Dan => "da",
        Lang::Swe => "sv",
        Lang::Fin => "fi",
        Lang::Tur => "tr",
        Lang::Nld => "nl",
        Lang::Hun => "hu",
        Lang::Ces => "cs",
        Lang::Ell => "el",
        Lang::Bul => "bg",
        Lang::Bel => "be",
        Lang::Mar => "mr",
        Lang::Kan => "kn",
        Lang::Ron => "ro",
        Lang::Slv => "sl",
        Lang::Hrv => "hr",
        Lang::Srp => "sr",
        Lang::Mkd => "mk",
        Lang::Lit => "lt",
        Lang::Lav => "lv",
        Lang::Est => "et",
        Lang::Tam => "ta",
        Lang::Vie => "vi",
        Lang::Urd => "ur",
        Lang::Tha => "th",
        Lang::Guj => "gu",
        Lang::Uzb => "uz",
        Lang::Pan => "pa",
        Lang::Aze => "az",
        Lang::Ind => "id",
        Lang::Tel => "te",
        Lang::Pes => "fa",
        Lang::Mal => "ml",
        Lang::Ori => "or",
        Lang::Mya => "my",
        Lang::Nep => "ne",
        Lang::Sin => "si",
        Lang::Khm => "km",
        Lang::Tuk => "tk",
        Lang::Aka => "ak",
        Lang::Zul => "zu",
        Lang::Sna => "sn",
        Lang::Afr => "af",
        Lang::Lat => "la",
        Lang::Slk => "sk",
        Lang::Cat => "ca",
        Lang::Tgl => "tl",
        Lang::Hye => "hy",
        Lang::Epo => "eo",
        Lang::Ben => "bn",
        Lang::Cym => "cy",
    }
}
