//! URL modeling and filename derivation.
//!
//! Derives a candidate filename from the Content-Disposition header or the URL
//! path, then limits its length and trims it.

mod content_disposition;
mod path;
mod truncate;

use serde::{Deserialize, Serialize};

pub use content_disposition::{legacy_filename, rfc6266_filename};
pub use path::basename_from_url;
pub use truncate::{split_extension, truncate_name, MAX_NAME_LEN};

/// How the Content-Disposition header is turned into a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderParsing {
    /// Substring split on `filename="` and `";`. Never falls back to the URL.
    #[default]
    Legacy,
    /// Parameter-aware parsing with `filename*` support; falls back to the URL
    /// when the header names no file.
    Rfc6266,
}

impl HeaderParsing {
    /// Candidate name from a Content-Disposition value, or `None` to use the URL.
    pub fn filename_from_header(self, header_value: &str) -> Option<String> {
        match self {
            HeaderParsing::Legacy => Some(legacy_filename(header_value)),
            HeaderParsing::Rfc6266 => rfc6266_filename(header_value),
        }
    }
}

/// Length-limits and trims a candidate. Returns `None` if nothing usable remains.
pub fn finalize_candidate(candidate: &str, max_len: usize) -> Option<String> {
    let limited = truncate_name(candidate, max_len);
    let trimmed = limited.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_always_yields_candidate() {
        assert_eq!(
            HeaderParsing::Legacy
                .filename_from_header("attachment; filename=\"report.pdf\"")
                .as_deref(),
            Some("report.pdf")
        );
        assert_eq!(
            HeaderParsing::Legacy.filename_from_header("inline").as_deref(),
            Some("inline")
        );
    }

    #[test]
    fn rfc6266_defers_to_url() {
        assert_eq!(HeaderParsing::Rfc6266.filename_from_header("inline"), None);
        assert_eq!(
            HeaderParsing::Rfc6266
                .filename_from_header("attachment; filename=plain.bin")
                .as_deref(),
            Some("plain.bin")
        );
    }

    #[test]
    fn finalize_trims_whitespace() {
        assert_eq!(
            finalize_candidate("  report.pdf \t", MAX_NAME_LEN).as_deref(),
            Some("report.pdf")
        );
    }

    #[test]
    fn finalize_empty_and_blank() {
        assert_eq!(finalize_candidate("", MAX_NAME_LEN), None);
        assert_eq!(finalize_candidate("   \n", MAX_NAME_LEN), None);
    }

    #[test]
    fn finalize_truncates_before_trimming() {
        let long = format!("{}.txt", "z".repeat(300));
        let out = finalize_candidate(&long, MAX_NAME_LEN).unwrap();
        assert_eq!(out.len(), 255);
        assert!(out.ends_with(".txt"));
    }

    #[test]
    fn header_parsing_serde_names() {
        #[derive(Deserialize)]
        struct Wrap {
            mode: HeaderParsing,
        }
        let w: Wrap = toml::from_str("mode = \"rfc6266\"").unwrap();
        assert_eq!(w.mode, HeaderParsing::Rfc6266);
        let w: Wrap = toml::from_str("mode = \"legacy\"").unwrap();
        assert_eq!(w.mode, HeaderParsing::Legacy);
    }
}
