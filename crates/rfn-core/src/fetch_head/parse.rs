//! Parse HTTP response header lines into ResponseHeaders.

use super::ResponseHeaders;

/// Decodes one raw header line.
///
/// UTF-8 is taken as is; anything else is read as ISO-8859-1, so every byte
/// maps to a character and no header is lost.
pub(crate) fn decode_header_line(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(s) => s.to_string(),
        Err(_) => data.iter().map(|&b| b as char).collect(),
    }
}

/// Parse collected header lines into ResponseHeaders.
///
/// The status line and blank terminator are skipped; names keep their original
/// case and lookups are case-insensitive.
pub(crate) fn parse_headers(lines: &[String], status: Option<u32>) -> ResponseHeaders {
    let mut headers = ResponseHeaders::new(status);

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("HTTP/") {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim(), value.trim());
        }
    }

    headers
}
