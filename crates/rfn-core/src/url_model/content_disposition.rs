//! Content-Disposition header parsing.
//!
//! Two strategies live here: the historical split-based extraction, which is the
//! default, and a parameter-aware parser that understands quoting and `filename*`.

const FILENAME_QUOTED: &str = "filename=\"";
const QUOTE_SEMICOLON: &str = "\";";

/// Extracts a file name by plain substring splitting.
///
/// Takes the text after the first `filename="` up to the following `";`. When no
/// `";` follows, a closing quote at the end of the header is dropped so that
/// `attachment; filename="report.pdf"` yields `report.pdf`.
///
/// A header without `filename="` is not rejected: the whole value (cut at the first
/// `";`) comes back as the candidate. Callers that want a URL fallback for such
/// headers should use [`rfc6266_filename`].
pub fn legacy_filename(header_value: &str) -> String {
    match header_value.split_once(FILENAME_QUOTED) {
        Some((_, rest)) => match rest.split_once(QUOTE_SEMICOLON) {
            Some((name, _)) => name.to_string(),
            None => {
                let rest = rest.trim_end();
                rest.strip_suffix('"').unwrap_or(rest).to_string()
            }
        },
        None => match header_value.split_once(QUOTE_SEMICOLON) {
            Some((head, _)) => head.to_string(),
            None => header_value.to_string(),
        },
    }
}

/// Extracts the filename from a raw Content-Disposition header value.
///
/// Supports:
/// - `filename="value"` (quoted; `;` inside quotes allowed, backslash escapes removed)
/// - `filename=value` (token)
/// - `filename*=UTF-8'lang'percent-encoded` (RFC 5987; decoded)
///
/// If both `filename` and `filename*` exist, `filename*` takes precedence.
/// Returns `None` when neither parameter yields a non-empty value.
pub fn rfc6266_filename(header_value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for param in split_params(header_value) {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();

        match name.as_str() {
            "filename*" => {
                if let Some(decoded) = decode_ext_value(value) {
                    if !decoded.is_empty() {
                        return Some(decoded);
                    }
                }
            }
            "filename" => {
                let unquoted = match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
                    Some(inner) => unescape_quoted(inner),
                    None => value.to_string(),
                };
                if !unquoted.is_empty() && plain.is_none() {
                    plain = Some(unquoted);
                }
            }
            _ => {}
        }
    }

    plain
}

/// Splits a header value on `;`, ignoring separators inside quoted strings.
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                params.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(value[start..].trim());
    params
}

/// Decodes an RFC 5987 ext-value (`charset'language'pct-encoded`).
///
/// Only UTF-8 and ISO-8859-1 charsets are understood.
fn decode_ext_value(value: &str) -> Option<String> {
    let value = value.trim_matches('"');
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?.to_ascii_lowercase();
    let _language = parts.next()?;
    let encoded = parts.next()?;

    let bytes = percent_decode(encoded);
    match charset.as_str() {
        "utf-8" => Some(String::from_utf8_lossy(&bytes).into_owned()),
        "iso-8859-1" => Some(bytes.iter().map(|&b| b as char).collect()),
        _ => None,
    }
}

/// Remove backslash escapes from a quoted-string body.
fn unescape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Percent-decodes `input`; malformed escapes are kept verbatim.
fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
