//! Filename extraction from URL path.

/// Returns the final segment of the URL's path component.
///
/// Query string and fragment are not part of the path. The result is empty when
/// the path ends in `/` (including a bare host) or the URL cannot be parsed.
/// Percent-escapes are left as they appear in the URL.
pub fn basename_from_url(url: &str) -> String {
    let Ok(parsed) = url::Url::parse(url) else {
        return String::new();
    };
    let path = parsed.path();
    match path.rsplit_once('/') {
        Some((_, last)) => last.to_string(),
        None => path.to_string(),
    }
}
