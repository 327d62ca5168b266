//! Extension-preserving length limiting.
//!
//! Lengths are counted in characters, and cuts always land on a character boundary.

/// Practical file name limit (eCryptfs and most Linux filesystems).
pub const MAX_NAME_LEN: usize = 255;

/// Splits `name` into `(base, extension)`; the extension includes its leading dot.
///
/// The extension starts at the last `.` of the final `/`-separated segment. Dots
/// that only lead a segment (`.bashrc`, `..`) do not start an extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let seg_start = name.rfind('/').map_or(0, |i| i + 1);
    let segment = &name[seg_start..];
    match segment.rfind('.') {
        Some(dot) if segment[..dot].chars().any(|c| c != '.') => {
            name.split_at(seg_start + dot)
        }
        _ => (name, ""),
    }
}

/// Cuts `name` to at most `max` characters, keeping the extension intact.
///
/// The base is shortened so that `base + extension` is exactly `max` characters.
/// An extension longer than `max` cannot be kept; the whole name is cut instead.
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }

    let (base, ext) = split_extension(name);
    let ext_len = ext.chars().count();
    if ext_len > max {
        return name.chars().take(max).collect();
    }

    let mut out: String = base.chars().take(max - ext_len).collect();
    out.push_str(ext);
    out
}
