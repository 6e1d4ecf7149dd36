//! Request path building
//!
//! Every request addresses `/uri/<cap>` optionally followed by a relative path
//! below that capability. Relative paths are slash-separated; each segment is
//! percent-escaped on its own so the separators survive unescaped. Empty
//! segments are dropped, which collapses doubled slashes.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Non-empty segments of a relative path. `.` segments refer to the
/// directory itself and are skipped.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// True when the path addresses the object itself (`""`, `"/"`, `"."`).
pub fn is_self(path: &str) -> bool {
    segments(path).is_empty()
}

/// Percent-escape a relative path segment by segment.
pub fn escape(path: &str) -> String {
    segments(path)
        .iter()
        .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build `/uri/<cap>[/<escaped path>]`.
pub fn object_path(cap: &str, path: &str) -> String {
    let escaped = escape(path);
    if escaped.is_empty() {
        format!("/uri/{}", cap)
    } else {
        format!("/uri/{}/{}", cap, escaped)
    }
}

/// Split a search prefix into the parent directory path (including its
/// trailing slash) and the partial child name.
///
/// `"/docs/re"` splits into `("/docs/", "re")`; a prefix without any slash
/// has an empty parent.
pub fn split_prefix(prefix: &str) -> (&str, &str) {
    match prefix.rfind('/') {
        Some(idx) => (&prefix[..=idx], &prefix[idx + 1..]),
        None => ("", prefix),
    }
}

/// True when `new` is `old` itself or lies below it.
pub fn is_within(old: &str, new: &str) -> bool {
    let prefix = format!("{}/", old.trim_end_matches('/'));
    if new.starts_with(&prefix) {
        return true;
    }
    let old = segments(old);
    let new = segments(new);
    new.len() >= old.len() && new[..old.len()] == old[..]
}
