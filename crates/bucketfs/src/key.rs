// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Object keys are flat strings. These helpers give them a path shape.

use crate::error::{Error, Result};

/// Key separator. A key ending in it is a directory marker.
pub const SEPARATOR: char = '/';

/// True when the key is a directory marker (`docs/`)
pub fn is_directory_marker(key: &str) -> bool {
    key.ends_with(SEPARATOR)
}

/// Listing prefix with leading separators dropped; `/` is the bucket root
pub fn normalize_prefix(prefix: &str) -> &str {
    prefix.trim_start_matches(SEPARATOR)
}

/// One path segment of a key relative to a listing prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub name: &'a str,
    /// The key text up to and including this segment
    pub through: &'a str,
}

/// Splits `key` into the non-empty segments that follow `prefix`.
///
/// `relative_segments("docs/sub/b.txt", "docs/")` is `["sub", "b.txt"]`.
/// Repeated separators produce no empty segments. A key equal to the prefix
/// yields no segments at all.
pub fn relative_segments<'a>(key: &'a str, prefix: &str) -> Result<Vec<&'a str>> {
    Ok(segments(key, prefix)?.into_iter().map(|s| s.name).collect())
}

/// Like [`relative_segments`], also keeping the key of each ancestor
pub fn segments<'a>(key: &'a str, prefix: &str) -> Result<Vec<Segment<'a>>> {
    let relative = key
        .strip_prefix(prefix)
        .ok_or_else(|| Error::invalid_key(key, prefix))?;

    let mut out = Vec::new();
    let mut offset = prefix.len();
    for part in relative.split(SEPARATOR) {
        let end = offset + part.len();
        if !part.is_empty() {
            out.push(Segment {
                name: part,
                through: &key[..end],
            });
        }
        offset = end + SEPARATOR.len_utf8();
    }
    Ok(out)
}

/// Extension of a file name including the leading dot, or empty.
///
/// Dotfiles such as `.env` have no extension.
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(pos) if pos + 1 == name.len() => String::new(),
        Some(pos) => name[pos..].to_string(),
    }
}

/// Last non-empty segment of a key
pub fn basename(key: &str) -> &str {
    key.trim_end_matches(SEPARATOR)
        .rsplit(SEPARATOR)
        .next()
        .unwrap_or_default()
}

/// Drops the last separator-delimited segment.
///
/// `a/b/c` becomes `a/b`; `a/b/` becomes `a/b`; a key without a separator is
/// returned unchanged.
pub fn parent_key(key: &str) -> &str {
    match key.rfind(SEPARATOR) {
        Some(pos) => &key[..pos],
        None => key,
    }
}

/// Key of an object named `name` inside directory `dir`
pub fn join(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches(SEPARATOR);
    let name = name.trim_start_matches(SEPARATOR);
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}{SEPARATOR}{name}")
    }
}

/// Directory marker key for `path`, appending the separator when missing
pub fn directory_key(path: &str) -> String {
    if is_directory_marker(path) {
        path.to_string()
    } else {
        format!("{path}{SEPARATOR}")
    }
}
