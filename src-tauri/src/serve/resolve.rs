//! URL path → filesystem path resolution for the static server.
//!
//! Resolution is purely lexical: the decoded request path is joined onto
//! the root with `.` and `..` collapsed, then checked for containment.
//! Nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

pub const INDEX_DOCUMENT: &str = "index.html";
const ROOT_DOCUMENT: &str = "/index.html";
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Extension → MIME type. Anything else is served as `DEFAULT_MIME`.
const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("js", "application/javascript"),
    ("css", "text/css"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
];

/// Outcome of resolving a request path against the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Escapes the root.
    Forbidden,
    /// Malformed percent-encoding.
    Undecodable,
    /// Lexically inside the root; may or may not exist.
    Candidate(PathBuf),
}

/// Resolve a raw URI path (no query string) under `root`.
///
/// `/` maps to the index document. With `strict` off, containment is a
/// string-prefix test on the joined path, so a sibling directory whose name
/// starts with the root's name passes. With `strict` on, containment is
/// checked component by component.
pub fn resolve(root: &Path, raw_path: &str, strict: bool) -> Resolution {
    let raw_path = if raw_path.is_empty() || raw_path == "/" {
        ROOT_DOCUMENT
    } else {
        raw_path
    };

    let decoded = match urlencoding::decode(raw_path) {
        Ok(d) => d,
        Err(_) => return Resolution::Undecodable,
    };

    let base = lexical_join(root, "");
    let joined = lexical_join(root, &decoded);
    let contained = if strict {
        joined.starts_with(&base)
    } else {
        joined
            .to_string_lossy()
            .starts_with(base.to_string_lossy().as_ref())
    };

    if contained {
        Resolution::Candidate(joined)
    } else {
        Resolution::Forbidden
    }
}

/// Join `request` onto `root`, collapsing `.`, empty segments and `..`.
///
/// `..` may climb above `root`; it stops at the filesystem root. A trailing
/// `/` on `request` is kept, so the result only names a directory.
pub fn lexical_join(root: &Path, request: &str) -> PathBuf {
    let mut joined: PathBuf = root
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    for segment in request.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                joined.pop();
            }
            s => joined.push(s),
        }
    }
    if request.ends_with('/') {
        // Pushing an empty component appends a trailing separator.
        joined.push("");
    }
    joined
}

/// Whether the path ends in a separator, i.e. must resolve to a directory.
pub fn has_trailing_separator(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .ends_with(std::path::MAIN_SEPARATOR)
}

/// MIME type for a path, by lower-cased extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(e) => e.to_ascii_lowercase(),
        None => return DEFAULT_MIME,
    };
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME)
}
