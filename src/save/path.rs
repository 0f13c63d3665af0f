// src/save/path.rs
// =============================================================================
// Maps a page URL to the relative file it is saved under.
//
// Examples (relative to the output directory):
//   https://ex.com/                    -> index.txt
//   https://ex.com/docs                -> docs.txt
//   https://ex.com/docs/api?version=2  -> docs/api_version-2.txt
//   https://ex.com/docs/a?x=1&y=&x=2   -> docs/a_x-1.txt
//
// Rules:
// - the path is split on '/', empty segments dropped
// - every segment but the last is a directory; the last is the file name
//   base ("index" when there are no segments)
// - query pairs are decoded in query-string order, only the first value of
//   each key is used and keys with an empty value are skipped; each becomes
//   "key-value" and they are joined with '_'
// - ".txt" is appended
// =============================================================================

use std::path::{Path, PathBuf};
use url::Url;

const INDEX_NAME: &str = "index";
const EXTENSION: &str = "txt";

/// Relative save location for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePath {
    /// Directory segments, outermost first
    pub dirs: Vec<String>,
    /// File name including the extension
    pub file_name: String,
}

impl SavePath {
    /// Derives the save location from a page URL
    pub fn from_url(url: &Url) -> Self {
        let mut segments: Vec<String> = url
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(sanitize)
            .collect();

        let mut base = segments.pop().unwrap_or_else(|| INDEX_NAME.to_string());

        let pairs = query_pairs(url);
        if !pairs.is_empty() {
            let joined = pairs
                .iter()
                .map(|(key, value)| format!("{}-{}", sanitize(key), sanitize(value)))
                .collect::<Vec<_>>()
                .join("_");
            base.push('_');
            base.push_str(&joined);
        }

        Self {
            dirs: segments,
            file_name: format!("{}.{}", base, EXTENSION),
        }
    }

    /// Directory the file lives in, under `base`
    pub fn dir_under(&self, base: &Path) -> PathBuf {
        self.dirs.iter().fold(base.to_path_buf(), |path, dir| path.join(dir))
    }

    /// Full file path under `base`
    pub fn under(&self, base: &Path) -> PathBuf {
        self.dir_under(base).join(&self.file_name)
    }
}

// First non-empty value per key, keys in order of first appearance
fn query_pairs(url: &Url) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();

    for (key, value) in url.query_pairs() {
        if value.is_empty() || pairs.iter().any(|(seen, _)| *seen == key) {
            continue;
        }
        pairs.push((key.into_owned(), value.into_owned()));
    }

    pairs
}

// Decoded query text may contain separators; keep it inside one file name
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}
