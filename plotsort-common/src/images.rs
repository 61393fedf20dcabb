//! Image set enumeration
//!
//! Lists the files under the image root that match the configured glob
//! pattern. The set is read fresh for every page load; nothing is cached.

use crate::Result;
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Default glob pattern for files to classify
pub const DEFAULT_PATTERN: &str = "*.png";

/// Ordered list of image paths, relative to the image root, `/`-separated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageSet(Vec<String>);

impl ImageSet {
    /// Enumerate files under `root` matching `pattern`
    ///
    /// Order follows the directory listing. Hidden files only match when the
    /// pattern names the leading dot explicitly. Directories and entries whose
    /// name is not valid UTF-8 are skipped.
    pub fn scan(root: &Path, pattern: &str) -> Result<Self> {
        let escaped_root = Pattern::escape(&root.to_string_lossy());
        let full_pattern = format!("{}/{}", escaped_root.trim_end_matches('/'), pattern);

        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        let mut names = Vec::new();
        for entry in glob::glob_with(&full_pattern, options)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(&path);
            match relative.to_str() {
                Some(name) => names.push(name.replace('\\', "/")),
                None => warn!("Skipping non UTF-8 file name: {}", path.display()),
            }
        }

        debug!("{} files match {} in {}", names.len(), pattern, root.display());
        Ok(Self(names))
    }

    /// Build a set from known names (no filesystem access)
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Index of a filename in the set
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
