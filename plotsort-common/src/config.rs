//! Configuration loading
//!
//! Resolution order (highest priority first):
//! 1. Command-line argument / environment variable
//! 2. TOML config file
//! 3. Compiled default

use crate::images::DEFAULT_PATTERN;
use crate::selection::SELECTIONS_DIR;
use crate::{Error, ImageSet, LabelSet, Result, SelectionStore};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Optional settings read from a TOML file
///
/// ```toml
/// pattern = "*.jpg"
///
/// [labels]
/// 1 = "good"
/// 2 = "bad"
/// 3 = "unsure"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub pattern: Option<String>,
    pub labels: Option<BTreeMap<String, String>>,
}

impl TomlConfig {
    /// Load from an explicitly named file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Resolved configuration passed explicitly to every handler
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the images; static files are served from here
    pub image_root: PathBuf,
    /// Glob pattern, relative to `image_root`
    pub pattern: String,
    /// Where selection files are written
    pub selections_dir: PathBuf,
    /// Label vocabulary
    pub labels: LabelSet,
}

impl Config {
    /// Defaults for an image root: `*.png`, `<root>/selections`, `1=good 2=bad`
    pub fn new(image_root: impl Into<PathBuf>) -> Self {
        let image_root = image_root.into();
        let selections_dir = image_root.join(SELECTIONS_DIR);
        Self {
            image_root,
            pattern: DEFAULT_PATTERN.to_string(),
            selections_dir,
            labels: LabelSet::default(),
        }
    }

    /// Apply values from a config file
    pub fn with_file(self, file: TomlConfig) -> Result<Self> {
        let mut config = self;
        if let Some(pattern) = file.pattern {
            config = config.with_pattern(pattern)?;
        }
        if let Some(labels) = file.labels {
            config.labels = LabelSet::new(labels)?;
        }
        Ok(config)
    }

    /// Override the glob pattern, rejecting patterns that do not compile
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        glob::Pattern::new(&pattern)?;
        if Path::new(&pattern).is_absolute() {
            return Err(Error::Config(format!(
                "pattern {:?} must be relative to the image root",
                pattern
            )));
        }
        self.pattern = pattern;
        Ok(self)
    }

    pub fn with_selections_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.selections_dir = dir.into();
        self
    }

    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    pub fn selection_store(&self) -> SelectionStore {
        SelectionStore::new(&self.selections_dir)
    }

    /// Read the current image set from disk
    pub fn scan_images(&self) -> Result<ImageSet> {
        ImageSet::scan(&self.image_root, &self.pattern)
    }
}
