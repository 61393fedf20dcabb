//! Label vocabulary
//!
//! The fixed set of single-character keys a user may press to classify an
//! image, each mapped to a human-readable label.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered mapping from label key to display label
///
/// Serializes as a plain JSON object (`{"1": "good", "2": "bad"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    /// Build a label set, validating every key
    pub fn new(labels: BTreeMap<String, String>) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::Config("at least one label is required".to_string()));
        }

        for (key, label) in &labels {
            let mut chars = key.chars();
            let valid = match (chars.next(), chars.next()) {
                (Some(c), None) => !c.is_whitespace() && !c.is_control(),
                _ => false,
            };
            if !valid {
                return Err(Error::Config(format!(
                    "label key {:?} must be a single printable character",
                    key
                )));
            }
            if label.trim().is_empty() {
                return Err(Error::Config(format!("label for key {:?} is empty", key)));
            }
        }

        Ok(Self(labels))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Display label for a key
    pub fn label(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate over `(key, label)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        let labels = [("1", "good"), ("2", "bad")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self(labels)
    }
}

impl TryFrom<BTreeMap<String, String>> for LabelSet {
    type Error = Error;

    fn try_from(labels: BTreeMap<String, String>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<LabelSet> for BTreeMap<String, String> {
    fn from(labels: LabelSet) -> Self {
        labels.0
    }
}
