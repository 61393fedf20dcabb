//! Classification maps and the save request schema

use crate::{ImageSet, LabelSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from image filename to the label key assigned to it
///
/// Persisted as a bare JSON object, e.g. `{"a.png": "1"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationMap(BTreeMap<String, String>);

impl ClassificationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label key recorded for a file
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.0.get(filename).map(String::as_str)
    }

    /// Record a label, replacing any previous one. Returns true if the map changed.
    pub fn set(&mut self, filename: impl Into<String>, key: impl Into<String>) -> bool {
        let key = key.into();
        match self.0.insert(filename.into(), key.clone()) {
            Some(previous) => previous != key,
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Drop entries whose label key is not in the vocabulary, returning the dropped names
    pub fn retain_labels(&mut self, labels: &LabelSet) -> Vec<String> {
        let mut dropped = Vec::new();
        self.0.retain(|file, key| {
            let keep = labels.contains(key);
            if !keep {
                dropped.push(file.clone());
            }
            keep
        });
        dropped
    }

    /// Drop entries for files that are not part of `images`, returning the dropped names
    pub fn retain_images(&mut self, images: &ImageSet) -> Vec<String> {
        let mut dropped = Vec::new();
        self.0.retain(|file, _| {
            let keep = images.contains(file);
            if !keep {
                dropped.push(file.clone());
            }
            keep
        });
        dropped
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ClassificationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Body of `POST /save`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SaveRequest {
    /// Session identifier as sent by the browser (unsanitized)
    pub session: String,

    /// Complete classification map for the session
    pub imageselection: ClassificationMap,
}
