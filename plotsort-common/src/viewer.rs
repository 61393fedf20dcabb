//! Viewer rendering model
//!
//! The browser drives navigation and classification. The server uses this
//! model to render the first screen: starting position, hint, title, label
//! form state and the images to preload.

use crate::{ClassificationMap, ImageSet, LabelSet};

/// Number of upcoming images primed in the browser cache
pub const PRELOAD_COUNT: usize = 3;

/// Hint shown when no files match the pattern
pub const EMPTY_HINT: &str = "No images to classify";

/// Initial viewer state: position in the image set plus the seeded classification map
#[derive(Debug, Clone)]
pub struct Viewer {
    images: ImageSet,
    labels: LabelSet,
    selection: ClassificationMap,
    index: usize,
}

impl Viewer {
    /// New viewer positioned on the first image
    pub fn new(images: ImageSet, labels: LabelSet, selection: ClassificationMap) -> Self {
        Self {
            images,
            labels,
            selection,
            index: 0,
        }
    }

    /// Start on `requested` if it is part of the image set, otherwise on the first image
    pub fn starting_at(mut self, requested: Option<&str>) -> Self {
        self.index = requested
            .and_then(|name| self.images.position(name))
            .unwrap_or(0);
        self
    }

    /// Current index, `None` when the image set is empty
    pub fn index(&self) -> Option<usize> {
        (!self.images.is_empty()).then_some(self.index)
    }

    /// Current filename
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index)
    }

    /// Label key recorded for the current file
    pub fn current_label(&self) -> Option<&str> {
        self.current().and_then(|file| self.selection.get(file))
    }

    /// Position and filename, plus the recorded label if any
    ///
    /// `(2/5) b.png [good (1)]`
    pub fn hint(&self) -> String {
        let Some(current) = self.current() else {
            return EMPTY_HINT.to_string();
        };

        let mut hint = format!("({}/{}) {}", self.index + 1, self.images.len(), current);
        if let Some(key) = self.current_label() {
            match self.labels.label(key) {
                Some(label) => hint.push_str(&format!(" [{} ({})]", label, key)),
                None => hint.push_str(&format!(" [{}]", key)),
            }
        }
        hint
    }

    pub fn title(&self) -> String {
        format!("Image selection {}", self.hint())
    }

    /// Filenames following the current one, wrapping, for cache priming
    pub fn preload(&self) -> Vec<&str> {
        (1..=PRELOAD_COUNT)
            .filter_map(|offset| self.wrapped(self.index + offset))
            .collect()
    }

    /// Filename at `index` taken modulo the image count
    fn wrapped(&self, index: usize) -> Option<&str> {
        match self.images.len() {
            0 => None,
            len => self.images.get(index % len),
        }
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn selection(&self) -> &ClassificationMap {
        &self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(names: &[&str]) -> Viewer {
        Viewer::new(
            ImageSet::from_names(names.iter().copied()),
            LabelSet::default(),
            ClassificationMap::new(),
        )
    }

    #[test]
    fn test_starting_at_known_and_unknown_file() {
        let v = viewer(&["a.png", "b.png"]).starting_at(Some("b.png"));
        assert_eq!(v.current(), Some("b.png"));

        let v = viewer(&["a.png", "b.png"]).starting_at(Some("zzz.png"));
        assert_eq!(v.index(), Some(0));

        let v = viewer(&["a.png", "b.png"]).starting_at(None);
        assert_eq!(v.index(), Some(0));
    }

    #[test]
    fn test_seeded_label_shows_in_hint() {
        let v = Viewer::new(
            ImageSet::from_names(["a.png", "b.png"]),
            LabelSet::default(),
            [("a.png", "1"), ("b.png", "2")].into_iter().collect(),
        )
        .starting_at(Some("b.png"));
        assert_eq!(v.current_label(), Some("2"));
        assert_eq!(v.hint(), "(2/2) b.png [bad (2)]");
        assert_eq!(v.title(), "Image selection (2/2) b.png [bad (2)]");
    }

    #[test]
    fn test_unlabeled_file_has_plain_hint() {
        let v = viewer(&["a.png", "b.png"]);
        assert_eq!(v.current_label(), None);
        assert_eq!(v.hint(), "(1/2) a.png");
    }

    #[test]
    fn test_unconfigured_label_shows_bare_key() {
        let v = Viewer::new(
            ImageSet::from_names(["a.png"]),
            LabelSet::default(),
            [("a.png", "3")].into_iter().collect(),
        );
        assert_eq!(v.hint(), "(1/1) a.png [3]");
    }

    #[test]
    fn test_preload_wraps_past_the_last_image() {
        let names = ["a.png", "b.png", "c.png", "d.png", "e.png"];
        for n in 1..=names.len() {
            for start in 0..n {
                let v = viewer(&names[..n]).starting_at(Some(names[start]));
                let expected: Vec<&str> = (1..=PRELOAD_COUNT)
                    .map(|offset| names[(start + offset) % n])
                    .collect();
                assert_eq!(v.preload(), expected, "n={} start={}", n, start);
            }
        }

        let v = viewer(&["a.png", "b.png", "c.png", "d.png"]).starting_at(Some("d.png"));
        assert_eq!(v.preload(), vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_empty_image_set() {
        let v = viewer(&[]).starting_at(Some("a.png"));
        assert_eq!(v.index(), None);
        assert_eq!(v.current(), None);
        assert_eq!(v.current_label(), None);
        assert!(v.preload().is_empty());
        assert_eq!(v.hint(), EMPTY_HINT);
        assert_eq!(v.title(), format!("Image selection {}", EMPTY_HINT));
    }
}
