//! Selection file persistence
//!
//! One JSON document per session under the selections directory. Files
//! accumulate and are never merged; a new page load is seeded from the file
//! whose name sorts greatest.

use crate::{ClassificationMap, Error, Result, SessionId};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default selections subdirectory, relative to the image root
pub const SELECTIONS_DIR: &str = "selections";

/// Reads and writes per-session selection files
#[derive(Debug, Clone)]
pub struct SelectionStore {
    dir: PathBuf,
}

impl SelectionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the selections directory if missing
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path of the selection file whose name sorts greatest, if any
    ///
    /// Only visible `*.json` regular files count. A missing directory is
    /// treated as empty.
    pub fn latest_file(&self) -> Result<Option<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut latest: Option<PathBuf> = None;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with('.') || !name.ends_with(".json") {
                continue;
            }
            if !entry.file_type()?.is_file() {
                continue;
            }

            let path = entry.path();
            let newer = match &latest {
                Some(current) => path.file_name() > current.file_name(),
                None => true,
            };
            if newer {
                latest = Some(path);
            }
        }

        Ok(latest)
    }

    /// Load the classification map from the latest selection file
    ///
    /// `Ok(None)` when no selection file exists. A file that is not a valid
    /// classification map is an error.
    pub fn load_latest(&self) -> Result<Option<ClassificationMap>> {
        let Some(path) = self.latest_file()? else {
            return Ok(None);
        };

        debug!("Loading prior selection from {}", path.display());
        let content = fs::read_to_string(&path)?;
        let map = serde_json::from_str(&content)
            .map_err(|source| Error::MalformedSelection { path, source })?;
        Ok(Some(map))
    }

    /// Path the given session is persisted to
    pub fn path_for(&self, session: &SessionId) -> PathBuf {
        self.dir.join(session.file_name())
    }

    /// Write the full map for a session, replacing prior content
    ///
    /// Each call stages into its own hidden temp file in the same directory
    /// and renames it into place, so readers never see a partial file and
    /// concurrent writers never share a staging path. With overlapping
    /// writers the last rename wins; callers that need arrival order must
    /// serialize.
    pub fn save(&self, session: &SessionId, map: &ClassificationMap) -> Result<PathBuf> {
        let target = self.path_for(session);

        let json = serde_json::to_vec(map)?;
        let mut staging = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        staging.write_all(&json)?;
        staging
            .persist(&target)
            .map_err(|e| Error::Io(e.error))?;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SelectionStore) {
        let dir = TempDir::new().unwrap();
        let store = SelectionStore::new(dir.path().join(SELECTIONS_DIR));
        store.ensure_dir().unwrap();
        (dir, store)
    }

    fn session(id: &str) -> SessionId {
        SessionId::sanitize(id).unwrap()
    }

    #[test]
    fn test_missing_directory_has_no_prior_state() {
        let dir = TempDir::new().unwrap();
        let store = SelectionStore::new(dir.path().join("absent"));
        assert!(store.latest_file().unwrap().is_none());
        assert!(store.load_latest().unwrap().is_none());
    }

    #[test]
    fn test_save_writes_bare_map() {
        let (_dir, store) = store();
        let map: ClassificationMap = [("x.png", "2")].into_iter().collect();

        let path = store.save(&session("2024-01-01T00-00-00"), &map).unwrap();
        assert_eq!(path, store.dir().join("2024-01-01T00-00-00.json"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"x.png": "2"}));
    }

    #[test]
    fn test_save_overwrites_same_session() {
        let (_dir, store) = store();
        let id = session("s1");
        store
            .save(&id, &[("a.png", "1")].into_iter().collect())
            .unwrap();
        store
            .save(&id, &[("a.png", "2"), ("b.png", "1")].into_iter().collect())
            .unwrap();

        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded.get("a.png"), Some("2"));
        assert_eq!(loaded.len(), 2);

        // No staging files left behind
        let files: Vec<_> = fs::read_dir(store.dir()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_concurrent_saves_to_one_session_all_succeed() {
        let (_dir, store) = store();
        let id = session("2024-01-01T00-00-00-000Z");

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let store = store.clone();
                let id = id.clone();
                std::thread::spawn(move || {
                    let mut failures = 0;
                    for round in 0..200 {
                        let map: ClassificationMap = [(
                            format!("w{}.png", worker),
                            if round % 2 == 0 { "1" } else { "2" },
                        )]
                        .into_iter()
                        .collect();
                        if store.save(&id, &map).is_err() {
                            failures += 1;
                        }
                    }
                    failures
                })
            })
            .collect();

        let failures: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(failures, 0);

        // The file holds exactly one writer's complete map
        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);

        let names: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["2024-01-01T00-00-00-000Z.json".to_string()]);
    }

    #[test]
    fn test_latest_is_greatest_name_not_newest_write() {
        let (_dir, store) = store();
        store
            .save(&session("2024-01-02T00-00-00"), &[("a.png", "2")].into_iter().collect())
            .unwrap();
        store
            .save(&session("2024-01-01T00-00-00"), &[("a.png", "1")].into_iter().collect())
            .unwrap();

        let latest = store.latest_file().unwrap().unwrap();
        assert!(latest.ends_with("2024-01-02T00-00-00.json"));
        assert_eq!(store.load_latest().unwrap().unwrap().get("a.png"), Some("2"));
    }

    #[test]
    fn test_latest_ignores_other_files() {
        let (_dir, store) = store();
        store
            .save(&session("a"), &[("a.png", "1")].into_iter().collect())
            .unwrap();
        fs::write(store.dir().join("zzz.txt"), "not a selection").unwrap();
        fs::write(store.dir().join(".zzz.json"), "{").unwrap();
        fs::create_dir(store.dir().join("zzz.json")).unwrap();

        let latest = store.latest_file().unwrap().unwrap();
        assert!(latest.ends_with("a.json"));
    }

    #[test]
    fn test_malformed_latest_is_an_error() {
        let (_dir, store) = store();
        fs::write(store.dir().join("z.json"), "{not json").unwrap();

        let err = store.load_latest().unwrap_err();
        assert!(matches!(err, Error::MalformedSelection { .. }));
    }
}
