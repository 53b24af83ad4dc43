use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{HistoryEntry, HistoryError, HistoryStore};

/// History kept as a single JSON array on disk.
///
/// The file is created on the first append; until then reads return an empty history.
/// Appends rewrite a sibling temp file and rename it over the history file.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    fn persist(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_vec_pretty(entries)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn append(&self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>, HistoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| HistoryError::Unavailable("history file lock poisoned".to_string()))?;

        let mut entries = self.load()?;
        entries.push(entry);
        self.persist(&entries)?;
        Ok(entries)
    }

    fn read_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::tests::common::{entry_with_scores, sample_answers};

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileHistoryStore::new(dir.path().join("history.json"));

        assert!(store.read_all().expect("reads").is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn append_creates_parent_directories_and_persists() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("history.json");
        let store = JsonFileHistoryStore::new(&path);

        let first = entry_with_scores(1, 4, [4, 3, 3, 4]);
        let second = entry_with_scores(2, 7, [8, 6, 7, 6]);
        store.append(first.clone()).expect("first append");
        let updated = store.append(second.clone()).expect("second append");

        assert_eq!(updated, vec![first.clone(), second.clone()]);
        let reopened = JsonFileHistoryStore::new(&path);
        assert_eq!(reopened.read_all().expect("reads"), vec![first, second]);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").expect("write");
        let store = JsonFileHistoryStore::new(&path);

        assert!(matches!(store.read_all(), Err(HistoryError::Corrupt(_))));
    }

    #[test]
    fn reads_entries_without_scores_block() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("history.json");
        let mut value = serde_json::to_value(vec![entry_with_scores(1, 6, [5, 5, 5, 5])])
            .expect("serializes");
        value[0]
            .as_object_mut()
            .expect("entry object")
            .remove("scores");
        value[0]["formData"] = serde_json::to_value(sample_answers()).expect("answers");
        fs::write(&path, value.to_string()).expect("write");

        let entries = JsonFileHistoryStore::new(&path).read_all().expect("reads");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].scores.overall_or_default(), 5);
    }
}
