use std::sync::{Arc, Mutex};

use super::{HistoryEntry, HistoryError, HistoryStore};

#[derive(Debug, Default, Clone)]
pub struct InMemoryHistoryStore {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl InMemoryHistoryStore {
    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| HistoryError::Unavailable("history mutex poisoned".to_string()))?;
        guard.push(entry);
        Ok(guard.clone())
    }

    fn read_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| HistoryError::Unavailable("history mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }
}
