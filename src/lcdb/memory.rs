use anyhow::Result;

use std::collections::HashMap;

use crate::{lcdb::SnapshotStore, models::SubmissionId};

/// Snapshot that lives only in memory. Counts writes so callers can tell
/// whether anything would have been persisted.
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshot {
    entries: HashMap<String, SubmissionId>,
    writes: usize,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn entries(&self) -> &HashMap<String, SubmissionId> {
        &self.entries
    }
}

impl FromIterator<(String, SubmissionId)> for MemorySnapshot {
    fn from_iter<I: IntoIterator<Item = (String, SubmissionId)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect(), writes: 0 }
    }
}

impl SnapshotStore for MemorySnapshot {
    fn get(&self, username: &str) -> Option<&SubmissionId> {
        self.entries.get(username)
    }

    fn set_and_persist(&mut self, username: &str, id: SubmissionId) -> Result<()> {
        self.entries.insert(username.to_string(), id);
        self.writes += 1;
        Ok(())
    }
}
