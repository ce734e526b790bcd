use anyhow::{Context, Result};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{lcdb::SnapshotStore, models::SubmissionId};

/////*============== JSON SNAPSHOT FILE ==============*/
/// Snapshot backed by a single pretty-printed JSON object on disk.
#[derive(Debug)]
pub struct LastSeen {
    path: PathBuf,
    entries: BTreeMap<String, SubmissionId>,
}

impl LastSeen {
    /// Loads the snapshot at `path`. A missing file is an empty snapshot;
    /// an unreadable or malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            log::debug!("[LastSeen::load] No snapshot at {}, starting empty.", path.display());
            return Ok(Self { path, entries: BTreeMap::new() });
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Could not read snapshot {}", path.display()))?;
        let entries = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed snapshot {}", path.display()))?;

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.entries)
            .context("Could not serialize snapshot.")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Could not write snapshot {}", self.path.display()))
    }
}

impl SnapshotStore for LastSeen {
    fn get(&self, username: &str) -> Option<&SubmissionId> {
        self.entries.get(username)
    }

    fn set_and_persist(&mut self, username: &str, id: SubmissionId) -> Result<()> {
        log::trace!("[LastSeen::set_and_persist] {username} -> {id}");
        self.entries.insert(username.to_string(), id);
        self.save()
    }
}
