//! Last-seen bookkeeping for the tracker.
//!
//! The snapshot maps each username to the identifier of the last submission
//! that was announced for them. It is loaded once at startup and written back
//! after every change. Nothing coordinates two processes sharing one file:
//! run a single tracker per snapshot path, the last writer wins.
use anyhow::Result;

use crate::models::SubmissionId;

mod lastseen;
mod memory;

pub use lastseen::LastSeen;
pub use memory::MemorySnapshot;

pub trait SnapshotStore {
    /// The last announced submission for `username`, if any.
    fn get(&self, username: &str) -> Option<&SubmissionId>;

    /// Records `id` for `username` and makes it durable before returning.
    fn set_and_persist(&mut self, username: &str, id: SubmissionId) -> Result<()>;
}
