//! Log output and tick reporting.

use serde::{Deserialize, Serialize};

/// One line of the operations log. The log is an append-only notification
/// sink for an external presenter, newest first, bounded by `LOG_CAP`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Epoch milliseconds.
    pub at: u64,
    pub message: String,
}

/// What happened during one `advance` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub services_finished: u32,
    pub rests_finished: u32,
    pub missions_completed: u32,
    /// Queued services promoted into freed crew capacity.
    pub queue_starts: u32,
    /// True when any completion mutated state this tick. Callers should
    /// persist when set.
    pub dirty: bool,
    /// True when the periodic autosave boundary was crossed and no other
    /// change already forced a save.
    pub autosave: bool,
}

impl TickReport {
    pub fn changed(&self) -> bool {
        self.dirty || self.autosave
    }
}
