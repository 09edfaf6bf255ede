use serde::{Deserialize, Serialize};

/// End timestamp value marking a task that is still running
pub const OPEN_END_TS: u32 = 0;

/// One persisted task entry
///
/// Stored as a single `<name> <start_ts> <end_ts>` line. The position of
/// the line in the file is the record's index; it is not a stored field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub start_ts: u32,
    pub end_ts: u32,
}

impl Record {
    /// Create a new open record starting at `start_ts`
    pub fn new(name: impl Into<String>, start_ts: u32) -> Self {
        Self {
            name: name.into(),
            start_ts,
            end_ts: OPEN_END_TS,
        }
    }

    /// Check if the task is still running
    pub fn is_open(&self) -> bool {
        self.end_ts == OPEN_END_TS
    }

    /// Open and, when a name is given, named exactly `name`
    pub fn is_open_matching(&self, name: Option<&str>) -> bool {
        self.is_open() && name.map_or(true, |n| n == self.name)
    }

    /// Closed duration in seconds, `None` while open
    pub fn duration_secs(&self) -> Option<u64> {
        if self.is_open() {
            None
        } else {
            Some(u64::from(self.end_ts.saturating_sub(self.start_ts)))
        }
    }

    /// Duration as of `now`: the closed duration, or live elapsed time while open
    pub fn elapsed_secs(&self, now: u32) -> u64 {
        self.duration_secs()
            .unwrap_or_else(|| u64::from(now.saturating_sub(self.start_ts)))
    }

    /// Render the store line, including the trailing newline
    pub fn to_line(&self) -> String {
        format!("{} {} {}\n", self.name, self.start_ts, self.end_ts)
    }
}
