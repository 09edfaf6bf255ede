use serde::Serialize;
use crate::models::Record;

/// A record together with its position in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedRecord {
    pub index: usize,
    #[serde(flatten)]
    pub record: Record,
}

/// Result of `switch`: everything stopped, then the new task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub stopped: Vec<IndexedRecord>,
    pub started: IndexedRecord,
}

/// Result of `change`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeOutcome {
    pub old_name: String,
    pub new_name: String,
    pub renamed: usize,
}

/// One line of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub index: usize,
    pub name: String,
    pub start_ts: u32,
    /// `None` while the task is still running
    pub end_ts: Option<u32>,
    /// Closed duration, or elapsed time so far for a running task
    pub duration_secs: u64,
}

impl ReportEntry {
    pub fn is_done(&self) -> bool {
        self.end_ts.is_some()
    }
}

/// Result of `print`
///
/// `entries` holds what should be displayed; `total_secs` covers every
/// record that matched the filter, including done records hidden by
/// `totals_only`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub name: Option<String>,
    pub entries: Vec<ReportEntry>,
    pub total_secs: u64,
    pub generated_at: u32,
}
