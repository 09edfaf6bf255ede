// Start, stop, switch, change, remove and print
//
// Each operation is one load-mutate-persist cycle. Validation and lookups
// happen before anything is written, so a failed operation leaves the store
// untouched. The `*_at` forms take the current time explicitly.

use log::{debug, info, warn};

use crate::engine::outcome::{ChangeOutcome, IndexedRecord, Report, ReportEntry, SwitchOutcome};
use crate::error::{LogWorkError, Result};
use crate::models::Record;
use crate::store::RecordStore;
use crate::utils::{generate_name, now_ts, validate_task_name};

/// How `remove` picks its record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemoveTarget<'a> {
    Index(usize),
    Name(&'a str),
}

fn check_name(name: &str) -> Result<()> {
    validate_task_name(name).map_err(LogWorkError::InvalidArgument)
}

/// Start a new task, auto-naming it `Task-<ordinal>` when no name is given
pub fn start(store: &RecordStore, name: Option<&str>) -> Result<IndexedRecord> {
    start_at(store, name, now_ts()?)
}

pub fn start_at(store: &RecordStore, name: Option<&str>, now: u32) -> Result<IndexedRecord> {
    if let Some(name) = name {
        check_name(name)?;
    }
    if now == 0 {
        return Err(LogWorkError::Clock(0));
    }

    let index = store.count_records()?;
    let name = name.map_or_else(|| generate_name(index), str::to_string);
    let record = Record::new(name, now);
    store.append(&record)?;

    info!("Started task '{}' at index {}", record.name, index);
    Ok(IndexedRecord { index, record })
}

/// Close every open task, or every open task named `name`
///
/// Returns the closed records; an empty list means nothing was open and
/// the store was not rewritten.
pub fn stop(store: &RecordStore, name: Option<&str>) -> Result<Vec<IndexedRecord>> {
    stop_at(store, name, now_ts()?)
}

pub fn stop_at(store: &RecordStore, name: Option<&str>, now: u32) -> Result<Vec<IndexedRecord>> {
    let mut records = store.load_all()?;
    if records.is_empty() {
        return Err(LogWorkError::EmptyStore(store.path().to_path_buf()));
    }

    let mut stopped = Vec::new();
    for (index, record) in records.iter_mut().enumerate() {
        if record.is_open_matching(name) {
            // end_ts >= start_ts even if the clock went backwards
            record.end_ts = now.max(record.start_ts);
            stopped.push(IndexedRecord { index, record: record.clone() });
        }
    }

    if stopped.is_empty() {
        match name {
            Some(name) => warn!("No open task named '{}'", name),
            None => warn!("No open tasks"),
        }
        return Ok(stopped);
    }

    store.rewrite_all(&records)?;
    info!("Stopped {} task(s)", stopped.len());
    Ok(stopped)
}

/// Close every open task, then start a new one
pub fn switch(store: &RecordStore, name: Option<&str>) -> Result<SwitchOutcome> {
    switch_at(store, name, now_ts()?)
}

pub fn switch_at(store: &RecordStore, name: Option<&str>, now: u32) -> Result<SwitchOutcome> {
    if let Some(name) = name {
        check_name(name)?;
    }
    let stopped = stop_at(store, None, now)?;
    let started = start_at(store, name, now)?;
    Ok(SwitchOutcome { stopped, started })
}

/// Rename every record called `old_name` to `new_name`
pub fn change(store: &RecordStore, old_name: &str, new_name: &str) -> Result<ChangeOutcome> {
    if old_name.is_empty() {
        return Err(LogWorkError::InvalidArgument("Old task name cannot be empty".to_string()));
    }
    check_name(new_name)?;

    let mut records = store.load_all()?;
    let mut renamed = 0;
    for record in records.iter_mut().filter(|r| r.name == old_name) {
        record.name = new_name.to_string();
        renamed += 1;
    }

    if renamed == 0 {
        return Err(LogWorkError::NotFound(old_name.to_string()));
    }

    store.rewrite_all(&records)?;
    info!("Renamed {} record(s) from '{}' to '{}'", renamed, old_name, new_name);
    Ok(ChangeOutcome {
        old_name: old_name.to_string(),
        new_name: new_name.to_string(),
        renamed,
    })
}

/// Remove one record, by index or by the first record with that name
///
/// Exactly one of `name` and `index` must be given.
pub fn remove(store: &RecordStore, name: Option<&str>, index: Option<usize>) -> Result<IndexedRecord> {
    let target = match (name, index) {
        (None, Some(index)) => RemoveTarget::Index(index),
        (Some(name), None) => RemoveTarget::Name(name),
        (None, None) => {
            return Err(LogWorkError::InvalidArgument(
                "Either a task name or an index is required".to_string(),
            ))
        }
        (Some(_), Some(_)) => {
            return Err(LogWorkError::InvalidArgument(
                "Give either a task name or an index, not both".to_string(),
            ))
        }
    };

    let mut records = store.load_all()?;
    if records.is_empty() {
        return Err(LogWorkError::EmptyStore(store.path().to_path_buf()));
    }

    let position = match target {
        RemoveTarget::Index(index) if index < records.len() => index,
        RemoveTarget::Index(index) => {
            return Err(LogWorkError::Index { index, count: records.len() });
        }
        RemoveTarget::Name(name) => records
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| LogWorkError::NotFound(name.to_string()))?,
    };
    debug!("Removing record {} selected by {:?}", position, target);

    let record = records.remove(position);
    store.rewrite_all(&records)?;

    info!("Removed task '{}' at index {}", record.name, position);
    Ok(IndexedRecord { index: position, record })
}

/// Build a report over all records, or those named `name`
///
/// Running tasks are always listed with their live elapsed time. Done tasks
/// are listed unless `totals_only` is set; they count toward the total
/// either way. Never writes to the store.
pub fn print(store: &RecordStore, name: Option<&str>, totals_only: bool) -> Result<Report> {
    print_at(store, name, totals_only, now_ts()?)
}

pub fn print_at(store: &RecordStore, name: Option<&str>, totals_only: bool, now: u32) -> Result<Report> {
    let records = store.load_all()?;

    let mut entries = Vec::new();
    let mut total_secs = 0u64;
    for (index, record) in records.iter().enumerate() {
        if name.is_some_and(|n| n != record.name) {
            continue;
        }
        let duration_secs = record.elapsed_secs(now);
        total_secs += duration_secs;

        if record.is_open() || !totals_only {
            entries.push(ReportEntry {
                index,
                name: record.name.clone(),
                start_ts: record.start_ts,
                end_ts: (!record.is_open()).then_some(record.end_ts),
                duration_secs,
            });
        }
    }

    Ok(Report {
        name: name.map(str::to_string),
        entries,
        total_secs,
        generated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const T0: u32 = 1_700_000_000;

    fn setup() -> (TempDir, RecordStore) {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path().join("db.txt"));
        (dir, store)
    }

    fn seed(store: &RecordStore, lines: &str) {
        fs::write(store.path(), lines).unwrap();
    }

    fn names(store: &RecordStore) -> Vec<String> {
        store.load_all().unwrap().into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_start_appends_open_record() {
        let (_dir, store) = setup();

        let started = start_at(&store, Some("Write"), T0).unwrap();
        assert_eq!(started.index, 0);
        assert_eq!(started.record, Record::new("Write", T0));

        let records = store.load_all().unwrap();
        assert_eq!(records, vec![Record::new("Write", T0)]);
    }

    #[test]
    fn test_start_generates_names_from_record_count() {
        let (_dir, store) = setup();

        assert_eq!(start_at(&store, None, T0).unwrap().record.name, "Task-0");
        assert_eq!(start_at(&store, Some("Write"), T0).unwrap().index, 1);
        let third = start_at(&store, None, T0).unwrap();
        assert_eq!(third.index, 2);
        assert_eq!(third.record.name, "Task-2");
    }

    #[test]
    fn test_start_ordinal_ignores_blank_lines() {
        let (_dir, store) = setup();
        seed(&store, "A 100 200\n\n\n");

        let started = start_at(&store, None, T0).unwrap();
        assert_eq!(started.index, 1);
        assert_eq!(started.record.name, "Task-1");
    }

    #[test]
    fn test_start_allows_duplicate_open_names() {
        let (_dir, store) = setup();
        start_at(&store, Some("Write"), T0).unwrap();
        start_at(&store, Some("Write"), T0 + 1).unwrap();

        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(Record::is_open));
    }

    #[test]
    fn test_start_rejects_invalid_name() {
        let (_dir, store) = setup();
        let err = start_at(&store, Some("two words"), T0).unwrap_err();
        assert!(matches!(err, LogWorkError::InvalidArgument(_)));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_stop_by_name_closes_all_matching() {
        let (_dir, store) = setup();
        seed(&store, "A 100 0\nB 110 0\nA 120 0\nA 50 60\n");

        let stopped = stop_at(&store, Some("A"), 500).unwrap();
        let indexes: Vec<usize> = stopped.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![0, 2]);

        let records = store.load_all().unwrap();
        assert_eq!(records[0].end_ts, 500);
        assert!(records[1].is_open());
        assert_eq!(records[2].end_ts, 500);
        assert_eq!(records[3].end_ts, 60);
    }

    #[test]
    fn test_stop_without_name_closes_everything_open() {
        let (_dir, store) = setup();
        seed(&store, "A 100 0\nB 110 0\nC 50 60\n");

        let stopped = stop_at(&store, None, 500).unwrap();
        assert_eq!(stopped.len(), 2);
        assert!(store.load_all().unwrap().iter().all(|r| !r.is_open()));
    }

    #[test]
    fn test_stop_twice_is_noop() {
        let (_dir, store) = setup();
        start_at(&store, Some("Write"), T0).unwrap();

        assert_eq!(stop_at(&store, Some("Write"), T0 + 60).unwrap().len(), 1);
        let after_first = fs::read_to_string(store.path()).unwrap();

        assert!(stop_at(&store, Some("Write"), T0 + 120).unwrap().is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), after_first);
    }

    #[test]
    fn test_stop_never_ends_before_start() {
        let (_dir, store) = setup();
        seed(&store, "A 1000 0\n");

        let stopped = stop_at(&store, None, 900).unwrap();
        assert_eq!(stopped[0].record.end_ts, 1000);
    }

    #[test]
    fn test_stop_empty_store_fails() {
        let (_dir, store) = setup();
        seed(&store, "");
        assert!(matches!(stop_at(&store, None, T0), Err(LogWorkError::EmptyStore(_))));
    }

    #[test]
    fn test_stop_missing_store_fails() {
        let (_dir, store) = setup();
        assert!(matches!(stop_at(&store, None, T0), Err(LogWorkError::StoreOpen { .. })));
    }

    #[test]
    fn test_stop_malformed_store_is_untouched() {
        let (_dir, store) = setup();
        seed(&store, "A 100 0\nnot a record at all\n");

        assert!(matches!(stop_at(&store, None, T0), Err(LogWorkError::Parse { line: 2, .. })));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "A 100 0\nnot a record at all\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_stop_writes_through_symlinked_store() {
        let (dir, _) = setup();
        let real = dir.path().join("real.txt");
        let link = dir.path().join("link.txt");
        fs::write(&real, "A 100 0\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let store = RecordStore::new(&link);
        assert_eq!(stop_at(&store, None, 500).unwrap().len(), 1);

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "A 100 500\n");
    }

    #[test]
    fn test_switch_stops_then_starts() {
        let (_dir, store) = setup();
        seed(&store, "A 100 0\nB 110 0\n");

        let outcome = switch_at(&store, Some("C"), 500).unwrap();
        assert_eq!(outcome.stopped.len(), 2);
        assert_eq!(outcome.started.index, 2);
        assert_eq!(outcome.started.record, Record::new("C", 500));

        let records = store.load_all().unwrap();
        assert_eq!(records.iter().filter(|r| r.is_open()).count(), 1);
        assert!(records[2].is_open());
    }

    #[test]
    fn test_switch_auto_names() {
        let (_dir, store) = setup();
        seed(&store, "A 100 0\n");

        let outcome = switch_at(&store, None, 500).unwrap();
        assert_eq!(outcome.started.record.name, "Task-1");
    }

    #[test]
    fn test_switch_aborts_when_stop_fails() {
        let (_dir, store) = setup();
        assert!(switch_at(&store, Some("C"), 500).is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_switch_invalid_name_closes_nothing() {
        let (_dir, store) = setup();
        seed(&store, "A 100 0\n");

        assert!(matches!(switch_at(&store, Some(""), 500), Err(LogWorkError::InvalidArgument(_))));
        assert!(store.load_all().unwrap()[0].is_open());
    }

    #[test]
    fn test_change_renames_all_matches() {
        let (_dir, store) = setup();
        seed(&store, "A 100 200\nB 110 0\nA 300 0\n");

        let outcome = change(&store, "A", "B").unwrap();
        assert_eq!(outcome.renamed, 2);

        let records = store.load_all().unwrap();
        assert_eq!(
            records,
            vec![
                Record { name: "B".to_string(), start_ts: 100, end_ts: 200 },
                Record { name: "B".to_string(), start_ts: 110, end_ts: 0 },
                Record { name: "B".to_string(), start_ts: 300, end_ts: 0 },
            ]
        );
    }

    #[test]
    fn test_change_missing_name_is_not_found() {
        let (_dir, store) = setup();
        seed(&store, "A 100 200\n");

        let err = change(&store, "Z", "B").unwrap_err();
        assert!(err.is_informational());
        assert_eq!(names(&store), vec!["A"]);
    }

    #[test]
    fn test_change_rejects_invalid_new_name() {
        let (_dir, store) = setup();
        seed(&store, "A 100 200\n");

        assert!(matches!(change(&store, "A", "has space"), Err(LogWorkError::InvalidArgument(_))));
        assert!(matches!(change(&store, "", "B"), Err(LogWorkError::InvalidArgument(_))));
        assert_eq!(names(&store), vec!["A"]);
    }

    #[test]
    fn test_remove_by_index() {
        let (_dir, store) = setup();
        seed(&store, "A 1 2\nB 3 4\nC 5 6\nD 7 8\nE 9 10\n");

        let removed = remove(&store, None, Some(2)).unwrap();
        assert_eq!(removed.index, 2);
        assert_eq!(removed.record.name, "C");
        assert_eq!(names(&store), vec!["A", "B", "D", "E"]);
    }

    #[test]
    fn test_remove_by_name_takes_first_match() {
        let (_dir, store) = setup();
        seed(&store, "A 1 2\nB 3 4\nA 5 6\n");

        let removed = remove(&store, Some("A"), None).unwrap();
        assert_eq!(removed.index, 0);

        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], Record { name: "A".to_string(), start_ts: 5, end_ts: 6 });
    }

    #[test]
    fn test_remove_index_out_of_range_leaves_store() {
        let (_dir, store) = setup();
        seed(&store, "A 1 2\nB 3 4\nC 5 6\n");

        let err = remove(&store, None, Some(99)).unwrap_err();
        assert!(matches!(err, LogWorkError::Index { index: 99, count: 3 }));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "A 1 2\nB 3 4\nC 5 6\n");
    }

    #[test]
    fn test_remove_selector_errors() {
        let (_dir, store) = setup();
        seed(&store, "A 1 2\n");

        assert!(matches!(remove(&store, None, None), Err(LogWorkError::InvalidArgument(_))));
        assert!(matches!(remove(&store, Some("A"), Some(0)), Err(LogWorkError::InvalidArgument(_))));
        assert!(matches!(remove(&store, Some("Z"), None), Err(LogWorkError::NotFound(_))));
        assert_eq!(names(&store), vec!["A"]);
    }

    #[test]
    fn test_remove_from_empty_store() {
        let (_dir, store) = setup();
        seed(&store, "");
        assert!(matches!(remove(&store, None, Some(0)), Err(LogWorkError::EmptyStore(_))));
    }

    #[test]
    fn test_print_filters_and_totals() {
        let (_dir, store) = setup();
        seed(&store, "Write 1000 1600\nRead 1100 1200\nWrite 2000 0\n");

        let report = print_at(&store, Some("Write"), false, 2300).unwrap();
        assert_eq!(report.name.as_deref(), Some("Write"));
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].index, 0);
        assert_eq!(report.entries[0].duration_secs, 600);
        assert!(report.entries[0].is_done());
        // Running task: index is the file position, duration is live
        assert_eq!(report.entries[1].index, 2);
        assert_eq!(report.entries[1].end_ts, None);
        assert_eq!(report.entries[1].duration_secs, 300);
        assert_eq!(report.total_secs, 900);
    }

    #[test]
    fn test_print_totals_only_hides_done_entries() {
        let (_dir, store) = setup();
        seed(&store, "Write 1000 1600\nWrite 2000 0\n");

        let report = print_at(&store, Some("Write"), true, 2300).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert!(!report.entries[0].is_done());
        assert_eq!(report.total_secs, 900);
    }

    #[test]
    fn test_print_is_read_only() {
        let (_dir, store) = setup();
        seed(&store, "A 1000 0\n");

        let report = print_at(&store, None, false, 5000).unwrap();
        assert_eq!(report.entries[0].duration_secs, 4000);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "A 1000 0\n");
    }

    #[test]
    fn test_start_stop_print_scenario() {
        let (_dir, store) = setup();

        start_at(&store, Some("Write"), T0).unwrap();
        stop_at(&store, Some("Write"), T0 + 3661).unwrap();
        assert_eq!(store.load_all().unwrap(), vec![Record { name: "Write".to_string(), start_ts: T0, end_ts: T0 + 3661 }]);

        let report = print_at(&store, Some("Write"), false, T0 + 9999).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].duration_secs, 3661);
        assert_eq!(report.total_secs, 3661);
    }
}
