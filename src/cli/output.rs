// Output formatting utilities

use std::io::IsTerminal;

use crate::engine::{ChangeOutcome, IndexedRecord, Report, ReportEntry};
use crate::error::Result;
use crate::utils::{format_duration, format_timestamp};

// ANSI escape codes for terminal formatting
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_RED: &str = "\x1b[31m";

/// Color status words only when writing to a terminal and NO_COLOR is unset
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn paint(word: &str, ansi: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", ansi, word, ANSI_RESET)
    } else {
        word.to_string()
    }
}

pub fn format_started(task: &IndexedRecord, color: bool) -> Result<String> {
    Ok(format!(
        "Task[{}]: {} {} at {}",
        task.index,
        task.record.name,
        paint("STARTED", ANSI_FG_GREEN, color),
        format_timestamp(task.record.start_ts)?
    ))
}

pub fn format_stopped(task: &IndexedRecord, color: bool) -> Result<String> {
    Ok(format!(
        "Task[{}]: {} {} from {} to {} = [{}]",
        task.index,
        paint("STOPPED", ANSI_FG_GREEN, color),
        task.record.name,
        format_timestamp(task.record.start_ts)?,
        format_timestamp(task.record.end_ts)?,
        format_duration(task.record.duration_secs().unwrap_or(0))
    ))
}

pub fn format_switched(task: &IndexedRecord, color: bool) -> String {
    format!(
        "Task[{}]: {} to {}",
        task.index,
        paint("SWITCHED", ANSI_FG_GREEN, color),
        task.record.name
    )
}

pub fn format_changed(outcome: &ChangeOutcome) -> String {
    format!(
        "Renamed {} record(s) from {} to {}",
        outcome.renamed, outcome.old_name, outcome.new_name
    )
}

pub fn format_removed(task: &IndexedRecord, color: bool) -> String {
    format!(
        "Task[{}]: {} {}",
        task.index,
        paint("REMOVED", ANSI_FG_RED, color),
        task.record.name
    )
}

fn format_entry(entry: &ReportEntry, color: bool) -> Result<String> {
    let start = format_timestamp(entry.start_ts)?;
    let duration = format_duration(entry.duration_secs);
    match entry.end_ts {
        None => Ok(format!(
            "Task[{}]: {} {} since {} = [{}]",
            entry.index,
            paint("NOT-DONE", ANSI_FG_RED, color),
            entry.name,
            start,
            duration
        )),
        Some(end_ts) => Ok(format!(
            "Task[{}]: {} {} from {} to {} = [{}]",
            entry.index,
            paint("DONE", ANSI_FG_GREEN, color),
            entry.name,
            start,
            format_timestamp(end_ts)?,
            duration
        )),
    }
}

/// Render a report as text lines; the total line appears only for a named report
pub fn format_report(report: &Report, color: bool) -> Result<Vec<String>> {
    let mut lines = report
        .entries
        .iter()
        .map(|entry| format_entry(entry, color))
        .collect::<Result<Vec<_>>>()?;

    if let Some(name) = &report.name {
        lines.push(format!(
            "{} for {} = [{}]",
            paint("TotalDuration", ANSI_FG_GREEN, color),
            name,
            format_duration(report.total_secs)
        ));
    }
    Ok(lines)
}

pub fn format_report_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
