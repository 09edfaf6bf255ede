// Flat-file record store
//
// Line format: `<name> <start_ts> <end_ts>\n`, one record per line, in
// index order. Appends go straight to the file; every other mutation is a
// whole-file rewrite through a temp file that is renamed over the target.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{LogWorkError, OpenMode, Result};
use crate::models::Record;

/// Record store backed by a single text file
///
/// Holds nothing but the path; every call reads or writes the whole file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records in the store; 0 when the file doesn't exist yet
    pub fn count_records(&self) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        Ok(self.load_all()?.len())
    }

    /// Load every record in file order
    ///
    /// Any malformed line fails the whole load. Blank lines are skipped.
    pub fn load_all(&self) -> Result<Vec<Record>> {
        let file = File::open(&self.path).map_err(|e| self.open_error(OpenMode::Read, e))?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|e| {
                if e.kind() == io::ErrorKind::InvalidData {
                    LogWorkError::Parse {
                        line: line_no,
                        reason: "line is not valid UTF-8".to_string(),
                    }
                } else {
                    self.open_error(OpenMode::Read, e)
                }
            })?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(parse_line(&line, line_no)?);
        }

        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Append one record, creating the file if needed
    pub fn append(&self, record: &Record) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.open_error(OpenMode::Append, e))?;

        let mut line = String::new();
        // Don't glue the new record onto a last line that lost its newline
        if !ends_with_newline(&mut file).map_err(|e| self.write_error(e))? {
            line.push('\n');
        }
        line.push_str(&record.to_line());

        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| self.write_error(e))?;

        debug!("Appended '{}' to {}", record.name, self.path.display());
        Ok(())
    }

    /// Replace the whole store with `records`, in order
    ///
    /// The new content is written and synced to a temp file next to the
    /// store, then renamed over it, so the store is never seen half-written.
    /// A symlinked store is rewritten at the link's target; the link stays.
    pub fn rewrite_all(&self, records: &[Record]) -> Result<()> {
        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| self.open_error(OpenMode::Write, e))?;

        if let Ok(meta) = fs::metadata(&target) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| self.write_error(e))?;
        }

        let content: String = records.iter().map(Record::to_line).collect();
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.flush())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.write_error(e))?;

        tmp.persist(&target).map_err(|e| self.write_error(e.error))?;

        debug!("Rewrote {} with {} records", self.path.display(), records.len());
        Ok(())
    }

    fn open_error(&self, mode: OpenMode, source: io::Error) -> LogWorkError {
        LogWorkError::StoreOpen {
            path: self.path.clone(),
            mode,
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> LogWorkError {
        LogWorkError::StoreWrite {
            path: self.path.clone(),
            source,
        }
    }
}

/// Parse one store line (`line_no` is 1-based, for error messages)
pub fn parse_line(line: &str, line_no: usize) -> Result<Record> {
    let parse_error = |reason: String| LogWorkError::Parse { line: line_no, reason };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [name, start, end] = tokens.as_slice() else {
        return Err(parse_error(format!("expected 3 fields, found {}", tokens.len())));
    };

    let start_ts: u32 = start
        .parse()
        .map_err(|_| parse_error(format!("invalid start timestamp '{}'", start)))?;
    let end_ts: u32 = end
        .parse()
        .map_err(|_| parse_error(format!("invalid end timestamp '{}'", end)))?;

    if start_ts == 0 {
        return Err(parse_error("start timestamp is 0".to_string()));
    }
    if end_ts != 0 && end_ts < start_ts {
        return Err(parse_error(format!(
            "end timestamp {} is before start timestamp {}",
            end_ts, start_ts
        )));
    }

    Ok(Record {
        name: name.to_string(),
        start_ts,
        end_ts,
    })
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
