//! Punch-source boundary and file-backed dump reading.
//!
//! The live device protocol client is an external collaborator; this module
//! defines the seam it plugs into ([`PunchSource`]) and a file-backed
//! implementation over device dump files for offline use and testing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::event::RawPunchEvent;
use crate::normalize::UserDirectory;

/// Buffer size for `BufReader` (64KB, dump files can hold months of punches).
const BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The transport boundary: anything that can yield a full punch dump and the
/// device's user directory.
///
/// One-shot full dumps only; no incremental or paginated contract is assumed.
pub trait PunchSource {
    fn list_raw_events(&self) -> Result<Vec<RawPunchEvent>, SourceError>;
    fn list_users(&self) -> Result<UserDirectory, SourceError>;
}

/// File-backed punch source: a JSONL dump file (or a directory of them)
/// plus an optional JSON user-directory file.
#[derive(Debug, Clone)]
pub struct DumpSource {
    events_path: PathBuf,
    users_path: Option<PathBuf>,
}

impl DumpSource {
    #[must_use]
    pub fn new(events_path: impl Into<PathBuf>, users_path: Option<PathBuf>) -> Self {
        Self {
            events_path: events_path.into(),
            users_path,
        }
    }
}

impl PunchSource for DumpSource {
    fn list_raw_events(&self) -> Result<Vec<RawPunchEvent>, SourceError> {
        if self.events_path.is_dir() {
            scan_dump_dir(&self.events_path)
        } else {
            parse_dump_file(&self.events_path)
        }
    }

    fn list_users(&self) -> Result<UserDirectory, SourceError> {
        let Some(path) = self.users_path.as_deref() else {
            return Ok(UserDirectory::new());
        };
        if !path.exists() {
            tracing::debug!(path = ?path, "no users file, all names will be unresolved");
            return Ok(UserDirectory::new());
        }
        let file = File::open(path)?;
        let directory: UserDirectory = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!(users = directory.len(), "loaded user directory");
        Ok(directory)
    }
}

/// Parses one JSONL dump file, one punch event per line.
///
/// Malformed lines are skipped with a warning rather than failing the whole
/// dump; devices truncate lines when their storage fills up.
pub fn parse_dump_file(path: &Path) -> Result<Vec<RawPunchEvent>, SourceError> {
    let file = File::open(path)?;
    let reader = BufReader::with_capacity(BUFFER_SIZE, file);

    let mut events = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<RawPunchEvent>(&line) {
            Ok(event) => events.push(event),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed dump line");
            }
        }
    }
    Ok(events)
}

/// Scans a directory of `.jsonl` dump files and concatenates their events.
///
/// Files are parsed in parallel; a file that cannot be read is skipped with
/// a warning instead of failing the scan.
fn scan_dump_dir(dir: &Path) -> Result<Vec<RawPunchEvent>, SourceError> {
    let mut dump_files: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "jsonl") {
            dump_files.push(path);
        }
    }

    let events: Vec<RawPunchEvent> = dump_files
        .par_iter()
        .filter_map(|path| match parse_dump_file(path) {
            Ok(events) => Some(events),
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "skipping unreadable dump file");
                None
            }
        })
        .flatten()
        .collect();

    tracing::debug!(
        files = dump_files.len(),
        events = events.len(),
        "scanned dump directory"
    );
    Ok(events)
}
