//! Events command: dump the normalized punch stream as JSON lines.
//!
//! The diagnostic channel for punches that never become sessions (unknown
//! codes, orphan check-outs).

use anyhow::{Context, Result};
use chrono::NaiveDate;

use attlog_core::{PunchSource, normalize};

pub fn run<S: PunchSource>(
    source: &S,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    let raw = source
        .list_raw_events()
        .context("failed to read punch events")?;
    let directory = source.list_users().context("failed to read user directory")?;

    let range = super::full_day_range(start, end);
    let events = normalize(&raw, &directory, range)?;

    for event in &events {
        println!("{}", serde_json::to_string(event)?);
    }
    tracing::debug!(count = events.len(), "dumped normalized events");
    Ok(())
}
