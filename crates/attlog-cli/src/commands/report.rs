//! Report command: reconstruct sessions and render them.
//!
//! Absent optional instants render as an explicit `N/A` marker, never as an
//! empty or zero timestamp; durations render with two-decimal precision.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use attlog_core::{PunchSource, SessionRecord, reconstruct_sessions};

/// Runs the full pipeline over the given source and prints the result.
pub fn run<S: PunchSource>(
    source: &S,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let raw = source
        .list_raw_events()
        .context("failed to read punch events")?;
    let directory = source.list_users().context("failed to read user directory")?;

    let range = super::full_day_range(start, end);
    let records = reconstruct_sessions(&raw, &directory, range)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", render_table(&records));
    }
    Ok(())
}

/// Renders session records as a fixed-width table.
pub fn render_table(records: &[SessionRecord]) -> String {
    if records.is_empty() {
        return "No attendance sessions.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<20} {:<10} {:<19} {:<19} {:>6}",
        "User ID", "Name", "Date", "Check In", "Check Out", "Hours"
    );
    let _ = writeln!(out, "{}", "-".repeat(87));
    for record in records {
        let _ = writeln!(
            out,
            "{:<8} {:<20} {:<10} {:<19} {:<19} {:>6}",
            record.user_id,
            record.user_name,
            record.date,
            format_instant(record.check_in),
            format_instant(record.check_out),
            format_hours(record.duration_hours),
        );
    }
    out
}

/// Formats an optional instant, marking absence explicitly.
fn format_instant(instant: Option<NaiveDateTime>) -> String {
    instant.map_or_else(
        || "N/A".to_string(),
        |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Formats an optional duration with two-decimal fixed precision.
fn format_hours(hours: Option<f64>) -> String {
    hours.map_or_else(|| "N/A".to_string(), |h| format!("{h:.2}"))
}
