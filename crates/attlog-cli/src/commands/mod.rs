//! Subcommand implementations.

pub mod events;
pub mod report;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Widens an optional calendar-date pair to full-day instant bounds.
///
/// A range is applied only when both ends are given; the core's inclusive
/// filter then spans `start 00:00:00` through `end 23:59:59.999999`.
#[must_use]
pub fn full_day_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    match (start, end) {
        (Some(start), Some(end)) => Some((start.and_time(day_start()), end.and_time(day_end()))),
        (None, None) => None,
        _ => {
            tracing::warn!("ignoring date filter: both --start and --end are required");
            None
        }
    }
}

fn day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).unwrap()
}

fn day_end() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap()
}
