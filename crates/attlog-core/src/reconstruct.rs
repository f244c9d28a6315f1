//! Session reconstruction from normalized punch events.
//!
//! # Algorithm summary
//!
//! 1. Sort events by `(user_id, timestamp)` so each user's punches are
//!    contiguous and chronological regardless of arrival order.
//! 2. Stream through the sorted events with a single open accumulator keyed
//!    by `(user_id, calendar date)`.
//! 3. On a key change, emit the open run as a record iff it saw a check-in,
//!    then reopen under the new key. Flush the same way at end of stream.
//! 4. Within a run the last check-in and last check-out win; unknown punches
//!    are never accumulated.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::{NormalizedEvent, PunchKind, RawPunchEvent};
use crate::normalize::{self, RangeError, UserDirectory};
use crate::types::UserId;

/// One user's reconstructed attendance for one calendar date.
///
/// At most one record exists per `(user_id, date)` pair, and every record has
/// a check-in; a run with no check-in (orphan check-out, unknown punches
/// only) emits nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: UserId,
    pub user_name: String,
    pub date: NaiveDate,
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
    /// `check_out - check_in` in fractional hours. Present iff both
    /// endpoints are. Negative when the check-out precedes the check-in;
    /// implausible values are reported as-is, not clamped.
    pub duration_hours: Option<f64>,
}

/// The single in-flight accumulator: one open `(user, date)` run.
#[derive(Debug)]
struct OpenRun {
    user_id: UserId,
    user_name: String,
    date: NaiveDate,
    check_in: Option<NaiveDateTime>,
    check_out: Option<NaiveDateTime>,
}

impl OpenRun {
    /// Opens a fresh run keyed by the event's user and calendar date.
    fn open(event: &NormalizedEvent) -> Self {
        Self {
            user_id: event.user_id.clone(),
            user_name: event.user_name.clone(),
            date: event.timestamp.date(),
            check_in: None,
            check_out: None,
        }
    }

    fn key_matches(&self, event: &NormalizedEvent) -> bool {
        self.user_id == event.user_id && self.date == event.timestamp.date()
    }

    /// Folds one event into the run. Last write wins; unknown punches are
    /// ignored.
    fn absorb(&mut self, event: &NormalizedEvent) {
        match event.kind {
            PunchKind::CheckIn => self.check_in = Some(event.timestamp),
            PunchKind::CheckOut => self.check_out = Some(event.timestamp),
            PunchKind::Unknown(_) => {}
        }
    }

    /// Closes the run, emitting a record only when a check-in was seen.
    fn close(self) -> Option<SessionRecord> {
        let check_in = self.check_in?;
        let duration_hours = self
            .check_out
            .map(|check_out| duration_hours(check_in, check_out));
        Some(SessionRecord {
            user_id: self.user_id,
            user_name: self.user_name,
            date: self.date,
            check_in: Some(check_in),
            check_out: self.check_out,
            duration_hours,
        })
    }
}

/// Raw elapsed time between two punches in fractional hours.
#[expect(
    clippy::cast_precision_loss,
    reason = "punch timestamps are far below f64 mantissa limits"
)]
fn duration_hours(check_in: NaiveDateTime, check_out: NaiveDateTime) -> f64 {
    let elapsed = check_out - check_in;
    elapsed.num_microseconds().map_or_else(
        || elapsed.num_milliseconds() as f64 / 3_600_000.0,
        |us| us as f64 / 3_600_000_000.0,
    )
}

/// Partitions normalized events into per-`(user, date)` runs and folds each
/// run into at most one [`SessionRecord`].
///
/// Input order is irrelevant; the explicit sort makes reconstruction
/// deterministic over any permutation of the same event multiset. Empty
/// input yields empty output, never an error.
#[must_use]
pub fn reconstruct(mut events: Vec<NormalizedEvent>) -> Vec<SessionRecord> {
    events.sort_by(|a, b| {
        a.user_id
            .cmp(&b.user_id)
            .then(a.timestamp.cmp(&b.timestamp))
    });

    let mut records = Vec::new();
    let mut open: Option<OpenRun> = None;

    for event in &events {
        match open {
            Some(ref mut run) if run.key_matches(event) => run.absorb(event),
            _ => {
                if let Some(run) = open.take() {
                    records.extend(run.close());
                }
                let mut run = OpenRun::open(event);
                run.absorb(event);
                open = Some(run);
            }
        }
    }
    if let Some(run) = open {
        records.extend(run.close());
    }

    tracing::debug!(
        events = events.len(),
        sessions = records.len(),
        "reconstructed attendance sessions"
    );
    records
}

/// Full pipeline: normalize raw punches, then reconstruct sessions.
///
/// The sole combined entry point for display and export callers.
///
/// # Errors
///
/// Returns [`RangeError::Inverted`] iff `range` has its start after its end.
pub fn reconstruct_sessions(
    raw_events: &[RawPunchEvent],
    directory: &UserDirectory,
    range: Option<(NaiveDateTime, NaiveDateTime)>,
) -> Result<Vec<SessionRecord>, RangeError> {
    let events = normalize::normalize(raw_events, directory, range)?;
    Ok(reconstruct(events))
}
