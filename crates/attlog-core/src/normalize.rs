//! Event normalization: range filtering, name resolution, punch classification.
//!
//! A pure filter + map over the raw event stream. No sorting and no
//! deduplication happen here; ordering policy belongs to the reconstructor.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{NormalizedEvent, PunchKind, RawPunchEvent};
use crate::types::UserId;

/// Display name used when the directory has no entry for a user ID.
pub const UNKNOWN_USER: &str = "Unknown";

/// Errors from range validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// The range start is after its end.
    #[error("invalid range: start {start} is after end {end}")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Mapping from enrollment ID to display name, as loaded from the device.
///
/// A missing entry is not an error; lookups degrade to [`UNKNOWN_USER`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory(HashMap<UserId, String>);

impl UserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, user_id: UserId, name: impl Into<String>) {
        self.0.insert(user_id, name.into());
    }

    /// Resolves an ID to a display name, falling back to [`UNKNOWN_USER`].
    #[must_use]
    pub fn resolve(&self, user_id: &UserId) -> &str {
        self.0.get(user_id).map_or(UNKNOWN_USER, String::as_str)
    }
}

impl FromIterator<(UserId, String)> for UserDirectory {
    fn from_iter<I: IntoIterator<Item = (UserId, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Filters raw punches to an inclusive range and classifies each one.
///
/// An event survives iff `start <= timestamp <= end` (inclusive both ends).
/// Callers widen calendar-date ranges to full-day bounds before calling.
/// Input order is preserved; an empty result is not an error.
///
/// # Errors
///
/// Returns [`RangeError::Inverted`] iff the range start is after its end.
pub fn normalize(
    raw_events: &[RawPunchEvent],
    directory: &UserDirectory,
    range: Option<(NaiveDateTime, NaiveDateTime)>,
) -> Result<Vec<NormalizedEvent>, RangeError> {
    if let Some((start, end)) = range {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
    }

    let events: Vec<NormalizedEvent> = raw_events
        .iter()
        .filter(|event| range.is_none_or(|(start, end)| start <= event.timestamp && event.timestamp <= end))
        .map(|event| NormalizedEvent {
            user_id: event.user_id.clone(),
            user_name: directory.resolve(&event.user_id).to_string(),
            timestamp: event.timestamp,
            kind: PunchKind::from_code(event.punch),
        })
        .collect();

    tracing::debug!(
        raw = raw_events.len(),
        surviving = events.len(),
        "normalized punch events"
    );
    Ok(events)
}
