//! Interval math over session times.
//!
//! Intervals are compared as absolute wall-clock points on a calendar date.
//! Containment in a free span is closed (touching the span's edges fits);
//! overlap between sessions is open (back-to-back sessions do not conflict).

use chrono::NaiveDate;

use crate::error::Result;
use crate::session::{Interval, Session};
use crate::time::to_absolute;

/// Minutes from `start` to `end` on `date`, either value in either format.
///
/// The result is signed and never clamped: zero or negative means the caller
/// passed `end <= start` and should reject it.
///
/// # Errors
/// Returns `RescheduleError::InvalidTime` if either value is unparseable.
pub fn duration_minutes(start: &str, end: &str, date: NaiveDate) -> Result<i64> {
    let interval = Interval::new(to_absolute(date, start)?, to_absolute(date, end)?);
    Ok(interval.duration_minutes())
}

/// True iff the candidate lies entirely within the span on `date`.
///
/// Boundary equality counts as fitting.
///
/// # Errors
/// Returns `RescheduleError::InvalidTime` if any value is unparseable.
pub fn fits_within(
    candidate_start: &str,
    candidate_end: &str,
    span_start: &str,
    span_end: &str,
    date: NaiveDate,
) -> Result<bool> {
    let candidate = Interval::new(
        to_absolute(date, candidate_start)?,
        to_absolute(date, candidate_end)?,
    );
    let span = Interval::new(to_absolute(date, span_start)?, to_absolute(date, span_end)?);
    Ok(candidate.is_within(&span))
}

/// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
///
/// Adjacent intervals where one ends exactly when the other starts do NOT overlap.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.start < b.end && b.start < a.end
}

/// The first session in `existing` that blocks `candidate`: same room, same
/// date, overlapping, and not the session identified by `exclude_id`.
pub fn first_conflict<'a>(
    candidate: &Session,
    existing: &'a [Session],
    exclude_id: Option<&str>,
) -> Option<&'a Session> {
    let interval = candidate.interval();
    existing.iter().find(|other| {
        exclude_id != Some(other.id.as_str())
            && candidate.shares_slot_with(other)
            && overlaps(&interval, &other.interval())
    })
}

/// True iff `candidate` overlaps any other session booked in its room on its date.
///
/// The session being moved passes its own id as `exclude_id` so it never
/// conflicts with its old placement.
pub fn conflicts_with_any(
    candidate: &Session,
    existing: &[Session],
    exclude_id: Option<&str>,
) -> bool {
    first_conflict(candidate, existing, exclude_id).is_some()
}
