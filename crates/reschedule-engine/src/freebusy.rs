//! Derive a room's free spans from its booked sessions.
//!
//! Sorts the room's sessions for the date by start time, merges overlapping or
//! adjacent bookings, then returns the gaps inside the room's opening hours.
//! This mirrors what the room-availability service reports.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::session::{FreeSpan, Interval, Session};

/// Opening hours assumed when the caller supplies none.
pub const DEFAULT_OPEN: &str = "08:00";
pub const DEFAULT_CLOSE: &str = "20:00";

/// Merge the room's bookings on `date`, clipped to the opening window.
///
/// Returns a sorted, non-overlapping list of busy intervals.
fn merge_busy_periods(
    sessions: &[Session],
    room_id: &str,
    date: NaiveDate,
    window: Interval,
) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let mut intervals: Vec<(NaiveDateTime, NaiveDateTime)> = sessions
        .iter()
        .filter(|s| s.room_id == room_id && s.date == date)
        .map(Session::interval)
        .filter(|i| i.start < window.end && i.end > window.start)
        .map(|i| (i.start.max(window.start), i.end.min(window.end)))
        .collect();

    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(NaiveDateTime, NaiveDateTime)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Free spans of `room_id` on `date` between `open` and `close`.
///
/// Sessions in other rooms or on other dates are ignored. Returns spans in
/// chronological order; an empty or inverted opening window yields none.
pub fn free_spans(
    sessions: &[Session],
    room_id: &str,
    date: NaiveDate,
    open: NaiveTime,
    close: NaiveTime,
) -> Vec<FreeSpan> {
    if open >= close {
        return Vec::new();
    }
    let window = Interval::new(date.and_time(open), date.and_time(close));
    let merged = merge_busy_periods(sessions, room_id, date, window);

    let mut spans = Vec::new();
    let mut cursor = window.start;

    for (busy_start, busy_end) in &merged {
        if cursor < *busy_start {
            spans.push(FreeSpan {
                start: cursor.time(),
                end: busy_start.time(),
            });
        }
        cursor = cursor.max(*busy_end);
    }

    if cursor < window.end {
        spans.push(FreeSpan {
            start: cursor.time(),
            end: window.end.time(),
        });
    }

    spans
}
