//! Compatibility evaluator -- can a session keep its duration at a new date/room?
//!
//! The room's free spans and its booked sessions are fetched by the caller and
//! passed in as plain slices. A "no" answer is an ordinary result, not an error:
//! [`Incompatibility`] says whether to offer another room or another time.

use chrono::{Duration, NaiveTime};
use tracing::debug;

use crate::error::{RescheduleError, Result};
use crate::interval::{conflicts_with_any, first_conflict};
use crate::session::{FreeSpan, RescheduleTarget, Session};

/// Why a session cannot be moved as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incompatibility {
    /// No free span on the target date contains the session at its current times.
    NoFreeSpan,
    /// A span fits, but another booked session overlaps the placement.
    Conflict { session_id: String },
}

impl Incompatibility {
    /// Wire label: `"noFreeSpan"` or `"conflict"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Incompatibility::NoFreeSpan => "noFreeSpan",
            Incompatibility::Conflict { .. } => "conflict",
        }
    }

    /// Message the UI shows for this outcome.
    pub fn guidance(&self) -> &'static str {
        match self {
            Incompatibility::NoFreeSpan => {
                "No free time in this room can hold the session at its current time. Try a different room."
            }
            Incompatibility::Conflict { .. } => {
                "Another session is booked at this time. Pick a different time."
            }
        }
    }
}

/// Outcome of [`can_keep_duration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compatibility {
    /// The session fits `span` unchanged; `candidate` is the moved session.
    Keep { span: FreeSpan, candidate: Session },
    Incompatible(Incompatibility),
}

impl Compatibility {
    pub fn is_keep(&self) -> bool {
        matches!(self, Compatibility::Keep { .. })
    }
}

/// Decide whether `session` can move to `target` keeping its start and end times.
///
/// Keep-compatible when some free span on the target date contains the
/// placement and no other session booked in the target room on that date
/// overlaps it. The session never conflicts with itself.
pub fn can_keep_duration(
    session: &Session,
    target: &RescheduleTarget,
    free_spans: &[FreeSpan],
    existing: &[Session],
) -> Compatibility {
    let candidate = session.moved_to(target);
    let placement = candidate.interval();

    let Some(span) = free_spans
        .iter()
        .find(|span| placement.is_within(&span.on(target.date)))
    else {
        debug!(
            session = %session.id,
            date = %target.date,
            room = %target.room_id,
            spans = free_spans.len(),
            "no free span holds the session"
        );
        return Compatibility::Incompatible(Incompatibility::NoFreeSpan);
    };

    if let Some(other) = first_conflict(&candidate, existing, Some(&session.id)) {
        debug!(session = %session.id, conflict = %other.id, "placement conflicts");
        return Compatibility::Incompatible(Incompatibility::Conflict {
            session_id: other.id.clone(),
        });
    }

    debug!(session = %session.id, span_start = %span.start, span_end = %span.end, "keep-compatible");
    Compatibility::Keep {
        span: *span,
        candidate,
    }
}

/// Free spans long enough to hold the session without shortening it.
///
/// Order is preserved.
pub fn compatible_spans(session: &Session, free_spans: &[FreeSpan]) -> Vec<FreeSpan> {
    let needed = session.duration();
    free_spans
        .iter()
        .filter(|span| span.duration() >= needed)
        .copied()
        .collect()
}

/// Start times a time picker can offer in `span`, every `step_minutes`,
/// such that the session's full duration still fits.
///
/// A step of 0 is treated as 1 minute.
pub fn candidate_starts(session: &Session, span: &FreeSpan, step_minutes: u32) -> Vec<NaiveTime> {
    let duration = session.duration();
    let step = Duration::minutes(i64::from(step_minutes.max(1)));
    let bounds = span.on(session.date);

    let mut starts = Vec::new();
    let mut cursor = bounds.start;
    while cursor + duration <= bounds.end {
        starts.push(cursor.time());
        cursor += step;
    }
    starts
}

/// Move `session` to `target` starting at `start`, keeping its duration.
///
/// # Errors
/// Returns `RescheduleError::OutsideSpan` if the placement does not lie inside
/// `span` on the target date (including placements that would cross midnight).
pub fn place_in_span(
    session: &Session,
    target: &RescheduleTarget,
    span: &FreeSpan,
    start: NaiveTime,
) -> Result<Session> {
    let moved = session.moved_to(target);
    let start_at = target.date.and_time(start);
    let end_at = start_at + session.duration();
    let bounds = span.on(target.date);

    if end_at.date() != target.date || start_at < bounds.start || end_at > bounds.end {
        return Err(RescheduleError::OutsideSpan {
            start: start_at.format("%H:%M:%S").to_string(),
            end: end_at.format("%H:%M:%S").to_string(),
            span_start: span.start.format("%H:%M:%S").to_string(),
            span_end: span.end.format("%H:%M:%S").to_string(),
        });
    }

    moved.with_times(start, end_at.time())
}

/// Earliest conflict-free placement of `session` in any compatible span.
///
/// Spans are tried in chronological order; within a span, start times advance
/// by `step_minutes`.
pub fn first_fit(
    session: &Session,
    target: &RescheduleTarget,
    free_spans: &[FreeSpan],
    existing: &[Session],
    step_minutes: u32,
) -> Option<Session> {
    let mut spans = compatible_spans(session, free_spans);
    spans.sort_by_key(|span| (span.start, span.end));

    let moved = session.moved_to(target);
    for span in &spans {
        for start in candidate_starts(&moved, span, step_minutes) {
            let Ok(candidate) = place_in_span(session, target, span, start) else {
                continue;
            };
            if !conflicts_with_any(&candidate, existing, Some(&session.id)) {
                return Some(candidate);
            }
        }
    }
    None
}
