//! Sessions, free spans, and candidate intervals.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{RescheduleError, Result};
use crate::time::SessionTime;

/// A closed-open interval of absolute (wall-clock) time.
///
/// Also serves as the Candidate Interval: a proposed placement not yet committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Signed length in whole minutes (negative when `end` precedes `start`).
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// True iff `self` lies entirely within `outer`, boundaries included.
    pub fn is_within(&self, outer: &Interval) -> bool {
        self.start >= outer.start && self.end <= outer.end
    }

    /// Minutes shared with `other`; 0 when they do not overlap.
    pub fn overlap_minutes(&self, other: &Interval) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            (end - start).num_minutes()
        } else {
            0
        }
    }
}

/// A scheduled activity in a room on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
    pub start: SessionTime,
    pub end: SessionTime,
    pub room_id: String,
    pub room_name: String,
}

impl Session {
    /// Build a session, rejecting `start >= end` (sessions never span midnight).
    ///
    /// # Errors
    /// Returns `RescheduleError::InvalidInterval` when the times are out of order.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start: SessionTime,
        end: SessionTime,
        room_id: impl Into<String>,
        room_name: impl Into<String>,
    ) -> Result<Self> {
        if start.time >= end.time {
            return Err(RescheduleError::InvalidInterval {
                start: start.render(date),
                end: end.render(date),
            });
        }
        Ok(Self {
            id: id.into(),
            date,
            start,
            end,
            room_id: room_id.into(),
            room_name: room_name.into(),
        })
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start.on(self.date), self.end.on(self.date))
    }

    /// Exact length, seconds included. Placement and fit checks use this.
    pub fn duration(&self) -> Duration {
        self.end.time - self.start.time
    }

    /// Length in whole minutes, for display.
    pub fn duration_minutes(&self) -> i64 {
        self.interval().duration_minutes()
    }

    /// Same session moved to another date and room, times unchanged.
    pub fn moved_to(&self, target: &RescheduleTarget) -> Session {
        Session {
            date: target.date,
            room_id: target.room_id.clone(),
            room_name: target.room_name.clone(),
            ..self.clone()
        }
    }

    /// Same session with new start/end times of day; storage formats are kept.
    pub fn with_times(&self, start: NaiveTime, end: NaiveTime) -> Result<Session> {
        Session::new(
            self.id.clone(),
            self.date,
            self.start.with_time(start),
            self.end.with_time(end),
            self.room_id.clone(),
            self.room_name.clone(),
        )
    }

    /// Whether both sessions are booked in the same room on the same date.
    pub fn shares_slot_with(&self, other: &Session) -> bool {
        self.room_id == other.room_id && self.date == other.date
    }
}

/// A window when a room is unoccupied on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreeSpan {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl FreeSpan {
    /// # Errors
    /// Returns `RescheduleError::InvalidInterval` for an empty or inverted span.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(RescheduleError::InvalidInterval {
                start: start.format("%H:%M:%S").to_string(),
                end: end.format("%H:%M:%S").to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn on(&self, date: NaiveDate) -> Interval {
        Interval::new(date.and_time(self.start), date.and_time(self.end))
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}

/// Where a session is being moved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleTarget {
    pub date: NaiveDate,
    pub room_id: String,
    pub room_name: String,
}

impl RescheduleTarget {
    pub fn new(date: NaiveDate, room_id: impl Into<String>, room_name: impl Into<String>) -> Self {
        Self {
            date,
            room_id: room_id.into(),
            room_name: room_name.into(),
        }
    }

    /// Keep the session's current room, change only the date.
    pub fn same_room(session: &Session, date: NaiveDate) -> Self {
        Self::new(date, session.room_id.clone(), session.room_name.clone())
    }
}
