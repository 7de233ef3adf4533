//! Reschedule flow -- the state machine behind one "move this session" attempt.
//!
//! ```text
//! Idle -> DateOrRoomSelected -> AvailabilityChecked -> KeepConfirmed  -> Committed
//!                                                   \-> TimeReassigned -/
//! ```
//!
//! Any non-terminal state may be abandoned. Out-of-order calls fail with
//! `RescheduleError::InvalidTransition` and leave the flow untouched.

use chrono::NaiveTime;
use tracing::debug;

use crate::compat::{can_keep_duration, compatible_spans, place_in_span, Compatibility};
use crate::error::{RescheduleError, Result};
use crate::interval::first_conflict;
use crate::session::{FreeSpan, RescheduleTarget, Session};

/// Where a reschedule attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescheduleState {
    /// Modal opened; nothing chosen yet.
    Idle,
    /// A target date and room are chosen but not checked.
    DateOrRoomSelected,
    /// The compatibility check ran; its outcome is available.
    AvailabilityChecked,
    /// The user kept the session's current start and end times.
    KeepConfirmed,
    /// The user picked a new start inside a compatible span.
    TimeReassigned,
    /// The finalized session was handed back for persistence.
    Committed,
    /// The attempt was cancelled; the session is unchanged.
    Abandoned,
}

impl RescheduleState {
    pub fn name(&self) -> &'static str {
        match self {
            RescheduleState::Idle => "idle",
            RescheduleState::DateOrRoomSelected => "date or room selected",
            RescheduleState::AvailabilityChecked => "availability checked",
            RescheduleState::KeepConfirmed => "keep confirmed",
            RescheduleState::TimeReassigned => "time reassigned",
            RescheduleState::Committed => "committed",
            RescheduleState::Abandoned => "abandoned",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RescheduleState::Committed | RescheduleState::Abandoned)
    }
}

/// One reschedule attempt for a single session.
#[derive(Debug, Clone)]
pub struct Reschedule {
    session: Session,
    state: RescheduleState,
    target: Option<RescheduleTarget>,
    outcome: Option<Compatibility>,
    compatible: Vec<FreeSpan>,
    candidate: Option<Session>,
}

impl Reschedule {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            state: RescheduleState::Idle,
            target: None,
            outcome: None,
            compatible: Vec::new(),
            candidate: None,
        }
    }

    /// The session as it was before this attempt.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> RescheduleState {
        self.state
    }

    pub fn target(&self) -> Option<&RescheduleTarget> {
        self.target.as_ref()
    }

    pub fn outcome(&self) -> Option<&Compatibility> {
        self.outcome.as_ref()
    }

    /// Spans the user may pick a new time from; empty until availability is checked.
    pub fn compatible_spans(&self) -> &[FreeSpan] {
        &self.compatible
    }

    /// The placement awaiting commit, if one has been confirmed or reassigned.
    pub fn candidate(&self) -> Option<&Session> {
        self.candidate.as_ref()
    }

    fn guard(&self, action: &'static str, allowed: &[RescheduleState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(RescheduleError::InvalidTransition {
                state: self.state.name(),
                action,
            })
        }
    }

    fn transition(&mut self, next: RescheduleState) {
        debug!(
            session = %self.session.id,
            from = self.state.name(),
            to = next.name(),
            "reschedule transition"
        );
        self.state = next;
    }

    /// Choose the date and room to move to. Re-selecting discards any earlier check.
    pub fn select_target(&mut self, target: RescheduleTarget) -> Result<()> {
        self.guard(
            "select a date or room",
            &[
                RescheduleState::Idle,
                RescheduleState::DateOrRoomSelected,
                RescheduleState::AvailabilityChecked,
            ],
        )?;
        self.target = Some(target);
        self.outcome = None;
        self.compatible.clear();
        self.transition(RescheduleState::DateOrRoomSelected);
        Ok(())
    }

    /// Evaluate the selected target against the room's free spans and bookings.
    pub fn check_availability(
        &mut self,
        free_spans: &[FreeSpan],
        existing: &[Session],
    ) -> Result<&Compatibility> {
        self.guard(
            "check availability",
            &[
                RescheduleState::DateOrRoomSelected,
                RescheduleState::AvailabilityChecked,
            ],
        )?;
        let target = self.target.as_ref().ok_or(RescheduleError::InvalidTransition {
            state: self.state.name(),
            action: "check availability",
        })?;

        let outcome = can_keep_duration(&self.session, target, free_spans, existing);
        self.compatible = compatible_spans(&self.session, free_spans);
        self.transition(RescheduleState::AvailabilityChecked);
        Ok(&*self.outcome.insert(outcome))
    }

    /// Accept the keep-compatible placement.
    pub fn confirm_keep(&mut self) -> Result<&Session> {
        self.guard("keep the current time", &[RescheduleState::AvailabilityChecked])?;
        let candidate = match &self.outcome {
            Some(Compatibility::Keep { candidate, .. }) => candidate.clone(),
            _ => {
                return Err(RescheduleError::InvalidTransition {
                    state: "the current time is incompatible",
                    action: "keep the current time",
                })
            }
        };
        self.transition(RescheduleState::KeepConfirmed);
        Ok(&*self.candidate.insert(candidate))
    }

    /// Pick a new start time inside one of the compatible spans.
    ///
    /// May be repeated while in `TimeReassigned` to pick a different time.
    pub fn reassign_time(
        &mut self,
        span: FreeSpan,
        start: NaiveTime,
        existing: &[Session],
    ) -> Result<&Session> {
        self.guard(
            "reassign the time",
            &[
                RescheduleState::AvailabilityChecked,
                RescheduleState::TimeReassigned,
            ],
        )?;
        if !self.compatible.contains(&span) {
            return Err(RescheduleError::SpanUnavailable {
                start: span.start.format("%H:%M:%S").to_string(),
                end: span.end.format("%H:%M:%S").to_string(),
            });
        }
        let target = self.target.as_ref().ok_or(RescheduleError::InvalidTransition {
            state: self.state.name(),
            action: "reassign the time",
        })?;

        let candidate = place_in_span(&self.session, target, &span, start)?;
        if let Some(other) = first_conflict(&candidate, existing, Some(&self.session.id)) {
            return Err(RescheduleError::Conflict(other.id.clone()));
        }
        self.transition(RescheduleState::TimeReassigned);
        Ok(&*self.candidate.insert(candidate))
    }

    /// Finalize the attempt and hand the updated session to the caller to persist.
    pub fn commit(&mut self) -> Result<Session> {
        self.guard(
            "commit",
            &[RescheduleState::KeepConfirmed, RescheduleState::TimeReassigned],
        )?;
        let session = self.candidate.take().ok_or(RescheduleError::InvalidTransition {
            state: self.state.name(),
            action: "commit",
        })?;
        self.transition(RescheduleState::Committed);
        Ok(session)
    }

    /// Close the attempt without changing anything.
    pub fn abandon(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Err(RescheduleError::InvalidTransition {
                state: self.state.name(),
                action: "abandon",
            });
        }
        self.candidate = None;
        self.transition(RescheduleState::Abandoned);
        Ok(())
    }
}
