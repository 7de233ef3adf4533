//! # reschedule-engine
//!
//! Room and time-slot compatibility checks for moving conference sessions.
//!
//! When a session is moved to a new date, time, or room, the engine answers
//! whether it can keep its current times there, and if not, whether the
//! problem is the room (no free span holds it) or the time (another session
//! is booked). Availability data is fetched by the caller; every function here
//! is pure and synchronous.
//!
//! ## Modules
//!
//! - [`time`] — bare time-of-day vs ISO stamp normalization
//! - [`session`] — sessions, free spans, candidate intervals, targets
//! - [`interval`] — duration, containment, overlap, and conflict checks
//! - [`compat`] — keep-compatible evaluation and time reassignment helpers
//! - [`flow`] — the reschedule state machine
//! - [`freebusy`] — derive a room's free spans from its bookings
//! - [`schema`] — wire DTOs validated at the network boundary
//! - [`collection`] — reducer over id-keyed collections
//! - [`error`] — Error types

pub mod collection;
pub mod compat;
pub mod error;
pub mod flow;
pub mod freebusy;
pub mod interval;
pub mod schema;
pub mod session;
pub mod time;

pub use compat::{can_keep_duration, compatible_spans, Compatibility, Incompatibility};
pub use error::RescheduleError;
pub use flow::{Reschedule, RescheduleState};
pub use interval::{conflicts_with_any, duration_minutes, fits_within, overlaps};
pub use session::{FreeSpan, Interval, RescheduleTarget, Session};
pub use time::{detect_format, to_absolute, to_storage_format, SessionTime, TimeFormat};
