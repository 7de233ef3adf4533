//! Error types for reschedule-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RescheduleError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}': expected HH:MM[:SS] or an ISO 8601 date-time")]
    InvalidTime(String),

    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval { start: String, end: String },

    #[error("Placement {start}-{end} does not fit inside free span {span_start}-{span_end}")]
    OutsideSpan {
        start: String,
        end: String,
        span_start: String,
        span_end: String,
    },

    #[error("Free span {start}-{end} cannot hold this session")]
    SpanUnavailable { start: String, end: String },

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("Placement conflicts with session {0}")]
    Conflict(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Unknown id: {0}")]
    UnknownId(String),

    #[error("Schema error: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, RescheduleError>;
