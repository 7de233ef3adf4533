//! Wire schemas validated at the network boundary.
//!
//! The REST API hands back loosely-typed JSON. Everything is decoded into the
//! DTOs below and converted with `TryFrom` into the engine's types, so malformed
//! dates or times fail here with a descriptive error instead of leaking into
//! the interval math. The request/response pairs are the JSON documents used
//! by the WASM binding and the CLI.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::compat::{
    can_keep_duration, compatible_spans, first_fit, Compatibility, Incompatibility,
};
use crate::error::{RescheduleError, Result};
use crate::freebusy;
use crate::session::{FreeSpan, RescheduleTarget, Session};
use crate::time::{parse_date, SessionTime};

/// Accept ids sent either as JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, got {}",
            other
        ))),
    }
}

fn render_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub date: String,
    #[serde(alias = "start_time")]
    pub start_time: String,
    #[serde(alias = "end_time")]
    pub end_time: String,
    #[serde(alias = "room_id", deserialize_with = "string_or_number")]
    pub room_id: String,
    #[serde(alias = "room_name", default)]
    pub room_name: String,
}

impl TryFrom<SessionDto> for Session {
    type Error = RescheduleError;

    fn try_from(dto: SessionDto) -> Result<Self> {
        let date = parse_date(&dto.date)?;
        let (start, start_date) = SessionTime::parse_with_date(&dto.start_time)?;
        let (end, end_date) = SessionTime::parse_with_date(&dto.end_time)?;
        for stamped in [start_date, end_date].into_iter().flatten() {
            if stamped != date {
                debug!(session = %dto.id, %stamped, %date, "stamp date differs from session date");
            }
        }
        Session::new(dto.id, date, start, end, dto.room_id, dto.room_name)
    }
}

impl From<&Session> for SessionDto {
    fn from(s: &Session) -> Self {
        Self {
            id: s.id.clone(),
            date: s.date.format("%Y-%m-%d").to_string(),
            start_time: s.start.render(s.date),
            end_time: s.end.render(s.date),
            room_id: s.room_id.clone(),
            room_name: s.room_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSpanDto {
    #[serde(alias = "start_time", alias = "start")]
    pub start_time: String,
    #[serde(alias = "end_time", alias = "end")]
    pub end_time: String,
}

impl TryFrom<FreeSpanDto> for FreeSpan {
    type Error = RescheduleError;

    fn try_from(dto: FreeSpanDto) -> Result<Self> {
        let start = SessionTime::parse(&dto.start_time)?.time;
        let end = SessionTime::parse(&dto.end_time)?.time;
        FreeSpan::new(start, end)
    }
}

impl From<&FreeSpan> for FreeSpanDto {
    fn from(span: &FreeSpan) -> Self {
        Self {
            start_time: render_time(span.start),
            end_time: render_time(span.end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDto {
    pub date: String,
    #[serde(alias = "room_id", deserialize_with = "string_or_number")]
    pub room_id: String,
    #[serde(alias = "room_name", default)]
    pub room_name: String,
}

impl TryFrom<TargetDto> for RescheduleTarget {
    type Error = RescheduleError;

    fn try_from(dto: TargetDto) -> Result<Self> {
        Ok(RescheduleTarget::new(
            parse_date(&dto.date)?,
            dto.room_id,
            dto.room_name,
        ))
    }
}

fn convert_all<D, T>(items: Vec<D>) -> Result<Vec<T>>
where
    T: TryFrom<D, Error = RescheduleError>,
{
    items.into_iter().map(T::try_from).collect()
}

/// "Can this session move to this date/room?"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityRequest {
    pub session: SessionDto,
    pub target: TargetDto,
    #[serde(alias = "free_spans")]
    pub free_spans: Vec<FreeSpanDto>,
    #[serde(alias = "existing_sessions", default)]
    pub existing_sessions: Vec<SessionDto>,
    /// When set and the session cannot keep its time, suggest the earliest
    /// conflict-free start on this minute grid.
    #[serde(alias = "suggest_step_minutes", default)]
    pub suggest_step_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResponse {
    /// `"keep"`, `"noFreeSpan"` or `"conflict"`.
    pub status: String,
    pub keep: bool,
    pub duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub span: Option<FreeSpanDto>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub candidate: Option<SessionDto>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub conflicting_session_id: Option<String>,
    pub compatible_spans: Vec<FreeSpanDto>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<SessionDto>,
}

impl CompatibilityRequest {
    /// Validate the request and run the compatibility check.
    ///
    /// # Errors
    /// Returns the first validation error found in the request.
    pub fn evaluate(self) -> Result<CompatibilityResponse> {
        let session = Session::try_from(self.session)?;
        let target = RescheduleTarget::try_from(self.target)?;
        let free_spans: Vec<FreeSpan> = convert_all(self.free_spans)?;
        let existing: Vec<Session> = convert_all(self.existing_sessions)?;

        let outcome = can_keep_duration(&session, &target, &free_spans, &existing);
        let compatible = compatible_spans(&session, &free_spans)
            .iter()
            .map(FreeSpanDto::from)
            .collect();

        let mut response = CompatibilityResponse {
            status: "keep".to_string(),
            keep: outcome.is_keep(),
            duration_minutes: session.duration_minutes(),
            message: None,
            span: None,
            candidate: None,
            conflicting_session_id: None,
            compatible_spans: compatible,
            suggestion: None,
        };

        match &outcome {
            Compatibility::Keep { span, candidate } => {
                response.span = Some(FreeSpanDto::from(span));
                response.candidate = Some(SessionDto::from(candidate));
            }
            Compatibility::Incompatible(reason) => {
                response.status = reason.as_str().to_string();
                response.message = Some(reason.guidance().to_string());
                if let Incompatibility::Conflict { session_id } = reason {
                    response.conflicting_session_id = Some(session_id.clone());
                }
                if let Some(step) = self.suggest_step_minutes {
                    response.suggestion = first_fit(&session, &target, &free_spans, &existing, step)
                        .as_ref()
                        .map(SessionDto::from);
                }
            }
        }

        Ok(response)
    }
}

/// "Which free spans can hold this session?"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpansRequest {
    pub session: SessionDto,
    #[serde(alias = "free_spans")]
    pub free_spans: Vec<FreeSpanDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpansResponse {
    pub duration_minutes: i64,
    pub spans: Vec<FreeSpanDto>,
}

impl SpansRequest {
    pub fn evaluate(self) -> Result<SpansResponse> {
        let session = Session::try_from(self.session)?;
        let free_spans: Vec<FreeSpan> = convert_all(self.free_spans)?;
        Ok(SpansResponse {
            duration_minutes: session.duration_minutes(),
            spans: compatible_spans(&session, &free_spans)
                .iter()
                .map(FreeSpanDto::from)
                .collect(),
        })
    }
}

/// "When is this room free on this date?"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSpansRequest {
    #[serde(alias = "room_id", deserialize_with = "string_or_number")]
    pub room_id: String,
    pub date: String,
    #[serde(default)]
    pub sessions: Vec<SessionDto>,
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSpansResponse {
    pub room_id: String,
    pub date: String,
    pub spans: Vec<FreeSpanDto>,
}

impl FreeSpansRequest {
    /// Derive free spans; `open`/`close` in the request override the defaults.
    pub fn evaluate(
        self,
        default_open: NaiveTime,
        default_close: NaiveTime,
    ) -> Result<FreeSpansResponse> {
        let date = parse_date(&self.date)?;
        let open = match &self.open {
            Some(v) => SessionTime::parse(v)?.time,
            None => default_open,
        };
        let close = match &self.close {
            Some(v) => SessionTime::parse(v)?.time,
            None => default_close,
        };
        if open >= close {
            return Err(RescheduleError::InvalidInterval {
                start: render_time(open),
                end: render_time(close),
            });
        }
        let sessions: Vec<Session> = convert_all(self.sessions)?;
        let spans = freebusy::free_spans(&sessions, &self.room_id, date, open, close);
        Ok(FreeSpansResponse {
            room_id: self.room_id,
            date: date.format("%Y-%m-%d").to_string(),
            spans: spans.iter().map(FreeSpanDto::from).collect(),
        })
    }
}

/// Decode a JSON document, mapping decode failures to `RescheduleError::Schema`.
pub fn from_json<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| RescheduleError::Schema(e.to_string()))
}
