//! Optional TOML configuration for the `reschedule` CLI.
//!
//! ```toml
//! pretty = false
//!
//! [hours]
//! open = "09:00"
//! close = "18:00"
//! ```
//!
//! Command-line flags override the file; the file overrides the built-in
//! defaults (08:00-20:00, pretty output).

use std::path::Path;

use anyhow::{Context, Result};
use reschedule_engine::freebusy::{DEFAULT_CLOSE, DEFAULT_OPEN};
use reschedule_engine::time::parse_time_of_day;
use reschedule_engine::RescheduleError;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hours {
    pub open: String,
    pub close: String,
}

impl Default for Hours {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN.to_string(),
            close: DEFAULT_CLOSE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub pretty: bool,
    pub hours: Hours,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pretty: true,
            hours: Hours::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings: Settings = toml::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        settings.validate()?;
        tracing::debug!(config = %path.display(), ?settings, "loaded config");
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let open = parse_time_of_day(&self.hours.open).context("Invalid [hours] open")?;
        let close = parse_time_of_day(&self.hours.close).context("Invalid [hours] close")?;
        if open >= close {
            return Err(RescheduleError::InvalidInterval {
                start: self.hours.open.clone(),
                end: self.hours.close.clone(),
            })
            .context("[hours] open must be before close");
        }
        Ok(())
    }
}
