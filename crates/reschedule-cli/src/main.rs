//! `reschedule` CLI — check session moves against room availability from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Can the session keep its time at the new date/room? (stdin → stdout)
//! cat request.json | reschedule check
//!
//! # Same, file to file, compact JSON
//! reschedule check -i request.json -o response.json --compact
//!
//! # Which free spans are long enough for the session?
//! reschedule spans -i spans.json
//!
//! # Derive a room's free spans from its bookings, overriding opening hours
//! reschedule free -i room.json --open 09:00 --close 18:00
//!
//! # Report the storage format of a time value
//! reschedule format 2025-03-01T09:00:00Z
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for more detail.

mod config;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use reschedule_engine::schema::{CompatibilityRequest, FreeSpansRequest, SpansRequest};
use reschedule_engine::time::parse_time_of_day;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Settings;

#[derive(Parser)]
#[command(
    name = "reschedule",
    version,
    about = "Check conference session reschedules against room availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file with default opening hours and output style
    #[arg(long, global = true, env = "RESCHEDULE_CONFIG")]
    config: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a session can keep its time at a new date/room
    Check {
        /// Input request file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the free spans long enough to hold a session
    Spans {
        /// Input request file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Derive a room's free spans on a date from its bookings
    Free {
        /// Input request file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Opening time (HH:MM), overrides the request and config
        #[arg(long)]
        open: Option<String>,
        /// Closing time (HH:MM), overrides the request and config
        #[arg(long)]
        close: Option<String>,
    },
    /// Print whether a time value is "time-only" or "iso"
    Format {
        /// The stored time value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;
    let pretty = settings.pretty && !cli.compact;

    match cli.command {
        Commands::Check { input, output } => {
            let request: CompatibilityRequest = read_json(input.as_deref())?;
            let response = request
                .evaluate()
                .context("Failed to evaluate compatibility request")?;
            info!(status = %response.status, "compatibility checked");
            write_json(output.as_deref(), &response, pretty)?;
        }
        Commands::Spans { input, output } => {
            let request: SpansRequest = read_json(input.as_deref())?;
            let response = request
                .evaluate()
                .context("Failed to evaluate spans request")?;
            info!(spans = response.spans.len(), "compatible spans found");
            write_json(output.as_deref(), &response, pretty)?;
        }
        Commands::Free {
            input,
            output,
            open,
            close,
        } => {
            let mut request: FreeSpansRequest = read_json(input.as_deref())?;
            if open.is_some() {
                request.open = open;
            }
            if close.is_some() {
                request.close = close;
            }
            let default_open = parse_time_of_day(&settings.hours.open)?;
            let default_close = parse_time_of_day(&settings.hours.close)?;
            let response = request
                .evaluate(default_open, default_close)
                .context("Failed to derive free spans")?;
            info!(spans = response.spans.len(), room = %response.room_id, "free spans derived");
            write_json(output.as_deref(), &response, pretty)?;
        }
        Commands::Format { value } => {
            let format = reschedule_engine::detect_format(&value)
                .with_context(|| format!("Failed to detect format of '{}'", value))?;
            println!("{}", format);
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable.
///
/// `-v` picks the level and takes precedence; without it `RUST_LOG` is used
/// when set (default `warn`).
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_json<T: DeserializeOwned>(path: Option<&str>) -> Result<T> {
    let raw = read_input(path)?;
    debug!(bytes = raw.len(), "read request");
    serde_json::from_str(&raw).context("Failed to parse request JSON")
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    write_output(path, &json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
