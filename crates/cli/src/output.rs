// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use irs_core::{EpochTimeMs, LogEvent, LogEventView};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a report in the specified format
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Line format of log events read or written by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventFormat {
    /// One JSON object per line
    Jsonl,
    /// One message per line
    Text,
}

#[derive(Serialize)]
struct EventLine<'a> {
    timestamp: EpochTimeMs,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    utc_offset: Option<EpochTimeMs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_index: Option<usize>,
}

/// Write one event, tagged with the query it matched when searching
pub fn write_event<W: Write>(
    out: &mut W,
    event: &LogEventView<'_>,
    query_index: Option<usize>,
    format: EventFormat,
) -> io::Result<()> {
    match format {
        EventFormat::Jsonl => {
            let line = EventLine {
                timestamp: event.timestamp,
                message: event.message,
                utc_offset: event.utc_offset,
                query_index,
            };
            serde_json::to_writer(&mut *out, &line)?;
            out.write_all(b"\n")
        }
        EventFormat::Text => writeln!(out, "{}", event.message),
    }
}

#[derive(Deserialize)]
struct InputLine {
    timestamp: Option<EpochTimeMs>,
    message: String,
    #[serde(default)]
    utc_offset: Option<EpochTimeMs>,
}

/// Parse one input line; `now` supplies missing timestamps.
///
/// Returns `None` for blank JSONL lines.
pub fn parse_event(
    line: &str,
    format: EventFormat,
    now: EpochTimeMs,
) -> Result<Option<LogEvent>, serde_json::Error> {
    match format {
        EventFormat::Text => Ok(Some(LogEvent::new(line, now))),
        EventFormat::Jsonl if line.trim().is_empty() => Ok(None),
        EventFormat::Jsonl => {
            let input: InputLine = serde_json::from_str(line)?;
            Ok(Some(LogEvent {
                message: input.message,
                timestamp: input.timestamp.unwrap_or(now),
                utc_offset: input.utc_offset,
            }))
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
