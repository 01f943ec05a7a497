// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-facing log events

use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch; a delta in FourByte frames
pub type EpochTimeMs = i64;

/// Timestamp formatting carried once in the preamble
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampInfo {
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub pattern_syntax: String,
    #[serde(default)]
    pub time_zone_id: String,
}

/// An owned log event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub message: String,
    pub timestamp: EpochTimeMs,
    /// Offset from UTC in effect for this event, if the stream declared one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<EpochTimeMs>,
}

impl LogEvent {
    pub fn new(message: impl Into<String>, timestamp: EpochTimeMs) -> Self {
        Self {
            message: message.into(),
            timestamp,
            utc_offset: None,
        }
    }

    pub fn with_utc_offset(mut self, offset: EpochTimeMs) -> Self {
        self.utc_offset = Some(offset);
        self
    }

    pub fn view(&self) -> LogEventView<'_> {
        LogEventView {
            message: &self.message,
            timestamp: self.timestamp,
            utc_offset: self.utc_offset,
        }
    }
}

/// A decoded event borrowing the decoder's internal buffers.
///
/// Valid until the next call on the session that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEventView<'a> {
    pub message: &'a str,
    pub timestamp: EpochTimeMs,
    pub utc_offset: Option<EpochTimeMs>,
}

impl LogEventView<'_> {
    pub fn to_owned_event(&self) -> LogEvent {
        LogEvent {
            message: self.message.to_string(),
            timestamp: self.timestamp,
            utc_offset: self.utc_offset,
        }
    }
}

/// An event that satisfied a filtered read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedEvent<'a> {
    pub event: LogEventView<'a>,
    /// Position of the first matching query in the merged query set
    pub query_index: usize,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
