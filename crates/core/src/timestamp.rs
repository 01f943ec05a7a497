// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp encoding for the two stream variants
//!
//! EightByte streams carry absolute timestamps. FourByte streams carry the
//! delta from the previous event, seeded by the preamble's reference
//! timestamp. The tracker only advances once a whole event has been
//! encoded or decoded, so a failed call can be retried.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::event::EpochTimeMs;
use crate::wire::EncodingVariant;

/// Current wall-clock time; 0 if the clock is before the epoch
pub fn now_ms() -> EpochTimeMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as EpochTimeMs)
        .unwrap_or(0)
}

/// Previous-timestamp state of a delta-encoded stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampTracker {
    prev: EpochTimeMs,
}

impl TimestampTracker {
    pub fn new(reference: EpochTimeMs) -> Self {
        Self { prev: reference }
    }

    pub fn prev(&self) -> EpochTimeMs {
        self.prev
    }

    /// Delta to write for `timestamp`, without advancing
    pub fn delta_for(&self, timestamp: EpochTimeMs) -> EpochTimeMs {
        timestamp.wrapping_sub(self.prev)
    }

    /// Absolute timestamp for a decoded `delta`, without advancing
    pub fn resolve(&self, delta: EpochTimeMs) -> EpochTimeMs {
        self.prev.wrapping_add(delta)
    }

    pub fn advance(&mut self, timestamp: EpochTimeMs) {
        self.prev = timestamp;
    }
}

/// Per-stream timestamp scheme, chosen once from the encoding variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampCodec {
    Absolute,
    Delta(TimestampTracker),
}

impl TimestampCodec {
    pub fn for_variant(variant: EncodingVariant, reference: Option<EpochTimeMs>) -> Self {
        match variant {
            EncodingVariant::EightByte => TimestampCodec::Absolute,
            EncodingVariant::FourByte => {
                TimestampCodec::Delta(TimestampTracker::new(reference.unwrap_or(0)))
            }
        }
    }

    /// Value to put on the wire for `timestamp`
    pub fn encode(&self, timestamp: EpochTimeMs) -> EpochTimeMs {
        match self {
            TimestampCodec::Absolute => timestamp,
            TimestampCodec::Delta(tracker) => tracker.delta_for(timestamp),
        }
    }

    /// Absolute timestamp for a wire value
    pub fn decode(&self, raw: EpochTimeMs) -> EpochTimeMs {
        match self {
            TimestampCodec::Absolute => raw,
            TimestampCodec::Delta(tracker) => tracker.resolve(raw),
        }
    }

    /// Record `timestamp` as the last successfully processed event
    pub fn commit(&mut self, timestamp: EpochTimeMs) {
        if let TimestampCodec::Delta(tracker) = self {
            tracker.advance(timestamp);
        }
    }

    /// Previous timestamp of a delta stream
    pub fn prev(&self) -> Option<EpochTimeMs> {
        match self {
            TimestampCodec::Absolute => None,
            TimestampCodec::Delta(tracker) => Some(tracker.prev()),
        }
    }
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
