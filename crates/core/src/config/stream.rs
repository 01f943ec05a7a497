// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reader and writer session configuration
//!
//! Both structs deserialize from TOML tables with every field optional.

use serde::{Deserialize, Serialize};

use crate::event::{EpochTimeMs, TimestampInfo};
use crate::wire::EncodingVariant;

/// Initial buffer size for readers and writers
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// When the reader grows its buffer instead of only compacting it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPolicy {
    /// Double once unconsumed bytes occupy more than half the buffer
    #[default]
    HalfFull,
    /// Double only when unconsumed bytes fill the whole buffer
    Full,
}

impl GrowthPolicy {
    /// Whether a buffer of `capacity` holding `unconsumed` pending bytes
    /// should double before the next read
    pub fn should_grow(self, unconsumed: usize, capacity: usize) -> bool {
        match self {
            GrowthPolicy::HalfFull => unconsumed > capacity / 2,
            GrowthPolicy::Full => unconsumed >= capacity,
        }
    }
}

/// Configuration for an [`IrReader`](crate::IrReader)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub initial_buffer_size: usize,
    pub growth: GrowthPolicy,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            initial_buffer_size: DEFAULT_BUFFER_SIZE,
            growth: GrowthPolicy::default(),
        }
    }
}

impl ReaderConfig {
    pub fn with_initial_buffer_size(mut self, size: usize) -> Self {
        self.initial_buffer_size = size;
        self
    }

    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }
}

/// Configuration for an [`IrWriter`](crate::IrWriter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub variant: EncodingVariant,
    pub timestamp_info: TimestampInfo,
    /// Seed for FourByte deltas; the current time when unset
    pub reference_timestamp: Option<EpochTimeMs>,
    pub initial_buffer_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            variant: EncodingVariant::EightByte,
            timestamp_info: TimestampInfo::default(),
            reference_timestamp: None,
            initial_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl WriterConfig {
    pub fn four_byte() -> Self {
        Self {
            variant: EncodingVariant::FourByte,
            ..Self::default()
        }
    }

    pub fn eight_byte() -> Self {
        Self::default()
    }

    pub fn with_timestamp_info(mut self, info: TimestampInfo) -> Self {
        self.timestamp_info = info;
        self
    }

    pub fn with_reference_timestamp(mut self, reference: EpochTimeMs) -> Self {
        self.reference_timestamp = Some(reference);
        self
    }

    pub fn with_initial_buffer_size(mut self, size: usize) -> Self {
        self.initial_buffer_size = size;
        self
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
