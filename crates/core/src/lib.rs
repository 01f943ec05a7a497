// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! irs-core: streaming codec for IR log-event streams
//!
//! This crate provides:
//! - The byte-level wire format: preamble, event frames, and terminator
//! - Delta (FourByte) and absolute (EightByte) timestamp encoding
//! - A pluggable message engine splitting text into log type and variables
//! - Streaming reader and writer sessions over `std::io`
//! - Wildcard query merging for filtered reads

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod config;
pub mod error;
pub mod event;
pub mod message;
pub mod preamble;
pub mod query;
pub mod timestamp;
pub mod wire;

mod buffer;
mod codec;
mod reader;
mod varint;
mod writer;

// Re-exports
pub use adapters::{EngineError, MessageEngine, TokenEngine, TracedEngine};
pub use codec::{LogEventCodec, Scan};
pub use config::{GrowthPolicy, ReaderConfig, WriterConfig};
pub use error::{IrError, IrResult};
pub use event::{EpochTimeMs, LogEvent, LogEventView, MatchedEvent, TimestampInfo};
pub use message::EncodedMessage;
pub use preamble::{parse_preamble, Preamble, IR_VERSION};
pub use query::{wildcard_match, MergedWildcardQuery, TimestampInterval, WildcardQuery};
pub use reader::{Events, IrReader};
pub use timestamp::{now_ms, TimestampCodec, TimestampTracker};
pub use wire::EncodingVariant;
pub use writer::IrWriter;

#[cfg(any(test, feature = "test-support"))]
pub use adapters::{EngineCall, FakeEngine};
