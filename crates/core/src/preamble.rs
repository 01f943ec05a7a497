// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream header: encoding variant tag plus JSON metadata
//!
//! Metadata is sparse. Unknown keys are ignored and missing keys leave the
//! corresponding field empty.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{IrError, IrResult};
use crate::event::{EpochTimeMs, TimestampInfo};
use crate::wire::{EncodingVariant, FrameCursor, METADATA_JSON};

/// Metadata format version written by this crate
pub const IR_VERSION: &str = "v0.0.1";

const KEY_VERSION: &str = "VERSION";
const KEY_PATTERN: &str = "TIMESTAMP_PATTERN";
const KEY_PATTERN_SYNTAX: &str = "TIMESTAMP_PATTERN_SYNTAX";
const KEY_TZ_ID: &str = "TZ_ID";
const KEY_REFERENCE_TIMESTAMP: &str = "REFERENCE_TIMESTAMP";

/// Parsed stream header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    pub variant: EncodingVariant,
    pub timestamp_info: TimestampInfo,
    /// Seed for delta decoding; only meaningful for FourByte streams
    pub reference_timestamp: Option<EpochTimeMs>,
    /// Metadata version declared by the producer, if any
    pub version: Option<String>,
}

impl Preamble {
    pub fn new(variant: EncodingVariant, timestamp_info: TimestampInfo) -> Self {
        Self {
            variant,
            timestamp_info,
            reference_timestamp: None,
            version: Some(IR_VERSION.to_string()),
        }
    }

    pub fn with_reference_timestamp(mut self, reference: EpochTimeMs) -> Self {
        self.reference_timestamp = Some(reference);
        self
    }

    /// Append the encoded preamble to `out`.
    pub fn serialize(&self, out: &mut Vec<u8>) -> IrResult<()> {
        let reference = match self.variant {
            EncodingVariant::FourByte => self.reference_timestamp.map(|ts| ts.to_string()),
            EncodingVariant::EightByte => None,
        };
        let metadata = Metadata {
            version: self.version.as_deref().unwrap_or(IR_VERSION),
            pattern: &self.timestamp_info.pattern,
            pattern_syntax: &self.timestamp_info.pattern_syntax,
            tz_id: &self.timestamp_info.time_zone_id,
            reference_timestamp: reference,
        };
        let json = serde_json::to_vec(&metadata)?;
        let len = u16::try_from(json.len()).map_err(|_| {
            IrError::CorruptedMetadata(format!("metadata is {} bytes, limit is 65535", json.len()))
        })?;

        out.push(self.variant.tag());
        out.push(METADATA_JSON);
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&json);
        Ok(())
    }
}

#[derive(Serialize)]
struct Metadata<'a> {
    #[serde(rename = "VERSION")]
    version: &'a str,
    #[serde(rename = "TIMESTAMP_PATTERN")]
    pattern: &'a str,
    #[serde(rename = "TIMESTAMP_PATTERN_SYNTAX")]
    pattern_syntax: &'a str,
    #[serde(rename = "TZ_ID")]
    tz_id: &'a str,
    #[serde(rename = "REFERENCE_TIMESTAMP", skip_serializing_if = "Option::is_none")]
    reference_timestamp: Option<String>,
}

/// Parse a preamble from the front of `buf`.
///
/// Returns the preamble and the number of bytes it occupies, or
/// `IncompleteData` if `buf` ends before the metadata does.
pub fn parse_preamble(buf: &[u8]) -> IrResult<(Preamble, usize)> {
    let mut cursor = FrameCursor::new(buf);
    let variant = EncodingVariant::from_tag(cursor.u8()?)?;
    let metadata_type = cursor.u8()?;
    if metadata_type != METADATA_JSON {
        return Err(IrError::UnsupportedVersion(format!(
            "unknown metadata type 0x{metadata_type:02x}"
        )));
    }
    let len = cursor.u16_be()?;
    let json = cursor.bytes(usize::from(len))?;

    let metadata: Map<String, Value> = match serde_json::from_slice(json)? {
        Value::Object(map) => map,
        other => {
            return Err(IrError::CorruptedMetadata(format!(
                "expected a JSON object, found {other}"
            )))
        }
    };

    let version = string_field(&metadata, KEY_VERSION);
    if let Some(version) = &version {
        check_version(version)?;
    }

    let timestamp_info = TimestampInfo {
        pattern: string_field(&metadata, KEY_PATTERN).unwrap_or_default(),
        pattern_syntax: string_field(&metadata, KEY_PATTERN_SYNTAX).unwrap_or_default(),
        time_zone_id: string_field(&metadata, KEY_TZ_ID).unwrap_or_default(),
    };

    let reference_timestamp = match variant {
        EncodingVariant::FourByte => match metadata.get(KEY_REFERENCE_TIMESTAMP) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.trim().parse::<i64>().map_err(|e| {
                IrError::CorruptedMetadata(format!("invalid {KEY_REFERENCE_TIMESTAMP} {s:?}: {e}"))
            })?),
            Some(Value::Number(n)) => Some(n.as_i64().ok_or_else(|| {
                IrError::CorruptedMetadata(format!("invalid {KEY_REFERENCE_TIMESTAMP} {n}"))
            })?),
            Some(other) => {
                return Err(IrError::CorruptedMetadata(format!(
                    "invalid {KEY_REFERENCE_TIMESTAMP} {other}"
                )))
            }
        },
        EncodingVariant::EightByte => None,
    };

    let preamble = Preamble {
        variant,
        timestamp_info,
        reference_timestamp,
        version,
    };
    tracing::debug!(
        variant = %preamble.variant,
        reference_timestamp = ?preamble.reference_timestamp,
        consumed = cursor.position(),
        "parsed preamble"
    );
    Ok((preamble, cursor.position()))
}

fn string_field(metadata: &Map<String, Value>, key: &str) -> Option<String> {
    metadata.get(key).and_then(Value::as_str).map(str::to_string)
}

fn major(version: &str) -> &str {
    let v = version.trim().trim_start_matches('v');
    v.split('.').next().unwrap_or(v)
}

fn check_version(version: &str) -> IrResult<()> {
    if major(version) == major(IR_VERSION) {
        Ok(())
    } else {
        Err(IrError::UnsupportedVersion(format!(
            "metadata version {version} is not compatible with {IR_VERSION}"
        )))
    }
}

#[cfg(test)]
#[path = "preamble_tests.rs"]
mod tests;
