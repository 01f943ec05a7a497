// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte-level layout of an IR stream
//!
//! ```text
//! stream   := preamble frame* EOF
//! preamble := [variant:u8][metadata type:u8 = 0x01][metadata len:u16 BE][metadata JSON]
//! frame    := LOG_EVENT event | UTC_OFFSET_CHANGE zigzag(offset)
//! event    := varint(logtype len) logtype
//!             varint(var count) var*            var = i32 BE (FourByte) | i64 BE (EightByte)
//!             varint(dict count) varint(end)*   cumulative, non-decreasing
//!             dict bytes                        length = last end offset
//!             timestamp                         i64 BE (EightByte) | zigzag(delta) (FourByte)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::varint;

/// Metadata type byte for JSON metadata, the only kind defined
pub const METADATA_JSON: u8 = 0x01;

/// Frame tag: end of stream
pub const TAG_EOF: u8 = 0x00;
/// Frame tag: log event
pub const TAG_LOG_EVENT: u8 = 0x01;
/// Frame tag: UTC offset change applying to subsequent events
pub const TAG_UTC_OFFSET_CHANGE: u8 = 0x02;

/// Upper bound on any length-prefixed field
pub const MAX_FIELD_LEN: usize = 256 * 1024 * 1024;

/// Width of encoded variables and timestamp scheme, fixed per stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingVariant {
    /// 32-bit variables, delta-encoded timestamps
    FourByte,
    /// 64-bit variables, absolute timestamps
    EightByte,
}

impl EncodingVariant {
    pub fn tag(self) -> u8 {
        match self {
            EncodingVariant::FourByte => 0x04,
            EncodingVariant::EightByte => 0x08,
        }
    }

    pub fn from_tag(tag: u8) -> IrResult<Self> {
        match tag {
            0x04 => Ok(EncodingVariant::FourByte),
            0x08 => Ok(EncodingVariant::EightByte),
            other => Err(IrError::UnsupportedVersion(format!(
                "unknown encoding tag 0x{other:02x}"
            ))),
        }
    }

    /// Bytes per encoded variable
    pub fn var_width(self) -> usize {
        match self {
            EncodingVariant::FourByte => 4,
            EncodingVariant::EightByte => 8,
        }
    }

    /// Whether `value` is representable as an encoded variable
    pub fn fits(self, value: i64) -> bool {
        match self {
            EncodingVariant::FourByte => i32::try_from(value).is_ok(),
            EncodingVariant::EightByte => true,
        }
    }
}

impl std::fmt::Display for EncodingVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingVariant::FourByte => write!(f, "four-byte"),
            EncodingVariant::EightByte => write!(f, "eight-byte"),
        }
    }
}

/// Forward-only reader over a frame that reports running out of bytes as
/// `IncompleteData`
pub(crate) struct FrameCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FrameCursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn u8(&mut self) -> IrResult<u8> {
        let b = *self.buf.get(self.pos).ok_or(IrError::IncompleteData)?;
        self.pos += 1;
        Ok(b)
    }

    pub(crate) fn bytes(&mut self, len: usize) -> IrResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(IrError::IncompleteData)?;
        let slice = self.buf.get(self.pos..end).ok_or(IrError::IncompleteData)?;
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn varint(&mut self) -> IrResult<u64> {
        let (value, used) = varint::get(&self.buf[self.pos..])?;
        self.pos += used;
        Ok(value)
    }

    pub(crate) fn signed_varint(&mut self) -> IrResult<i64> {
        let (value, used) = varint::get_signed(&self.buf[self.pos..])?;
        self.pos += used;
        Ok(value)
    }

    /// A varint length checked against [`MAX_FIELD_LEN`]
    pub(crate) fn length(&mut self, what: &str) -> IrResult<usize> {
        let len = self.varint()?;
        match usize::try_from(len) {
            Ok(len) if len <= MAX_FIELD_LEN => Ok(len),
            _ => Err(IrError::CorruptedStream(format!(
                "{what} length {len} exceeds limit"
            ))),
        }
    }

    pub(crate) fn i64_be(&mut self) -> IrResult<i64> {
        let raw = self.bytes(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(raw);
        Ok(i64::from_be_bytes(arr))
    }

    pub(crate) fn i32_be(&mut self) -> IrResult<i32> {
        let raw = self.bytes(4)?;
        let mut arr = [0u8; 4];
        arr.copy_from_slice(raw);
        Ok(i32::from_be_bytes(arr))
    }

    pub(crate) fn u16_be(&mut self) -> IrResult<u16> {
        let raw = self.bytes(2)?;
        Ok(u16::from_be_bytes([raw[0], raw[1]]))
    }
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
