// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! LEB128 varints and zigzag signed varints used inside frames

use crate::error::{IrError, IrResult};

/// Longest LEB128 encoding of a u64
pub const MAX_VARINT_LEN: usize = 10;

/// Append `n` as a LEB128 varint.
pub fn put(out: &mut Vec<u8>, mut n: u64) {
    while n >= 0x80 {
        out.push((n as u8) | 0x80);
        n >>= 7;
    }
    out.push(n as u8);
}

/// Append `n` zigzag-encoded.
pub fn put_signed(out: &mut Vec<u8>, n: i64) {
    put(out, zigzag(n));
}

/// Decode a varint from the front of `buf`, returning `(value, bytes_consumed)`.
///
/// A buffer that ends before the final byte yields `IncompleteData`; an
/// encoding longer than 64 bits yields `CorruptedStream`.
pub fn get(buf: &[u8]) -> IrResult<(u64, usize)> {
    let mut result: u64 = 0;
    for (i, &b) in buf.iter().enumerate() {
        if i == MAX_VARINT_LEN - 1 && b > 0x01 {
            return Err(IrError::CorruptedStream("varint overflows 64 bits".into()));
        }
        result |= u64::from(b & 0x7F) << (7 * i);
        if b & 0x80 == 0 {
            return Ok((result, i + 1));
        }
    }
    Err(IrError::IncompleteData)
}

/// Decode a zigzag varint from the front of `buf`.
pub fn get_signed(buf: &[u8]) -> IrResult<(i64, usize)> {
    let (val, len) = get(buf)?;
    Ok((unzigzag(val), len))
}

fn zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

fn unzigzag(val: u64) -> i64 {
    ((val >> 1) as i64) ^ (-((val & 1) as i64))
}

#[cfg(test)]
#[path = "varint_tests.rs"]
mod tests;
