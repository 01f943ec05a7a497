// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-level encoded message and its frame body layout

use crate::error::{IrError, IrResult};
use crate::varint;
use crate::wire::{EncodingVariant, FrameCursor, MAX_FIELD_LEN};

/// A message split into a log type (static text with placeholders), encoded
/// variables, and dictionary variables.
///
/// Reused across calls; `clear` keeps the allocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedMessage {
    pub logtype: String,
    /// Encoded variables; restricted to the i32 range for FourByte streams
    pub vars: Vec<i64>,
    /// Dictionary variables laid end to end
    pub dict_vars: String,
    /// Cumulative end offset of each dictionary variable within `dict_vars`
    pub dict_var_end_offsets: Vec<i32>,
}

impl EncodedMessage {
    pub fn clear(&mut self) {
        self.logtype.clear();
        self.vars.clear();
        self.dict_vars.clear();
        self.dict_var_end_offsets.clear();
    }

    /// Append a dictionary variable, recording its end offset
    pub fn push_dict_var(&mut self, var: &str) -> IrResult<()> {
        self.dict_vars.push_str(var);
        let end = i32::try_from(self.dict_vars.len())
            .map_err(|_| IrError::EncodeFailure("dictionary variables exceed 2 GiB".into()))?;
        self.dict_var_end_offsets.push(end);
        Ok(())
    }

    /// Iterate the dictionary variables in order
    pub fn dict_var_iter(&self) -> impl Iterator<Item = &str> + '_ {
        let mut start = 0usize;
        self.dict_var_end_offsets.iter().map(move |&end| {
            let end = end as usize;
            let var = self.dict_vars.get(start..end).unwrap_or("");
            start = end;
            var
        })
    }

    /// Append the body of a log-event frame (everything but the tag and
    /// timestamp).
    ///
    /// Nothing is appended when the message breaks a limit the reader
    /// enforces.
    pub(crate) fn write_body(&self, variant: EncodingVariant, out: &mut Vec<u8>) -> IrResult<()> {
        self.check_writable()?;
        varint::put(out, self.logtype.len() as u64);
        out.extend_from_slice(self.logtype.as_bytes());

        varint::put(out, self.vars.len() as u64);
        for &var in &self.vars {
            match variant {
                EncodingVariant::FourByte => {
                    let narrow = i32::try_from(var).map_err(|_| {
                        IrError::EncodeFailure(format!("variable {var} exceeds four-byte range"))
                    })?;
                    out.extend_from_slice(&narrow.to_be_bytes());
                }
                EncodingVariant::EightByte => out.extend_from_slice(&var.to_be_bytes()),
            }
        }

        varint::put(out, self.dict_var_end_offsets.len() as u64);
        for &end in &self.dict_var_end_offsets {
            varint::put(out, end as u64);
        }
        out.extend_from_slice(self.dict_vars.as_bytes());
        Ok(())
    }

    /// Reject anything [`read_body`](Self::read_body) would call corrupt.
    fn check_writable(&self) -> IrResult<()> {
        let too_long = |what: &str, len: usize| {
            IrError::EncodeFailure(format!("{what} length {len} exceeds limit"))
        };
        if self.logtype.len() > MAX_FIELD_LEN {
            return Err(too_long("logtype", self.logtype.len()));
        }
        if self.vars.len() > MAX_FIELD_LEN {
            return Err(too_long("variable count", self.vars.len()));
        }
        if self.dict_var_end_offsets.len() > MAX_FIELD_LEN {
            return Err(too_long("dictionary count", self.dict_var_end_offsets.len()));
        }
        if self.dict_vars.len() > MAX_FIELD_LEN {
            return Err(too_long("dictionary", self.dict_vars.len()));
        }

        let mut last = 0usize;
        for &end in &self.dict_var_end_offsets {
            let end = usize::try_from(end).map_err(|_| {
                IrError::EncodeFailure(format!("negative dictionary offset {end}"))
            })?;
            if end < last {
                return Err(IrError::EncodeFailure("dictionary offsets decrease".into()));
            }
            if end > self.dict_vars.len() {
                return Err(IrError::EncodeFailure(format!(
                    "dictionary offset {end} is past the dictionary end"
                )));
            }
            if !self.dict_vars.is_char_boundary(end) {
                return Err(IrError::EncodeFailure(
                    "dictionary offset splits a character".into(),
                ));
            }
            last = end;
        }
        if last != self.dict_vars.len() {
            return Err(IrError::EncodeFailure(format!(
                "dictionary offsets end at {last}, dictionary is {} bytes",
                self.dict_vars.len()
            )));
        }
        Ok(())
    }

    /// Parse a frame body written by [`write_body`](Self::write_body) into
    /// `self`, replacing its contents.
    pub(crate) fn read_body(
        &mut self,
        cursor: &mut FrameCursor<'_>,
        variant: EncodingVariant,
    ) -> IrResult<()> {
        self.clear();

        let len = cursor.length("logtype")?;
        let logtype = utf8(cursor.bytes(len)?, "logtype")?;
        self.logtype.push_str(logtype);

        let count = cursor.length("variable count")?;
        for _ in 0..count {
            let var = match variant {
                EncodingVariant::FourByte => i64::from(cursor.i32_be()?),
                EncodingVariant::EightByte => cursor.i64_be()?,
            };
            self.vars.push(var);
        }

        let count = cursor.length("dictionary count")?;
        let mut last = 0usize;
        for _ in 0..count {
            let end = cursor.length("dictionary offset")?;
            if end < last {
                return Err(IrError::CorruptedStream(
                    "dictionary offsets decrease".into(),
                ));
            }
            let end32 = i32::try_from(end)
                .map_err(|_| IrError::CorruptedStream("dictionary offset overflow".into()))?;
            self.dict_var_end_offsets.push(end32);
            last = end;
        }
        let dict = utf8(cursor.bytes(last)?, "dictionary variables")?;
        self.dict_vars.push_str(dict);
        if !self
            .dict_var_end_offsets
            .iter()
            .all(|&end| self.dict_vars.is_char_boundary(end as usize))
        {
            return Err(IrError::CorruptedStream(
                "dictionary offset splits a character".into(),
            ));
        }
        Ok(())
    }
}

fn utf8<'a>(bytes: &'a [u8], what: &str) -> IrResult<&'a str> {
    std::str::from_utf8(bytes)
        .map_err(|e| IrError::CorruptedStream(format!("{what} is not valid UTF-8: {e}")))
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
