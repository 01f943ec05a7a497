// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default tokenizing engine
//!
//! A token is a maximal run of `[A-Za-z0-9+\-./\\_]`. Tokens containing a
//! digit, or alphabetic tokens directly after `=`, are variables. Canonical
//! decimal integers that fit the stream's variable width are stored as
//! encoded variables; every other variable goes to the dictionary. Static
//! text keeps placeholders unambiguous by escaping them with `\`.

use super::traits::{EngineError, MessageEngine};
use crate::message::EncodedMessage;
use crate::wire::EncodingVariant;

/// Log-type placeholder for an encoded integer variable
pub const VAR_PLACEHOLDER: char = '\u{11}';
/// Log-type placeholder for a dictionary variable
pub const DICT_PLACEHOLDER: char = '\u{12}';
/// Escapes a literal placeholder or backslash in the log type
pub const ESCAPE: char = '\\';

/// Stateless engine; cheap to construct per session
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenEngine;

impl TokenEngine {
    pub fn new() -> Self {
        Self
    }
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.' | b'/' | b'\\' | b'_')
}

fn push_escaped(logtype: &mut String, literal: &str) {
    for c in literal.chars() {
        if matches!(c, VAR_PLACEHOLDER | DICT_PLACEHOLDER | ESCAPE) {
            logtype.push(ESCAPE);
        }
        logtype.push(c);
    }
}

/// Parse `token` as an integer only if formatting it back yields the same
/// text (no sign prefix `+`, no leading zeros, no `-0`).
fn canonical_int(token: &str) -> Option<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if (digits.len() > 1 && digits.starts_with('0')) || token == "-0" {
        return None;
    }
    token.parse().ok()
}

impl MessageEngine for TokenEngine {
    fn encode_message(
        &mut self,
        text: &str,
        variant: EncodingVariant,
        out: &mut EncodedMessage,
    ) -> Result<(), EngineError> {
        out.clear();
        let bytes = text.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() {
            let start = pos;
            if is_token_byte(bytes[pos]) {
                while pos < bytes.len() && is_token_byte(bytes[pos]) {
                    pos += 1;
                }
                let token = &text[start..pos];
                let after_equals = start > 0 && bytes[start - 1] == b'=';
                let is_var = token.bytes().any(|b| b.is_ascii_digit())
                    || (after_equals && token.bytes().any(|b| b.is_ascii_alphabetic()));

                if !is_var {
                    push_escaped(&mut out.logtype, token);
                    continue;
                }
                match canonical_int(token) {
                    Some(value) if variant.fits(value) => {
                        out.logtype.push(VAR_PLACEHOLDER);
                        out.vars.push(value);
                    }
                    _ => {
                        out.logtype.push(DICT_PLACEHOLDER);
                        out.push_dict_var(token)
                            .map_err(|e| EngineError::Encode(e.to_string()))?;
                    }
                }
            } else {
                while pos < bytes.len() && !is_token_byte(bytes[pos]) {
                    pos += 1;
                }
                push_escaped(&mut out.logtype, &text[start..pos]);
            }
        }
        Ok(())
    }

    fn decode_message(
        &mut self,
        msg: &EncodedMessage,
        out: &mut String,
    ) -> Result<(), EngineError> {
        out.clear();
        let mut vars = msg.vars.iter();
        let mut dict_vars = msg.dict_var_iter();
        let mut chars = msg.logtype.chars();
        while let Some(c) = chars.next() {
            match c {
                ESCAPE => match chars.next() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(EngineError::Decode("dangling escape in log type".into())),
                },
                VAR_PLACEHOLDER => {
                    let var = vars.next().ok_or_else(|| {
                        EngineError::Decode("log type references a missing variable".into())
                    })?;
                    out.push_str(&var.to_string());
                }
                DICT_PLACEHOLDER => {
                    let var = dict_vars.next().ok_or_else(|| {
                        EngineError::Decode(
                            "log type references a missing dictionary variable".into(),
                        )
                    })?;
                    out.push_str(var);
                }
                other => out.push(other),
            }
        }
        if vars.next().is_some() || dict_vars.next().is_some() {
            return Err(EngineError::Decode(
                "variables left over after log type".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
