// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine trait definition

use thiserror::Error;

use crate::error::IrError;
use crate::message::EncodedMessage;
use crate::wire::EncodingVariant;

/// Errors from message engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Encode(String),
    #[error("{0}")]
    Decode(String),
}

impl From<EngineError> for IrError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Encode(m) => IrError::EncodeFailure(m),
            EngineError::Decode(m) => IrError::DecodeFailure(m),
        }
    }
}

/// Converts between message text and its encoded parts.
///
/// Implementations write into caller-owned buffers so that a session can
/// reuse them across events. On error the contents of `out` are unspecified.
pub trait MessageEngine {
    /// Split `text` into `out`, replacing its contents
    fn encode_message(
        &mut self,
        text: &str,
        variant: EncodingVariant,
        out: &mut EncodedMessage,
    ) -> Result<(), EngineError>;

    /// Rebuild the text of `msg` into `out`, replacing its contents
    fn decode_message(&mut self, msg: &EncodedMessage, out: &mut String)
        -> Result<(), EngineError>;
}

impl<E: MessageEngine + ?Sized> MessageEngine for Box<E> {
    fn encode_message(
        &mut self,
        text: &str,
        variant: EncodingVariant,
        out: &mut EncodedMessage,
    ) -> Result<(), EngineError> {
        (**self).encode_message(text, variant, out)
    }

    fn decode_message(
        &mut self,
        msg: &EncodedMessage,
        out: &mut String,
    ) -> Result<(), EngineError> {
        (**self).decode_message(msg, out)
    }
}
