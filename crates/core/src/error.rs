// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure vocabulary shared by every stage of the codec

use thiserror::Error;

/// Errors produced while negotiating, encoding, or decoding an IR stream
#[derive(Debug, Error)]
pub enum IrError {
    /// The buffer ends inside a frame. Internal signal: the reader pulls more
    /// bytes and retries, so this never reaches callers of the reader.
    #[error("incomplete data")]
    IncompleteData,
    #[error("end of stream")]
    EndOfStream,
    #[error("corrupted stream: {0}")]
    CorruptedStream(String),
    #[error("corrupted metadata: {0}")]
    CorruptedMetadata(String),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),
    #[error("failed to encode log event: {0}")]
    EncodeFailure(String),
    #[error("failed to decode log event: {0}")]
    DecodeFailure(String),
    /// The next event lies at or beyond the upper bound of the search interval
    #[error("timestamp interval exhausted")]
    IntervalExhausted,
    #[error("stream is closed")]
    Closed,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for IrError {
    fn from(e: serde_json::Error) -> Self {
        IrError::CorruptedMetadata(e.to_string())
    }
}

impl IrError {
    /// Whether the session can no longer make progress after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IrError::CorruptedStream(_)
                | IrError::CorruptedMetadata(_)
                | IrError::UnsupportedVersion(_)
                | IrError::Io(_)
        )
    }

    /// Whether this error ends the session, either fatally or by a clean
    /// end of stream.
    pub fn is_terminal(&self) -> bool {
        self.is_fatal() || matches!(self, IrError::EndOfStream | IrError::Closed)
    }

    /// Rebuild an equivalent error so a latched terminal state can be
    /// reported again. `io::Error` is not `Clone`, so its kind and message
    /// are carried over instead.
    pub(crate) fn duplicate(&self) -> Self {
        match self {
            IrError::IncompleteData => IrError::IncompleteData,
            IrError::EndOfStream => IrError::EndOfStream,
            IrError::CorruptedStream(m) => IrError::CorruptedStream(m.clone()),
            IrError::CorruptedMetadata(m) => IrError::CorruptedMetadata(m.clone()),
            IrError::UnsupportedVersion(m) => IrError::UnsupportedVersion(m.clone()),
            IrError::EncodeFailure(m) => IrError::EncodeFailure(m.clone()),
            IrError::DecodeFailure(m) => IrError::DecodeFailure(m.clone()),
            IrError::IntervalExhausted => IrError::IntervalExhausted,
            IrError::Closed => IrError::Closed,
            IrError::Io(e) => IrError::Io(std::io::Error::new(e.kind(), e.to_string())),
        }
    }
}

pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
