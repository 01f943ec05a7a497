// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming IR writer
//!
//! Frames accumulate in memory until drained to a sink. The preamble is
//! written once at construction and the terminator once at close.

use std::io::{ErrorKind, Write};

use crate::adapters::{MessageEngine, TokenEngine};
use crate::codec::LogEventCodec;
use crate::config::WriterConfig;
use crate::error::{IrError, IrResult};
use crate::event::{EpochTimeMs, LogEvent};
use crate::preamble::Preamble;
use crate::timestamp::now_ms;
use crate::wire::{EncodingVariant, TAG_EOF};

/// Writer producing one IR stream
pub struct IrWriter<E = TokenEngine> {
    codec: LogEventCodec<E>,
    preamble: Preamble,
    buf: Vec<u8>,
    /// Prefix of `buf` already handed to a sink
    drained: usize,
    closed: bool,
}

impl IrWriter<TokenEngine> {
    pub fn new(config: WriterConfig) -> IrResult<Self> {
        Self::with_engine(TokenEngine::new(), config)
    }
}

impl<E: MessageEngine> IrWriter<E> {
    /// Create a writer and buffer its preamble.
    ///
    /// FourByte streams without a configured reference timestamp use the
    /// current time.
    pub fn with_engine(engine: E, config: WriterConfig) -> IrResult<Self> {
        let mut preamble = Preamble::new(config.variant, config.timestamp_info);
        if config.variant == EncodingVariant::FourByte {
            preamble.reference_timestamp = Some(config.reference_timestamp.unwrap_or_else(now_ms));
        }

        let mut buf = Vec::with_capacity(config.initial_buffer_size);
        preamble.serialize(&mut buf)?;
        tracing::debug!(
            variant = %preamble.variant,
            reference_timestamp = ?preamble.reference_timestamp,
            "created IR writer"
        );

        Ok(Self {
            codec: LogEventCodec::for_preamble(engine, &preamble),
            preamble,
            buf,
            drained: 0,
            closed: false,
        })
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    pub fn variant(&self) -> EncodingVariant {
        self.preamble.variant
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Append an event, preceded by a UTC offset change if the event
    /// carries an offset different from the current one.
    ///
    /// Returns the number of bytes buffered. A failed encode also drops the
    /// offset change.
    pub fn write_log_event(&mut self, event: &LogEvent) -> IrResult<usize> {
        self.ensure_open()?;
        let mark = self.buf.len();
        let prev_offset = self.codec.utc_offset();
        if let Some(offset) = event.utc_offset {
            if prev_offset != Some(offset) {
                self.write_utc_offset_change(offset)?;
            }
        }
        match self.codec.encode(&event.message, event.timestamp) {
            Ok(frame) => {
                self.buf.extend_from_slice(frame);
                Ok(self.buf.len() - mark)
            }
            Err(e) => {
                self.buf.truncate(mark);
                self.codec.restore_utc_offset(prev_offset);
                Err(e)
            }
        }
    }

    /// Append an event from its parts.
    pub fn write(&mut self, message: &str, timestamp: EpochTimeMs) -> IrResult<usize> {
        self.ensure_open()?;
        let frame = self.codec.encode(message, timestamp)?;
        self.buf.extend_from_slice(frame);
        Ok(frame.len())
    }

    /// Append a UTC offset change applying to every later event.
    pub fn write_utc_offset_change(&mut self, offset: EpochTimeMs) -> IrResult<usize> {
        self.ensure_open()?;
        let frame = self.codec.encode_utc_offset_change(offset);
        self.buf.extend_from_slice(frame);
        Ok(frame.len())
    }

    /// Append the terminator. Repeated calls do nothing.
    pub fn close(&mut self) {
        if !self.closed {
            self.buf.push(TAG_EOF);
            self.closed = true;
            tracing::debug!(pending = self.bytes().len(), "closed IR writer");
        }
    }

    /// Close and drain everything to `sink`.
    pub fn close_to<W: Write>(&mut self, sink: &mut W) -> IrResult<usize> {
        self.close();
        self.write_to(sink)
    }

    /// Bytes buffered but not yet drained
    pub fn bytes(&self) -> &[u8] {
        &self.buf[self.drained..]
    }

    /// Discard buffered bytes.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.drained = 0;
    }

    /// Drain buffered bytes into `sink`.
    ///
    /// The buffer is emptied only when every byte was accepted. After a
    /// failure, [`bytes`](Self::bytes) holds exactly what the sink has not
    /// taken, and a later call resumes from there.
    pub fn write_to<W: Write>(&mut self, sink: &mut W) -> IrResult<usize> {
        let mut written = 0;
        while self.drained < self.buf.len() {
            match sink.write(&self.buf[self.drained..]) {
                Ok(0) => {
                    return Err(IrError::Io(std::io::Error::new(
                        ErrorKind::WriteZero,
                        "sink accepted no bytes",
                    )))
                }
                Ok(n) => {
                    self.drained += n;
                    written += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!(error = %e, remaining = self.bytes().len(), "partial drain");
                    return Err(e.into());
                }
            }
        }
        self.reset();
        Ok(written)
    }

    /// Drain buffered bytes and flush `sink`.
    pub fn flush<W: Write>(&mut self, sink: &mut W) -> IrResult<usize> {
        let written = self.write_to(sink)?;
        sink.flush()?;
        Ok(written)
    }

    /// Take the undrained bytes, consuming the writer.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf.drain(..self.drained);
        self.buf
    }

    fn ensure_open(&self) -> IrResult<()> {
        if self.closed {
            Err(IrError::Closed)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
