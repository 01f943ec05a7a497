// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame-level encoding and decoding of log events
//!
//! The codec works on caller-supplied byte slices and never performs I/O.
//! Decoding a slice that ends mid-frame yields `IncompleteData` and leaves
//! the codec exactly as it was, so the caller can append bytes and retry.

use crate::adapters::MessageEngine;
use crate::error::{IrError, IrResult};
use crate::event::{EpochTimeMs, LogEventView};
use crate::message::EncodedMessage;
use crate::preamble::Preamble;
use crate::query::{MergedWildcardQuery, TimestampInterval};
use crate::timestamp::TimestampCodec;
use crate::varint;
use crate::wire::{
    EncodingVariant, FrameCursor, TAG_EOF, TAG_LOG_EVENT, TAG_UTC_OFFSET_CHANGE,
};

/// Outcome of scanning for the next matching event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// An event matched; its text is available through
    /// [`LogEventCodec::last_event`]
    Matched { query_index: usize, consumed: usize },
    /// The slice ran out mid-frame after skipping `consumed` bytes
    NeedMore { consumed: usize },
    /// The next event is at or past the interval's upper bound; it starts
    /// `consumed` bytes in and has not been consumed
    PastInterval { consumed: usize },
}

enum Frame {
    Event { timestamp: EpochTimeMs },
    UtcOffset(EpochTimeMs),
}

/// Per-stream encoder/decoder state
pub struct LogEventCodec<E> {
    variant: EncodingVariant,
    engine: E,
    timestamps: TimestampCodec,
    /// Offset in effect for the next event
    utc_offset: Option<EpochTimeMs>,
    scratch: EncodedMessage,
    text: String,
    /// Timestamp and offset of the event whose text is in `text`
    last: Option<(EpochTimeMs, Option<EpochTimeMs>)>,
    frame: Vec<u8>,
}

impl<E: MessageEngine> LogEventCodec<E> {
    pub fn new(engine: E, variant: EncodingVariant, reference: Option<EpochTimeMs>) -> Self {
        Self {
            variant,
            engine,
            timestamps: TimestampCodec::for_variant(variant, reference),
            utc_offset: None,
            scratch: EncodedMessage::default(),
            text: String::new(),
            last: None,
            frame: Vec::new(),
        }
    }

    pub fn for_preamble(engine: E, preamble: &Preamble) -> Self {
        Self::new(engine, preamble.variant, preamble.reference_timestamp)
    }

    pub fn variant(&self) -> EncodingVariant {
        self.variant
    }

    /// Previous timestamp of a delta-encoded stream
    pub fn prev_timestamp(&self) -> Option<EpochTimeMs> {
        self.timestamps.prev()
    }

    pub fn utc_offset(&self) -> Option<EpochTimeMs> {
        self.utc_offset
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// The most recently decoded event, if any
    pub fn last_event(&self) -> Option<LogEventView<'_>> {
        self.last.map(|(timestamp, utc_offset)| LogEventView {
            message: &self.text,
            timestamp,
            utc_offset,
        })
    }

    /// Decode the next event at the front of `buf`.
    ///
    /// Returns the event and the bytes consumed, including any UTC offset
    /// frames preceding it.
    pub fn decode_next(&mut self, buf: &[u8]) -> IrResult<(LogEventView<'_>, usize)> {
        let mut pos = 0;
        let mut pending_offset = self.utc_offset;
        loop {
            let (frame, used) = self.parse_frame(&buf[pos..])?;
            pos += used;
            match frame {
                Frame::UtcOffset(offset) => pending_offset = Some(offset),
                Frame::Event { timestamp } => {
                    if let Err(e) = self.engine.decode_message(&self.scratch, &mut self.text) {
                        self.last = None;
                        return Err(e.into());
                    }
                    self.timestamps.commit(timestamp);
                    self.utc_offset = pending_offset;
                    self.last = Some((timestamp, pending_offset));
                    let view = LogEventView {
                        message: &self.text,
                        timestamp,
                        utc_offset: pending_offset,
                    };
                    return Ok((view, pos));
                }
            }
        }
    }

    /// Skip events until one lies in `interval` and matches `query`.
    ///
    /// Unlike [`decode_next`](Self::decode_next), progress is committed frame
    /// by frame: every byte reported as consumed has been applied to the
    /// codec state. Events below the interval are skipped without decoding
    /// their text. On error nothing is consumed and the codec is left as it
    /// was before the call.
    pub fn scan_matching(
        &mut self,
        buf: &[u8],
        query: &MergedWildcardQuery,
        interval: TimestampInterval,
    ) -> IrResult<Scan> {
        let timestamps = self.timestamps;
        let utc_offset = self.utc_offset;
        let result = self.scan(buf, query, interval);
        if result.is_err() {
            self.timestamps = timestamps;
            self.utc_offset = utc_offset;
            self.last = None;
        }
        result
    }

    fn scan(
        &mut self,
        buf: &[u8],
        query: &MergedWildcardQuery,
        interval: TimestampInterval,
    ) -> IrResult<Scan> {
        let mut pos = 0;
        loop {
            let (frame, used) = match self.parse_frame(&buf[pos..]) {
                Ok(parsed) => parsed,
                Err(IrError::IncompleteData) => return Ok(Scan::NeedMore { consumed: pos }),
                Err(e) => return Err(e),
            };
            let timestamp = match frame {
                Frame::UtcOffset(offset) => {
                    self.utc_offset = Some(offset);
                    pos += used;
                    continue;
                }
                Frame::Event { timestamp } => timestamp,
            };
            if interval.is_past(timestamp) {
                return Ok(Scan::PastInterval { consumed: pos });
            }
            if timestamp < interval.lower {
                self.timestamps.commit(timestamp);
                pos += used;
                continue;
            }

            self.engine.decode_message(&self.scratch, &mut self.text)?;
            self.timestamps.commit(timestamp);
            pos += used;
            self.last = Some((timestamp, self.utc_offset));
            if let Some(query_index) = query.first_match(&self.text) {
                return Ok(Scan::Matched {
                    query_index,
                    consumed: pos,
                });
            }
        }
    }

    /// Parse one frame into `scratch`, resolving the event timestamp without
    /// committing it.
    fn parse_frame(&mut self, buf: &[u8]) -> IrResult<(Frame, usize)> {
        let mut cursor = FrameCursor::new(buf);
        let frame = match cursor.u8()? {
            TAG_EOF => return Err(IrError::EndOfStream),
            TAG_UTC_OFFSET_CHANGE => Frame::UtcOffset(cursor.signed_varint()?),
            TAG_LOG_EVENT => {
                self.scratch.read_body(&mut cursor, self.variant)?;
                let raw = match self.variant {
                    EncodingVariant::FourByte => cursor.signed_varint()?,
                    EncodingVariant::EightByte => cursor.i64_be()?,
                };
                Frame::Event {
                    timestamp: self.timestamps.decode(raw),
                }
            }
            other => {
                return Err(IrError::CorruptedStream(format!(
                    "unknown frame tag 0x{other:02x}"
                )))
            }
        };
        Ok((frame, cursor.position()))
    }

    /// Encode one event into a frame borrowed from the codec.
    ///
    /// The delta tracker advances only when the whole frame was built.
    pub fn encode(&mut self, message: &str, timestamp: EpochTimeMs) -> IrResult<&[u8]> {
        self.frame.clear();
        self.engine
            .encode_message(message, self.variant, &mut self.scratch)?;

        self.frame.push(TAG_LOG_EVENT);
        self.scratch.write_body(self.variant, &mut self.frame)?;
        let raw = self.timestamps.encode(timestamp);
        match self.variant {
            EncodingVariant::FourByte => varint::put_signed(&mut self.frame, raw),
            EncodingVariant::EightByte => self.frame.extend_from_slice(&raw.to_be_bytes()),
        }

        self.timestamps.commit(timestamp);
        Ok(&self.frame)
    }

    /// Put back the offset in effect before an abandoned offset change.
    pub(crate) fn restore_utc_offset(&mut self, offset: Option<EpochTimeMs>) {
        self.utc_offset = offset;
    }

    /// Encode a change of UTC offset applying to every later event.
    pub fn encode_utc_offset_change(&mut self, offset: EpochTimeMs) -> &[u8] {
        self.frame.clear();
        self.frame.push(TAG_UTC_OFFSET_CHANGE);
        varint::put_signed(&mut self.frame, offset);
        self.utc_offset = Some(offset);
        &self.frame
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
