// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming IR reader
//!
//! Pulls bytes from any [`Read`] source into a growable buffer and feeds them
//! to the codec one frame at a time. Short reads are never errors; the
//! reader keeps reading until a whole frame is available. End of stream,
//! corruption, and I/O failures close the session, and every later call
//! reports the same outcome.

use std::io::{ErrorKind, Read};

use crate::adapters::{MessageEngine, TokenEngine};
use crate::buffer::StreamBuffer;
use crate::codec::{LogEventCodec, Scan};
use crate::config::ReaderConfig;
use crate::error::{IrError, IrResult};
use crate::event::{EpochTimeMs, LogEvent, LogEventView, MatchedEvent, TimestampInfo};
use crate::preamble::{parse_preamble, Preamble};
use crate::query::{MergedWildcardQuery, TimestampInterval};
use crate::wire::EncodingVariant;

/// Reader over one IR stream
pub struct IrReader<R, E = TokenEngine> {
    input: StreamBuffer<R>,
    preamble: Preamble,
    /// Released on close
    codec: Option<LogEventCodec<E>>,
    /// Outcome every call reports once the session has ended
    terminal: Option<IrError>,
}

impl<R: Read> IrReader<R, TokenEngine> {
    /// Open a stream with the default engine and configuration.
    pub fn open(source: R) -> IrResult<Self> {
        Self::open_with(source, TokenEngine::new(), ReaderConfig::default())
    }
}

impl<R: Read, E: MessageEngine> IrReader<R, E> {
    /// Open a stream, reading until its preamble has been parsed.
    ///
    /// A source that ends before the preamble is complete yields an
    /// `UnexpectedEof` I/O error.
    pub fn open_with(source: R, engine: E, config: ReaderConfig) -> IrResult<Self> {
        let mut input = StreamBuffer::new(source, config.initial_buffer_size, config.growth);
        let preamble = loop {
            match parse_preamble(input.pending()) {
                Ok((preamble, used)) => {
                    input.consume(used);
                    break preamble;
                }
                Err(IrError::IncompleteData) => {
                    if input.fill()? == 0 {
                        return Err(IrError::Io(std::io::Error::new(
                            ErrorKind::UnexpectedEof,
                            "stream ended inside the preamble",
                        )));
                    }
                }
                Err(e) => return Err(e),
            }
        };

        tracing::info!(
            variant = %preamble.variant,
            tz = %preamble.timestamp_info.time_zone_id,
            "opened IR stream"
        );
        let codec = LogEventCodec::for_preamble(engine, &preamble);
        Ok(Self {
            input,
            preamble,
            codec: Some(codec),
            terminal: None,
        })
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    pub fn timestamp_info(&self) -> &TimestampInfo {
        &self.preamble.timestamp_info
    }

    pub fn variant(&self) -> EncodingVariant {
        self.preamble.variant
    }

    /// Current size of the read buffer
    pub fn buffer_capacity(&self) -> usize {
        self.input.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.codec.is_none()
    }

    /// Decode the next event.
    ///
    /// Returns `Err(EndOfStream)` once the terminator has been read.
    pub fn read_next(&mut self) -> IrResult<LogEventView<'_>> {
        self.advance()?;
        self.current()
    }

    /// Decode events until one lies in `interval` and matches `query`.
    ///
    /// Returns `Err(IntervalExhausted)` when the next event is at or past
    /// the upper bound. That event stays unread and the session stays open.
    pub fn read_next_matching(
        &mut self,
        query: &MergedWildcardQuery,
        interval: TimestampInterval,
    ) -> IrResult<MatchedEvent<'_>> {
        self.check_open()?;
        let query_index = loop {
            let codec = match self.codec.as_mut() {
                Some(codec) => codec,
                None => return Err(IrError::Closed),
            };
            match codec.scan_matching(self.input.pending(), query, interval) {
                Ok(Scan::Matched {
                    query_index,
                    consumed,
                }) => {
                    self.input.consume(consumed);
                    break query_index;
                }
                Ok(Scan::NeedMore { consumed }) => {
                    self.input.consume(consumed);
                    self.refill()?;
                }
                Ok(Scan::PastInterval { consumed }) => {
                    self.input.consume(consumed);
                    return Err(IrError::IntervalExhausted);
                }
                Err(e) => return Err(self.latch(e)),
            }
        };
        Ok(MatchedEvent {
            event: self.current()?,
            query_index,
        })
    }

    /// Decode events until `pred` accepts one.
    pub fn read_to<F>(&mut self, mut pred: F) -> IrResult<LogEventView<'_>>
    where
        F: FnMut(&LogEventView<'_>) -> bool,
    {
        loop {
            self.advance()?;
            if pred(&self.current()?) {
                return self.current();
            }
        }
    }

    /// Decode events until one at or after `timestamp`.
    pub fn read_to_epoch_time(&mut self, timestamp: EpochTimeMs) -> IrResult<LogEventView<'_>> {
        self.read_to(|event| event.timestamp >= timestamp)
    }

    /// Decode events until one whose message contains `needle`.
    pub fn read_to_contains(&mut self, needle: &str) -> IrResult<LogEventView<'_>> {
        self.read_to(|event| event.message.contains(needle))
    }

    /// Decode events until one whose message starts with `prefix`.
    pub fn read_to_prefix(&mut self, prefix: &str) -> IrResult<LogEventView<'_>> {
        self.read_to(|event| event.message.starts_with(prefix))
    }

    /// Decode events until one whose message ends with `suffix`.
    pub fn read_to_suffix(&mut self, suffix: &str) -> IrResult<LogEventView<'_>> {
        self.read_to(|event| event.message.ends_with(suffix))
    }

    /// Release the engine. Later reads report `Closed`, or the outcome that
    /// already ended the session.
    pub fn close(&mut self) {
        if self.codec.take().is_some() {
            tracing::debug!("closed IR reader");
        }
        if self.terminal.is_none() {
            self.terminal = Some(IrError::Closed);
        }
    }

    /// Owned events until the end of the stream.
    pub fn into_events(self) -> Events<R, E> {
        Events {
            reader: self,
            done: false,
        }
    }

    fn check_open(&self) -> IrResult<()> {
        match &self.terminal {
            Some(err) => Err(err.duplicate()),
            None => Ok(()),
        }
    }

    /// Decode one event into the codec's buffers.
    fn advance(&mut self) -> IrResult<()> {
        self.check_open()?;
        loop {
            let codec = match self.codec.as_mut() {
                Some(codec) => codec,
                None => return Err(IrError::Closed),
            };
            let step = codec
                .decode_next(self.input.pending())
                .map(|(_, used)| used);
            match step {
                Ok(used) => {
                    self.input.consume(used);
                    return Ok(());
                }
                Err(IrError::IncompleteData) => self.refill()?,
                Err(e) => return Err(self.latch(e)),
            }
        }
    }

    fn current(&self) -> IrResult<LogEventView<'_>> {
        self.codec
            .as_ref()
            .and_then(LogEventCodec::last_event)
            .ok_or(IrError::Closed)
    }

    /// Read more bytes after the codec ran out mid-frame.
    fn refill(&mut self) -> IrResult<()> {
        match self.input.fill() {
            Ok(0) => Err(self.latch(IrError::CorruptedStream(
                "stream ended without a terminator".into(),
            ))),
            Ok(_) => Ok(()),
            Err(e) => Err(self.latch(e)),
        }
    }

    /// End the session with `err`, releasing the engine.
    fn latch(&mut self, err: IrError) -> IrError {
        if err.is_fatal() {
            tracing::error!(error = %err, "IR stream failed");
        } else {
            tracing::debug!(outcome = %err, "IR stream ended");
        }
        self.codec = None;
        self.terminal = Some(err.duplicate());
        err
    }
}

/// Iterator of owned events; see [`IrReader::into_events`]
pub struct Events<R, E> {
    reader: IrReader<R, E>,
    done: bool,
}

impl<R, E> Events<R, E> {
    pub fn into_reader(self) -> IrReader<R, E> {
        self.reader
    }
}

impl<R: Read, E: MessageEngine> Iterator for Events<R, E> {
    type Item = IrResult<LogEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_next() {
            Ok(view) => Some(Ok(view.to_owned_event())),
            Err(IrError::EndOfStream) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
