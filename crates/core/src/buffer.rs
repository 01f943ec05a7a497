// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Growable read buffer over a byte source
//!
//! Holds `buf[consumed..filled]` as the bytes not yet handed to the codec.
//! Refilling first compacts those bytes to the front and doubles the buffer
//! when the growth policy says it is too full. The buffer never shrinks.

use std::io::{ErrorKind, Read};

use crate::config::GrowthPolicy;
use crate::error::IrResult;

pub(crate) struct StreamBuffer<R> {
    source: R,
    buf: Vec<u8>,
    consumed: usize,
    filled: usize,
    growth: GrowthPolicy,
    exhausted: bool,
}

impl<R: Read> StreamBuffer<R> {
    pub(crate) fn new(source: R, initial_size: usize, growth: GrowthPolicy) -> Self {
        Self {
            source,
            buf: vec![0; initial_size.max(1)],
            consumed: 0,
            filled: 0,
            growth,
            exhausted: false,
        }
    }

    /// Bytes read from the source but not yet consumed
    pub(crate) fn pending(&self) -> &[u8] {
        &self.buf[self.consumed..self.filled]
    }

    pub(crate) fn consume(&mut self, n: usize) {
        self.consumed = (self.consumed + n).min(self.filled);
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Make room and read once from the source.
    ///
    /// Returns the number of bytes added; 0 means the source is exhausted.
    pub(crate) fn fill(&mut self) -> IrResult<usize> {
        if self.exhausted {
            return Ok(0);
        }

        let unconsumed = self.filled - self.consumed;
        if self.consumed > 0 {
            self.buf.copy_within(self.consumed..self.filled, 0);
            self.consumed = 0;
            self.filled = unconsumed;
        }
        let capacity = self.buf.len();
        if self.growth.should_grow(unconsumed, capacity) || unconsumed == capacity {
            let grown = capacity.saturating_mul(2);
            tracing::debug!(from = capacity, to = grown, unconsumed, "growing read buffer");
            self.buf.resize(grown, 0);
        }

        loop {
            match self.source.read(&mut self.buf[self.filled..]) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(0);
                }
                Ok(n) => {
                    self.filled += n;
                    return Ok(n);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
