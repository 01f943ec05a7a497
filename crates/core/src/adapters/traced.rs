// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced engine wrapper for consistent observability

use super::traits::{EngineError, MessageEngine};
use crate::message::EncodedMessage;
use crate::wire::EncodingVariant;

/// Wrapper that adds tracing to any MessageEngine
#[derive(Debug, Clone, Default)]
pub struct TracedEngine<E> {
    inner: E,
}

impl<E> TracedEngine<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: MessageEngine> MessageEngine for TracedEngine<E> {
    fn encode_message(
        &mut self,
        text: &str,
        variant: EncodingVariant,
        out: &mut EncodedMessage,
    ) -> Result<(), EngineError> {
        let span = tracing::trace_span!("engine.encode", text_len = text.len(), %variant);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.encode_message(text, variant, out);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::trace!(
                vars = out.vars.len(),
                dict_vars = out.dict_var_end_offsets.len(),
                elapsed_us = elapsed.as_micros() as u64,
                "encoded"
            ),
            Err(e) => tracing::error!(
                elapsed_us = elapsed.as_micros() as u64,
                error = %e,
                "encode failed"
            ),
        }

        result
    }

    fn decode_message(
        &mut self,
        msg: &EncodedMessage,
        out: &mut String,
    ) -> Result<(), EngineError> {
        let span = tracing::trace_span!("engine.decode", logtype_len = msg.logtype.len());
        let _guard = span.enter();

        let result = self.inner.decode_message(msg, out);

        match &result {
            Ok(()) => tracing::trace!(message_len = out.len(), "decoded"),
            Err(e) => tracing::error!(error = %e, "decode failed"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
