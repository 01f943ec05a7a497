// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake engine with call recording for testing

use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{EngineError, MessageEngine};
use crate::message::EncodedMessage;
use crate::wire::EncodingVariant;

/// Recorded call to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Encode {
        text: String,
        variant: EncodingVariant,
    },
    Decode {
        logtype: String,
    },
}

#[derive(Default)]
struct FakeState {
    calls: Vec<EngineCall>,
    encode_fails: bool,
    decode_fails: bool,
}

/// Engine that stores the whole message as the log type.
///
/// Clones share state, so a test can keep a handle after moving the engine
/// into a session.
#[derive(Clone, Default)]
pub struct FakeEngine {
    state: Arc<Mutex<FakeState>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state().calls.clone()
    }

    /// Configure encoding to fail for testing error paths
    pub fn set_encode_fails(&self, fails: bool) {
        self.state().encode_fails = fails;
    }

    /// Configure decoding to fail for testing error paths
    pub fn set_decode_fails(&self, fails: bool) {
        self.state().decode_fails = fails;
    }
}

impl MessageEngine for FakeEngine {
    fn encode_message(
        &mut self,
        text: &str,
        variant: EncodingVariant,
        out: &mut EncodedMessage,
    ) -> Result<(), EngineError> {
        let mut state = self.state();
        state.calls.push(EngineCall::Encode {
            text: text.to_string(),
            variant,
        });
        if state.encode_fails {
            return Err(EngineError::Encode("injected encode failure".into()));
        }
        out.clear();
        out.logtype.push_str(text);
        Ok(())
    }

    fn decode_message(
        &mut self,
        msg: &EncodedMessage,
        out: &mut String,
    ) -> Result<(), EngineError> {
        let mut state = self.state();
        state.calls.push(EngineCall::Decode {
            logtype: msg.logtype.clone(),
        });
        if state.decode_fails {
            return Err(EngineError::Decode("injected decode failure".into()));
        }
        out.clear();
        out.push_str(&msg.logtype);
        Ok(())
    }
}
