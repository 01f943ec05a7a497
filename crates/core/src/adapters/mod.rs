// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message engines: split free text into log type and variables, and back

pub mod token;
pub mod traced;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use token::TokenEngine;
pub use traced::TracedEngine;
pub use traits::{EngineError, MessageEngine};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{EngineCall, FakeEngine};
