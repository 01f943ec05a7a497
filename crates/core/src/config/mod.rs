// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration modules

mod stream;

pub use stream::{GrowthPolicy, ReaderConfig, WriterConfig, DEFAULT_BUFFER_SIZE};
