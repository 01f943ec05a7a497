// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod decode;
pub mod encode;
pub mod info;
pub mod search;

use irs_core::{IrReader, ReaderConfig, TokenEngine, TracedEngine};
use std::io::Read;
use std::path::Path;

/// Reader every reading command uses
pub(crate) type StreamReader = IrReader<Box<dyn Read>, TracedEngine<TokenEngine>>;

pub(crate) fn open_reader(
    input: Option<&Path>,
    zstd: bool,
    config: &ReaderConfig,
) -> anyhow::Result<StreamReader> {
    use anyhow::Context;

    let source = crate::streams::open_input(input, zstd)?;
    IrReader::open_with(source, TracedEngine::new(TokenEngine::new()), config.clone())
        .context("failed to read IR preamble")
}
