// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `irs decode` - Decode an IR stream into log lines

use anyhow::Context;
use clap::Args;
use irs_core::IrError;
use std::path::PathBuf;

use super::open_reader;
use crate::config::CliConfig;
use crate::output::{write_event, EventFormat};
use crate::streams::Output;

#[derive(Args)]
pub struct DecodeArgs {
    /// IR stream to decode (stdin when omitted or `-`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Destination for decoded lines (stdout when omitted or `-`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Format of the decoded lines
    #[arg(long, value_enum, default_value = "jsonl")]
    pub format: EventFormat,

    /// The IR stream is zstd-compressed
    #[arg(long)]
    pub zstd: bool,
}

pub fn handle(args: DecodeArgs, config: &CliConfig) -> anyhow::Result<()> {
    let mut reader = open_reader(args.input.as_deref(), args.zstd, &config.reader)?;
    let mut out = Output::create(args.output.as_deref(), false)?;

    let mut count = 0usize;
    loop {
        match reader.read_next() {
            Ok(event) => {
                write_event(&mut out, &event, None, args.format)
                    .context("failed to write output")?;
                count += 1;
            }
            Err(IrError::EndOfStream) => break,
            Err(e) => {
                return Err(e).with_context(|| format!("failed after {count} events"));
            }
        }
    }

    out.finish()?;
    tracing::info!(events = count, "decoded stream");
    Ok(())
}
