// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `irs search` - Print events matching wildcard queries

use anyhow::Context;
use clap::Args;
use irs_core::{EpochTimeMs, IrError, MergedWildcardQuery, TimestampInterval, WildcardQuery};
use std::path::PathBuf;

use super::open_reader;
use crate::config::CliConfig;
use crate::output::{write_event, EventFormat};
use crate::streams::Output;

#[derive(Args)]
pub struct SearchArgs {
    /// Wildcard pattern over the whole message (repeatable; first match wins)
    #[arg(short, long = "query", required = true)]
    pub queries: Vec<String>,

    /// Match all queries case-insensitively
    #[arg(long)]
    pub ignore_case: bool,

    /// Earliest timestamp to report (inclusive, ms since epoch)
    #[arg(long, allow_negative_numbers = true)]
    pub from: Option<EpochTimeMs>,

    /// Stop before this timestamp (exclusive, ms since epoch)
    #[arg(long, allow_negative_numbers = true)]
    pub to: Option<EpochTimeMs>,

    /// IR stream to search (stdin when omitted or `-`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Format of the matching lines
    #[arg(long, value_enum, default_value = "jsonl")]
    pub format: EventFormat,

    /// The IR stream is zstd-compressed
    #[arg(long)]
    pub zstd: bool,
}

impl SearchArgs {
    fn query(&self) -> MergedWildcardQuery {
        MergedWildcardQuery::merge(
            self.queries
                .iter()
                .map(|q| WildcardQuery::new(q, !self.ignore_case)),
        )
    }

    fn interval(&self) -> TimestampInterval {
        TimestampInterval::new(
            self.from.unwrap_or(EpochTimeMs::MIN),
            self.to.unwrap_or(EpochTimeMs::MAX),
        )
    }
}

pub fn handle(args: SearchArgs, config: &CliConfig) -> anyhow::Result<()> {
    let query = args.query();
    let interval = args.interval();
    if interval.lower >= interval.upper {
        anyhow::bail!("--from must be earlier than --to");
    }

    let mut reader = open_reader(args.input.as_deref(), args.zstd, &config.reader)?;
    let mut out = Output::create(None, false)?;

    let mut matches = 0usize;
    loop {
        match reader.read_next_matching(&query, interval) {
            Ok(found) => {
                write_event(&mut out, &found.event, Some(found.query_index), args.format)
                    .context("failed to write output")?;
                matches += 1;
            }
            Err(IrError::EndOfStream | IrError::IntervalExhausted) => break,
            Err(e) => {
                return Err(e).with_context(|| format!("search failed after {matches} matches"));
            }
        }
    }

    out.finish()?;
    tracing::info!(matches, "search finished");
    Ok(())
}
