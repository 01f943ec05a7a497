// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `irs encode` - Encode log lines into an IR stream

use anyhow::Context;
use clap::{Args, ValueEnum};
use irs_core::{
    now_ms, EncodingVariant, EpochTimeMs, IrWriter, TokenEngine, TracedEngine, WriterConfig,
};
use std::io::BufRead;
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::output::{parse_event, EventFormat};
use crate::streams::{open_input, Output};

/// Buffered IR bytes are drained to the output past this size
const DRAIN_THRESHOLD: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VariantArg {
    /// 32-bit variables, delta timestamps
    Four,
    /// 64-bit variables, absolute timestamps
    Eight,
}

impl From<VariantArg> for EncodingVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Four => EncodingVariant::FourByte,
            VariantArg::Eight => EncodingVariant::EightByte,
        }
    }
}

#[derive(Args)]
pub struct EncodeArgs {
    /// Log lines to encode (stdin when omitted or `-`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// IR stream destination (stdout when omitted or `-`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Encoding variant; defaults to the config file, then eight
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Format of the input lines
    #[arg(long, value_enum, default_value = "jsonl")]
    pub format: EventFormat,

    /// Compress the IR stream with zstd
    #[arg(long)]
    pub zstd: bool,

    /// Timestamp pattern recorded in the preamble
    #[arg(long)]
    pub timestamp_pattern: Option<String>,

    /// Syntax of the timestamp pattern
    #[arg(long)]
    pub timestamp_syntax: Option<String>,

    /// Time zone ID recorded in the preamble
    #[arg(long)]
    pub tz: Option<String>,

    /// Reference timestamp for four-byte streams (ms since epoch)
    #[arg(long)]
    pub reference_timestamp: Option<EpochTimeMs>,
}

impl EncodeArgs {
    fn writer_config(&self, base: &WriterConfig) -> WriterConfig {
        let mut config = base.clone();
        if let Some(variant) = self.variant {
            config.variant = variant.into();
        }
        if let Some(pattern) = &self.timestamp_pattern {
            config.timestamp_info.pattern = pattern.clone();
        }
        if let Some(syntax) = &self.timestamp_syntax {
            config.timestamp_info.pattern_syntax = syntax.clone();
        }
        if let Some(tz) = &self.tz {
            config.timestamp_info.time_zone_id = tz.clone();
        }
        if let Some(reference) = self.reference_timestamp {
            config.reference_timestamp = Some(reference);
        }
        config
    }
}

pub fn handle(args: EncodeArgs, config: &CliConfig) -> anyhow::Result<()> {
    let writer_config = args.writer_config(&config.writer);
    let mut writer = IrWriter::with_engine(TracedEngine::new(TokenEngine::new()), writer_config)
        .context("failed to start IR stream")?;

    let input = std::io::BufReader::new(open_input(args.input.as_deref(), false)?);
    let mut out = Output::create(args.output.as_deref(), args.zstd)?;

    let mut count = 0usize;
    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        let Some(event) = parse_event(&line, args.format, now_ms())
            .with_context(|| format!("invalid input on line {line_no}"))?
        else {
            continue;
        };
        writer
            .write_log_event(&event)
            .with_context(|| format!("failed to encode line {line_no}"))?;
        count += 1;

        if writer.bytes().len() >= DRAIN_THRESHOLD {
            writer.write_to(&mut out).context("failed to write IR stream")?;
        }
    }

    writer.close_to(&mut out).context("failed to write IR stream")?;
    out.finish()?;
    tracing::info!(events = count, variant = %writer.variant(), "encoded stream");
    Ok(())
}
