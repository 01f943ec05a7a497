// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `irs info` - Show an IR stream's preamble

use clap::Args;
use irs_core::{EncodingVariant, EpochTimeMs, Preamble};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::open_reader;
use crate::config::CliConfig;
use crate::output::{print, OutputFormat};

#[derive(Args)]
pub struct InfoArgs {
    /// IR stream to inspect (stdin when omitted or `-`)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// The IR stream is zstd-compressed
    #[arg(long)]
    pub zstd: bool,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    variant: EncodingVariant,
    version: Option<String>,
    timestamp_pattern: String,
    timestamp_pattern_syntax: String,
    time_zone_id: String,
    reference_timestamp: Option<EpochTimeMs>,
}

impl From<&Preamble> for InfoOutput {
    fn from(p: &Preamble) -> Self {
        Self {
            variant: p.variant,
            version: p.version.clone(),
            timestamp_pattern: p.timestamp_info.pattern.clone(),
            timestamp_pattern_syntax: p.timestamp_info.pattern_syntax.clone(),
            time_zone_id: p.timestamp_info.time_zone_id.clone(),
            reference_timestamp: p.reference_timestamp,
        }
    }
}

impl fmt::Display for InfoOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "variant:             {}", self.variant)?;
        writeln!(
            f,
            "version:             {}",
            self.version.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "timestamp pattern:   {}", self.timestamp_pattern)?;
        writeln!(f, "pattern syntax:      {}", self.timestamp_pattern_syntax)?;
        write!(f, "time zone:           {}", self.time_zone_id)?;
        if let Some(reference) = self.reference_timestamp {
            write!(f, "\nreference timestamp: {reference}")?;
        }
        Ok(())
    }
}

pub fn handle(args: InfoArgs, config: &CliConfig) -> anyhow::Result<()> {
    let reader = open_reader(args.input.as_deref(), args.zstd, &config.reader)?;
    print(&InfoOutput::from(reader.preamble()), args.format);
    Ok(())
}
