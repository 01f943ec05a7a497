// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! irs - encode, decode, and search IR log-event streams

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod config;
mod output;
mod streams;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{decode, encode, info, search};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "irs",
    version,
    about = "irs - streaming codec for IR log-event streams"
)]
struct Cli {
    /// TOML file with reader and writer defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more detail to stderr (repeat for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSONL or text log lines into an IR stream
    Encode(encode::EncodeArgs),
    /// Decode an IR stream into JSONL or text
    Decode(decode::DecodeArgs),
    /// Print events matching wildcard queries
    Search(search::SearchArgs),
    /// Show the stream preamble
    Info(info::InfoArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = config::CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Encode(args) => encode::handle(args, &config),
        Commands::Decode(args) => decode::handle(args, &config),
        Commands::Search(args) => search::handle(args, &config),
        Commands::Info(args) => info::handle(args, &config),
    }
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
