// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config file loading
//!
//! ```toml
//! [writer]
//! variant = "four_byte"
//! initial_buffer_size = 65536
//!
//! [writer.timestamp_info]
//! pattern = "%Y-%m-%d %H:%M:%S,%3"
//! time_zone_id = "America/Toronto"
//!
//! [reader]
//! initial_buffer_size = 65536
//! growth = "half_full"
//! ```

use anyhow::Context;
use irs_core::{ReaderConfig, WriterConfig};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub writer: WriterConfig,
    pub reader: ReaderConfig,
}

impl CliConfig {
    /// Load `path`, or the defaults when no file was given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
