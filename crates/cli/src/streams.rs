// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input and output streams: files or stdio, optionally zstd-compressed

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Compression level for zstd output
const ZSTD_LEVEL: i32 = 3;

/// `None` for stdio, spelled as no path or `-`
fn file_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| *p != Path::new("-"))
}

/// Open `path` (stdin when absent or `-`) for reading.
pub fn open_input(path: Option<&Path>, zstd: bool) -> anyhow::Result<Box<dyn Read>> {
    let raw: Box<dyn Read> = match file_path(path) {
        Some(p) => Box::new(BufReader::new(
            File::open(p).with_context(|| format!("failed to open {}", p.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin().lock())),
    };
    if zstd {
        let decoder = zstd::stream::read::Decoder::new(raw)
            .context("failed to start zstd decompression")?;
        Ok(Box::new(decoder))
    } else {
        Ok(raw)
    }
}

/// Destination for command output. Must be finished to flush compressed
/// trailers.
pub enum Output {
    Plain(Box<dyn Write>),
    Zstd(zstd::stream::write::Encoder<'static, Box<dyn Write>>),
}

impl Output {
    /// Create `path` (stdout when absent or `-`).
    pub fn create(path: Option<&Path>, zstd: bool) -> anyhow::Result<Self> {
        let raw: Box<dyn Write> = match file_path(path) {
            Some(p) => Box::new(BufWriter::new(
                File::create(p).with_context(|| format!("failed to create {}", p.display()))?,
            )),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };
        if zstd {
            let encoder = zstd::stream::write::Encoder::new(raw, ZSTD_LEVEL)
                .context("failed to start zstd compression")?;
            Ok(Output::Zstd(encoder))
        } else {
            Ok(Output::Plain(raw))
        }
    }

    pub fn finish(self) -> anyhow::Result<()> {
        let mut inner = match self {
            Output::Plain(w) => w,
            Output::Zstd(encoder) => encoder.finish().context("failed to finish zstd stream")?,
        };
        inner.flush().context("failed to flush output")?;
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Plain(w) => w.write(buf),
            Output::Zstd(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Plain(w) => w.flush(),
            Output::Zstd(encoder) => encoder.flush(),
        }
    }
}
