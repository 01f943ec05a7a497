// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streams written to and read back from files through the public API

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use irs_core::{
    IrError, IrReader, IrWriter, LogEvent, MergedWildcardQuery, ReaderConfig, TimestampInfo,
    TimestampInterval, TokenEngine, TracedEngine, WildcardQuery, WriterConfig,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

fn events() -> Vec<LogEvent> {
    (0..500)
        .map(|i| {
            let level = if i % 7 == 0 { "WARN" } else { "INFO" };
            LogEvent::new(
                format!("{level} request {i} served by worker-{} in 0.{i}s", i % 4),
                1_700_000_000_000 + i * 13,
            )
        })
        .collect()
}

fn write_file(path: &std::path::Path, config: WriterConfig) {
    let mut sink = BufWriter::new(File::create(path).unwrap());
    let mut writer = IrWriter::with_engine(TracedEngine::new(TokenEngine::new()), config).unwrap();
    for (i, event) in events().iter().enumerate() {
        writer.write_log_event(event).unwrap();
        if i % 64 == 0 {
            writer.flush(&mut sink).unwrap();
        }
    }
    writer.close_to(&mut sink).unwrap();
    sink.flush().unwrap();
}

fn open(path: &std::path::Path) -> IrReader<BufReader<File>> {
    let file = BufReader::new(File::open(path).unwrap());
    IrReader::open_with(
        file,
        TokenEngine::new(),
        ReaderConfig::default().with_initial_buffer_size(32),
    )
    .unwrap()
}

#[test]
fn four_byte_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("four.ir");
    let info = TimestampInfo {
        time_zone_id: "Europe/Berlin".into(),
        ..TimestampInfo::default()
    };
    write_file(
        &path,
        WriterConfig::four_byte()
            .with_timestamp_info(info.clone())
            .with_reference_timestamp(1_700_000_000_000),
    );

    let reader = open(&path);
    assert_eq!(reader.timestamp_info(), &info);
    let decoded: Vec<LogEvent> = reader.into_events().map(Result::unwrap).collect();
    assert_eq!(decoded, events());
}

#[test]
fn eight_byte_file_supports_filtered_reads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eight.ir");
    write_file(&path, WriterConfig::eight_byte());

    let mut reader = open(&path);
    let query = MergedWildcardQuery::merge([WildcardQuery::new("warn request *", false)]);
    let interval = TimestampInterval::new(1_700_000_000_000, 1_700_000_000_000 + 13 * 100);

    let mut found = Vec::new();
    loop {
        match reader.read_next_matching(&query, interval) {
            Ok(m) => found.push(m.event.timestamp),
            Err(IrError::IntervalExhausted) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    let expected: Vec<i64> = (0..100)
        .filter(|i| i % 7 == 0)
        .map(|i| 1_700_000_000_000 + i * 13)
        .collect();
    assert_eq!(found, expected);
    assert!(reader.buffer_capacity() > 32);
}
