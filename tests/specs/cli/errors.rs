//! Error reporting specs
//!
//! Verify failures exit non-zero with the cause on stderr.

use crate::prelude::*;

#[test]
fn decode_missing_file_fails() {
    let temp = Project::empty();
    temp.irs()
        .args(&["decode", "-i", "missing.ir"])
        .fails()
        .stderr_has("failed to open");
}

#[test]
fn decode_rejects_unknown_encoding_tag() {
    let temp = Project::empty();
    temp.file("garbage.ir", b"\xffnot an ir stream");
    temp.irs()
        .args(&["decode", "-i", "garbage.ir"])
        .fails()
        .stderr_has("failed to read IR preamble");
}

#[test]
fn decode_rejects_truncated_preamble() {
    let temp = Project::empty();
    temp.file("short.ir", [0x08, 0x01, 0x00]);
    temp.irs()
        .args(&["decode", "-i", "short.ir"])
        .fails()
        .stderr_has("stream ended inside the preamble");
}

#[test]
fn decode_reports_missing_terminator() {
    let temp = Project::empty();
    let path = temp.encoded("full.ir", SAMPLE_EVENTS, &[]);
    let mut bytes = std::fs::read(path).unwrap();
    assert_eq!(bytes.pop(), Some(0x00));
    temp.file("cut.ir", bytes);

    let run = temp
        .irs()
        .args(&["decode", "-i", "cut.ir"])
        .fails()
        .stderr_has("stream ended without a terminator");
    // Events before the cut were still written
    assert_eq!(run.stdout(), SAMPLE_EVENTS);
}

#[test]
fn encode_reports_bad_input_line() {
    let temp = Project::empty();
    temp.file("bad.jsonl", "{\"timestamp\":1,\"message\":\"ok\"}\n{not json}\n");
    temp.irs()
        .args(&["encode", "-i", "bad.jsonl", "-o", "out.ir"])
        .fails()
        .stderr_has("invalid input on line 2");
}

#[test]
fn four_byte_stream_survives_large_timestamp_jump() {
    let temp = Project::empty();
    temp.file(
        "ts.jsonl",
        "{\"timestamp\":0,\"message\":\"a\"}\n{\"timestamp\":9223372036854775807,\"message\":\"b\"}\n",
    );
    // Deltas wrap, so large jumps stay encodable in four-byte streams
    temp.irs()
        .args(&["encode", "-i", "ts.jsonl", "-o", "ts.ir", "--variant", "four"])
        .passes();
    temp.irs()
        .args(&["decode", "-i", "ts.ir"])
        .passes()
        .stdout_has("9223372036854775807");
}

#[test]
fn search_rejects_empty_interval() {
    let temp = Project::empty();
    temp.encoded("s.ir", SAMPLE_EVENTS, &[]);
    temp.irs()
        .args(&["search", "-q", "*", "--from", "10", "--to", "10", "-i", "s.ir"])
        .fails()
        .stderr_has("--from must be earlier than --to");
}
