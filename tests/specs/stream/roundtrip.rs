//! Encode/decode round-trip specs

use crate::prelude::*;

#[test]
fn eight_byte_roundtrip_reproduces_jsonl() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &[]);
    temp.irs()
        .args(&["decode", "-i", "events.ir"])
        .passes()
        .stdout_eq(SAMPLE_EVENTS);
}

#[test]
fn four_byte_roundtrip_reproduces_jsonl() {
    let temp = Project::empty();
    temp.encoded(
        "events.ir",
        SAMPLE_EVENTS,
        &["--variant", "four", "--reference-timestamp", "1700000000000"],
    );
    temp.irs()
        .args(&["decode", "-i", "events.ir"])
        .passes()
        .stdout_eq(SAMPLE_EVENTS);
}

#[test]
fn zstd_roundtrip() {
    let temp = Project::empty();
    temp.encoded("events.ir.zst", SAMPLE_EVENTS, &["--zstd"]);
    // zstd frame magic
    assert_eq!(&temp.read("events.ir.zst")[..4], &[0x28, 0xb5, 0x2f, 0xfd]);
    temp.irs()
        .args(&["decode", "-i", "events.ir.zst", "--zstd"])
        .passes()
        .stdout_eq(SAMPLE_EVENTS);
}

#[test]
fn stdin_to_stdout_pipeline() {
    let temp = Project::empty();
    let encoded = temp.irs().args(&["encode"]).stdin(SAMPLE_EVENTS).passes();
    let ir = encoded.stdout_bytes().to_vec();
    assert_eq!(ir[0], 0x08);
    assert_eq!(ir.last(), Some(&0x00));

    temp.irs()
        .args(&["decode", "-i", "-"])
        .stdin(ir)
        .passes()
        .stdout_eq(SAMPLE_EVENTS);
}

#[test]
fn text_lines_roundtrip_as_messages() {
    let temp = Project::empty();
    let lines = "plain line one\nuser=alice id=0x1f logged in\n\\escaped\\ text\n";
    temp.file("app.log", lines);
    temp.irs()
        .args(&["encode", "-i", "app.log", "-o", "app.ir", "--format", "text"])
        .passes();
    temp.irs()
        .args(&["decode", "-i", "app.ir", "--format", "text", "-o", "app.txt"])
        .passes();
    assert_eq!(String::from_utf8(temp.read("app.txt")).unwrap(), lines);
}

#[test]
fn blank_jsonl_lines_are_skipped() {
    let temp = Project::empty();
    let input = format!("\n{SAMPLE_EVENTS}\n   \n");
    temp.encoded("events.ir", &input, &[]);
    let run = temp.irs().args(&["decode", "-i", "events.ir"]).passes();
    assert_eq!(run.json_lines().len(), 3);
}

#[test]
fn empty_input_yields_empty_stream() {
    let temp = Project::empty();
    temp.encoded("empty.ir", "", &[]);
    temp.irs()
        .args(&["decode", "-i", "empty.ir"])
        .passes()
        .stdout_eq("");
}

#[test]
fn verbose_logging_goes_to_stderr() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &[]);
    let run = temp
        .irs()
        .args(&["-v", "decode", "-i", "events.ir"])
        .passes()
        .stdout_eq(SAMPLE_EVENTS);
    assert!(run.stderr().contains("decoded stream"));
}
