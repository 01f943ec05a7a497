//! Preamble inspection specs

use crate::prelude::*;

#[test]
fn info_reports_preamble_as_json() {
    let temp = Project::empty();
    temp.encoded(
        "events.ir",
        SAMPLE_EVENTS,
        &[
            "--variant",
            "four",
            "--reference-timestamp",
            "1700000000000",
            "--tz",
            "America/Toronto",
            "--timestamp-pattern",
            "%Y-%m-%d %H:%M:%S,%3",
        ],
    );
    let run = temp.irs().args(&["info", "-i", "events.ir"]).passes();
    let info: Value = serde_json::from_str(&run.stdout()).unwrap();

    assert_eq!(info["variant"], "four_byte");
    assert_eq!(info["version"], "v0.0.1");
    assert_eq!(info["time_zone_id"], "America/Toronto");
    assert_eq!(info["timestamp_pattern"], "%Y-%m-%d %H:%M:%S,%3");
    assert_eq!(info["reference_timestamp"], 1_700_000_000_000_i64);
}

#[test]
fn eight_byte_streams_have_no_reference() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &["--reference-timestamp", "5"]);
    let run = temp.irs().args(&["info", "-i", "events.ir"]).passes();
    let info: Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(info["variant"], "eight_byte");
    assert!(info["reference_timestamp"].is_null());
}

#[test]
fn info_text_format() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &["--tz", "UTC"]);
    temp.irs()
        .args(&["info", "-i", "events.ir", "--format", "text"])
        .passes()
        .stdout_has("variant:             eight-byte")
        .stdout_has("time zone:           UTC");
}

#[test]
fn info_reads_zstd_streams() {
    let temp = Project::empty();
    temp.encoded("events.ir.zst", SAMPLE_EVENTS, &["--zstd", "--variant", "four"]);
    let run = temp
        .irs()
        .args(&["info", "-i", "events.ir.zst", "--zstd"])
        .passes();
    let info: Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(info["variant"], "four_byte");
}

#[test]
fn info_rejects_future_major_version() {
    let temp = Project::empty();
    let json = br#"{"VERSION":"v1.0.0","TZ_ID":"UTC"}"#;
    let mut bytes = vec![0x08, 0x01];
    bytes.extend_from_slice(&(json.len() as u16).to_be_bytes());
    bytes.extend_from_slice(json);
    bytes.push(0x00);
    temp.file("future.ir", bytes);

    temp.irs()
        .args(&["info", "-i", "future.ir"])
        .fails()
        .stderr_has("unsupported version");
}
