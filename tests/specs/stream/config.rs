//! Config file specs

use crate::prelude::*;

const FOUR_BYTE_CONFIG: &str = r#"
[writer]
variant = "four_byte"
reference_timestamp = 1700000000000

[writer.timestamp_info]
time_zone_id = "Asia/Tokyo"

[reader]
initial_buffer_size = 1
growth = "full"
"#;

#[test]
fn config_sets_writer_defaults() {
    let temp = Project::empty();
    temp.file("irs.toml", FOUR_BYTE_CONFIG);
    temp.encoded("events.ir", SAMPLE_EVENTS, &["--config", "irs.toml"]);

    let run = temp.irs().args(&["info", "-i", "events.ir"]).passes();
    let info: Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(info["variant"], "four_byte");
    assert_eq!(info["time_zone_id"], "Asia/Tokyo");
    assert_eq!(info["reference_timestamp"], 1_700_000_000_000_i64);
}

#[test]
fn flags_override_config() {
    let temp = Project::empty();
    temp.file("irs.toml", FOUR_BYTE_CONFIG);
    temp.encoded(
        "events.ir",
        SAMPLE_EVENTS,
        &["--config", "irs.toml", "--variant", "eight", "--tz", "UTC"],
    );

    let run = temp.irs().args(&["info", "-i", "events.ir"]).passes();
    let info: Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(info["variant"], "eight_byte");
    assert_eq!(info["time_zone_id"], "UTC");
}

#[test]
fn tiny_read_buffer_still_decodes() {
    let temp = Project::empty();
    temp.file("irs.toml", FOUR_BYTE_CONFIG);
    temp.encoded("events.ir", SAMPLE_EVENTS, &[]);
    temp.irs()
        .args(&["--config", "irs.toml", "decode", "-i", "events.ir"])
        .passes()
        .stdout_eq(SAMPLE_EVENTS);
}

#[test]
fn unknown_config_section_fails() {
    let temp = Project::empty();
    temp.file("irs.toml", "[daemon]\nport = 1\n");
    temp.irs()
        .args(&["--config", "irs.toml", "decode", "-i", "events.ir"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn missing_config_file_fails() {
    let temp = Project::empty();
    temp.irs()
        .args(&["--config", "nope.toml", "info"])
        .fails()
        .stderr_has("failed to read config");
}
