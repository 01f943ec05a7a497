//! Wildcard search specs

use crate::prelude::*;

fn search(temp: &Project, args: &[&str]) -> Vec<Value> {
    let mut full = vec!["search", "-i", "events.ir"];
    full.extend_from_slice(args);
    temp.irs().args(&full).passes().json_lines()
}

fn messages(found: &[Value]) -> Vec<&str> {
    found
        .iter()
        .map(|v| v["message"].as_str().unwrap())
        .collect()
}

#[test]
fn reports_first_matching_query_index() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &[]);
    let found = search(&temp, &["-q", "*task 12*", "-q", "ERROR*"]);

    assert_eq!(
        messages(&found),
        vec![
            "INFO task 12 started on node-7",
            "ERROR disk /dev/sda1 at 97.5% capacity",
            "INFO task 12 finished",
        ]
    );
    let indexes: Vec<u64> = found.iter().map(|v| v["query_index"].as_u64().unwrap()).collect();
    assert_eq!(indexes, vec![0, 1, 0]);
}

#[test]
fn queries_match_whole_message() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &[]);
    assert!(search(&temp, &["-q", "task"]).is_empty());
    assert_eq!(search(&temp, &["-q", "INFO task ?? finished"]).len(), 1);
}

#[test]
fn ignore_case_folds_ascii() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &[]);
    assert!(search(&temp, &["-q", "error*"]).is_empty());
    let found = search(&temp, &["-q", "error*", "--ignore-case"]);
    assert_eq!(messages(&found), vec!["ERROR disk /dev/sda1 at 97.5% capacity"]);
}

#[test]
fn interval_bounds_results() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &["--variant", "four"]);
    let found = search(
        &temp,
        &["-q", "*", "--from", "1700000000100", "--to", "1700000001000"],
    );
    assert_eq!(messages(&found), vec!["ERROR disk /dev/sda1 at 97.5% capacity"]);
    assert_eq!(found[0]["timestamp"], 1_700_000_000_250_i64);
}

#[test]
fn matches_carry_utc_offset() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &[]);
    let found = search(&temp, &["-q", "*finished"]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["utc_offset"], 3_600_000);
}

#[test]
fn text_format_prints_messages() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &[]);
    temp.irs()
        .args(&["search", "-i", "events.ir", "-q", "INFO*", "--format", "text"])
        .passes()
        .stdout_eq("INFO task 12 started on node-7\nINFO task 12 finished\n");
}

#[test]
fn query_is_required() {
    let temp = Project::empty();
    temp.encoded("events.ir", SAMPLE_EVENTS, &[]);
    temp.irs()
        .args(&["search", "-i", "events.ir"])
        .fails()
        .stderr_has("--query");
}
