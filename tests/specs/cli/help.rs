//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let temp = Project::empty();
    temp.irs()
        .args(&["--help"])
        .passes()
        .stdout_has("encode")
        .stdout_has("decode")
        .stdout_has("search")
        .stdout_has("info");
}

#[test]
fn search_help_describes_queries() {
    let temp = Project::empty();
    temp.irs()
        .args(&["search", "--help"])
        .passes()
        .stdout_has("--query")
        .stdout_has("--ignore-case");
}

#[test]
fn missing_subcommand_fails() {
    let temp = Project::empty();
    temp.irs().fails().stderr_has("Usage");
}
