//! Shared helpers for black-box CLI specs.
//!
//! `Project` owns a scratch directory; `project.irs()` builds an invocation
//! of the binary rooted there, and `.passes()` / `.fails()` run it and
//! return a `RunAssert` for checking output.

use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub use serde_json::Value;

/// Three events with a variable, a dictionary token, and an offset change
pub const SAMPLE_EVENTS: &str = r#"{"timestamp":1700000000000,"message":"INFO task 12 started on node-7"}
{"timestamp":1700000000250,"message":"ERROR disk /dev/sda1 at 97.5% capacity"}
{"timestamp":1700000001000,"message":"INFO task 12 finished","utc_offset":3600000}
"#;

pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `content` to `name` inside the project
    pub fn file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.join(name)).unwrap()
    }

    pub fn irs(&self) -> CliBuilder {
        CliBuilder {
            cwd: self.path().to_path_buf(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Encode `events` (JSONL) into `name` with extra encode flags
    pub fn encoded(&self, name: &str, events: &str, flags: &[&str]) -> PathBuf {
        self.file("input.jsonl", events);
        let mut args = vec!["encode", "-i", "input.jsonl", "-o", name];
        args.extend_from_slice(flags);
        self.irs().args(&args).passes();
        self.join(name)
    }
}

pub struct CliBuilder {
    cwd: PathBuf,
    args: Vec<String>,
    stdin: Option<Vec<u8>>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    fn run(self) -> std::process::Output {
        let mut cmd = Command::cargo_bin("irs").unwrap();
        cmd.current_dir(&self.cwd)
            .args(&self.args)
            .env_remove("RUST_LOG");
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.output().unwrap()
    }

    /// Run and assert a zero exit status
    pub fn passes(self) -> RunAssert {
        let args = self.args.join(" ");
        let output = self.run();
        if !output.status.success() {
            panic!(
                "`irs {args}` failed\nstderr:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        RunAssert { output }
    }

    /// Run and assert a non-zero exit status
    pub fn fails(self) -> RunAssert {
        let args = self.args.join(" ");
        let output = self.run();
        if output.status.success() {
            panic!(
                "`irs {args}` unexpectedly passed\nstdout:\n{}",
                String::from_utf8_lossy(&output.stdout)
            );
        }
        RunAssert { output }
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stdout_bytes(&self) -> &[u8] {
        &self.output.stdout
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(needle),
            "stdout missing {needle:?}:\n{stdout}"
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout().as_str(), expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(needle),
            "stderr missing {needle:?}:\n{stderr}"
        );
        self
    }

    /// Parse stdout as one JSON value per line
    pub fn json_lines(&self) -> Vec<Value> {
        self.stdout()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}
