//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};
use teamgraph::domain::{Person, PersonId, PersonRecord};
use teamgraph::snapshot::Snapshot;

/// Run the teamgraph binary in `dir` with colors and logging off.
pub fn run_teamgraph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_teamgraph"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute teamgraph binary")
}

/// Run with `--json` and parse stdout, asserting success.
pub fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_teamgraph_in_dir(dir, &full);
    assert!(
        output.status.success(),
        "teamgraph {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

/// Snapshot from `(id, teammates)` pairs, named `P<id>`.
pub fn snapshot_of(entries: &[(u64, &[u64])]) -> Snapshot {
    Snapshot::from_records(entries.iter().map(|&(id, teammates)| PersonRecord {
        person: Person::new(id, format!("P{id}")),
        teammates: teammates.iter().copied().map(PersonId).collect(),
    }))
}

/// Ids of a list of people.
pub fn ids(people: &[&Person]) -> Vec<u64> {
    people.iter().map(|person| person.id.get()).collect()
}
