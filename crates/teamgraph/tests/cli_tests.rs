//! Integration tests for the teamgraph CLI.
//!
//! These run the built binary against temporary repositories.

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{run_json, run_teamgraph_in_dir};

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a repository initialized with the demo team
#[fixture]
fn demo_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let output = run_teamgraph_in_dir(temp.path(), &["init", "--demo", "--quiet"]);
    assert!(
        output.status.success(),
        "Failed to initialize teamgraph: {:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    temp
}

#[rstest]
fn help_lists_commands(temp_dir: TempDir) {
    let output = run_teamgraph_in_dir(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["init", "path", "degrees", "suggest", "ranking", "stats", "link"] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

#[rstest]
fn commands_fail_outside_a_repository(temp_dir: TempDir) {
    let output = run_teamgraph_in_dir(temp_dir.path(), &["ranking"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("teamgraph init"));
}

#[rstest]
fn init_twice_fails(demo_dir: TempDir) {
    let output = run_teamgraph_in_dir(demo_dir.path(), &["init"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already initialized"));
}

#[rstest]
fn path_by_name_in_text(demo_dir: TempDir) {
    let output = run_teamgraph_in_dir(demo_dir.path(), &["path", "Iris Johnson", "Frank Lopez"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Iris Johnson -> David Kim -> Alice Chen -> Jack Brown -> Grace Patel -> Frank Lopez"));
    assert!(stdout.contains("5 hops"));
}

#[rstest]
#[case::connected("1", "7", 2)]
#[case::same_person("3", "3", 0)]
#[case::unknown_id("1", "404", -1)]
fn degrees_json(demo_dir: TempDir, #[case] from: &str, #[case] to: &str, #[case] expected: i64) {
    let value = run_json(demo_dir.path(), &["degrees", from, to]);

    assert_eq!(value["degrees"], expected);
}

#[rstest]
fn suggest_uses_limit(demo_dir: TempDir) {
    let all = run_json(demo_dir.path(), &["suggest", "1"]);
    let limited = run_json(demo_dir.path(), &["suggest", "Alice Chen", "--limit", "1"]);

    assert_eq!(all.as_array().unwrap().len(), 4);
    assert_eq!(all[0]["name"], "Emma Wilson");
    assert_eq!(all[0]["mutual_connections"], 2);
    assert_eq!(limited.as_array().unwrap().len(), 1);
    assert_eq!(limited[0], all[0]);
}

#[rstest]
fn ranking_and_stats(demo_dir: TempDir) {
    let ranking = run_json(demo_dir.path(), &["ranking"]);
    let stats = run_json(demo_dir.path(), &["stats"]);

    assert_eq!(ranking.as_array().unwrap().len(), 10);
    assert_eq!(ranking[0]["name"], "Alice Chen");
    assert_eq!(ranking[0]["connections"], 4);
    assert_eq!(stats["people"], 10);
    assert_eq!(stats["relationships"], 12);
    assert_eq!(stats["components"], 1);
}

#[rstest]
fn people_filters(demo_dir: TempDir) {
    let developers = run_json(demo_dir.path(), &["people", "--role", "Developer"]);
    let searched = run_json(demo_dir.path(), &["people", "--search", "SMITH"]);

    assert_eq!(developers.as_array().unwrap().len(), 4);
    assert_eq!(searched[0]["name"], "Bob Smith");
}

#[rstest]
fn show_unknown_person_fails(demo_dir: TempDir) {
    let output = run_teamgraph_in_dir(demo_dir.path(), &["show", "Nobody Here"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No person named"));
}

#[rstest]
fn editing_changes_later_queries(demo_dir: TempDir) {
    let dir = demo_dir.path();

    let added = run_json(dir, &["add", "Kim Lee", "--role", "QA"]);
    assert_eq!(added["id"], 11);
    assert_eq!(run_json(dir, &["isolated"])[0]["name"], "Kim Lee");

    run_json(dir, &["link", "11", "Frank Lopez"]);
    assert_eq!(run_json(dir, &["degrees", "11", "7"])["degrees"], 2);

    run_json(dir, &["unlink", "Frank Lopez", "Kim Lee"]);
    assert_eq!(run_json(dir, &["degrees", "11", "7"])["degrees"], -1);

    run_json(dir, &["remove", "11"]);
    assert_eq!(run_json(dir, &["stats"])["people"], 10);
}

#[rstest]
fn self_link_is_rejected(demo_dir: TempDir) {
    let output = run_teamgraph_in_dir(demo_dir.path(), &["link", "2", "Bob Smith"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("own teammate"));
}

#[rstest]
fn seed_respects_force(temp_dir: TempDir) {
    let dir = temp_dir.path();
    assert!(run_teamgraph_in_dir(dir, &["init", "-q"]).status.success());

    let first = run_json(dir, &["seed"]);
    let second = run_json(dir, &["seed"]);
    let forced = run_json(dir, &["seed", "--force"]);

    assert_eq!(first["seeded"], true);
    assert_eq!(second["seeded"], false);
    assert_eq!(second["people"], 10);
    assert_eq!(forced["seeded"], true);
}

#[rstest]
fn graph_export_draws_each_relation_once(demo_dir: TempDir) {
    let view = run_json(demo_dir.path(), &["graph"]);

    assert_eq!(view["nodes"].as_array().unwrap().len(), 10);
    assert_eq!(view["edges"].as_array().unwrap().len(), 12);
}
