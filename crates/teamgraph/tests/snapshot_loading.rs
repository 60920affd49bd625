//! Loading people files from disk and querying the result.

use rstest::{fixture, rstest};
use std::path::PathBuf;
use teamgraph::domain::PersonId;
use teamgraph::graph::TeamGraph;
use teamgraph::snapshot::{
    demo::demo_snapshot, save_snapshot_to_jsonl, JsonlSnapshotProvider, LoadWarning,
    SnapshotProvider,
};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

async fn people_file(dir: &TempDir, lines: &[&str]) -> PathBuf {
    let path = dir.path().join("people.jsonl");
    let mut content = lines.join("\n");
    content.push('\n');
    tokio::fs::write(&path, content).await.unwrap();
    path
}

#[rstest]
#[tokio::test]
async fn damaged_file_still_answers_queries(temp_dir: TempDir) {
    let path = people_file(
        &temp_dir,
        &[
            r#"{"id":1,"name":"Alice","role":"Manager","teammates":[2,99]}"#,
            r#"{"id":2,"name":"Bob","role":"Developer","teammates":[1,3]}"#,
            r#"not json at all"#,
            r#"{"id":3,"name":"Carol","teammates":[2]}"#,
            r#"{"id":2,"name":"Bob again","teammates":[]}"#,
        ],
    )
    .await;
    let provider = JsonlSnapshotProvider::new(&path);

    let (snapshot, warnings) = provider.load_with_warnings().await.unwrap();
    let graph = TeamGraph::new(&snapshot);

    assert_eq!(snapshot.len(), 3);
    assert_eq!(graph.degrees_of_separation(PersonId(1), PersonId(3)), Some(2));
    assert_eq!(graph.total_relationships(), 2);
    assert!(warnings.iter().any(|w| matches!(w, LoadWarning::MalformedJson { line_number: 3, .. })));
    assert!(warnings.contains(&LoadWarning::DuplicatePerson { id: PersonId(2) }));
    assert!(warnings.contains(&LoadWarning::OrphanedTeammate {
        person: PersonId(1),
        teammate: PersonId(99)
    }));
    assert_eq!(warnings.len(), 3);
}

#[rstest]
#[tokio::test]
async fn provider_works_behind_trait_object(temp_dir: TempDir) {
    let path = temp_dir.path().join("people.jsonl");
    save_snapshot_to_jsonl(&demo_snapshot(), &path).await.unwrap();
    let provider: Box<dyn SnapshotProvider> = Box::new(JsonlSnapshotProvider::new(path));

    let snapshot = provider.load_snapshot().await.unwrap();

    assert_eq!(TeamGraph::new(&snapshot).stats().relationships, 12);
}

#[rstest]
#[tokio::test]
async fn each_load_is_a_fresh_snapshot(temp_dir: TempDir) {
    let path = people_file(&temp_dir, &[r#"{"id":1,"name":"Alice"}"#]).await;
    let provider = JsonlSnapshotProvider::new(&path);

    let before = provider.load_snapshot().await.unwrap();
    people_file(
        &temp_dir,
        &[r#"{"id":1,"name":"Alice"}"#, r#"{"id":2,"name":"Bob"}"#],
    )
    .await;
    let after = provider.load_snapshot().await.unwrap();

    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 2);
    assert!(after.loaded_at() >= before.loaded_at());
}

#[rstest]
#[tokio::test]
async fn one_sided_relation_is_reported(temp_dir: TempDir) {
    let path = people_file(
        &temp_dir,
        &[
            r#"{"id":1,"name":"Alice","teammates":[2]}"#,
            r#"{"id":2,"name":"Bob"}"#,
        ],
    )
    .await;

    let (snapshot, warnings) = JsonlSnapshotProvider::new(&path)
        .load_with_warnings()
        .await
        .unwrap();

    assert_eq!(
        warnings,
        vec![LoadWarning::AsymmetricTeammate {
            person: PersonId(1),
            teammate: PersonId(2)
        }]
    );
    assert_eq!(TeamGraph::new(&snapshot).suggest_default(PersonId(2)), Vec::new());
}
