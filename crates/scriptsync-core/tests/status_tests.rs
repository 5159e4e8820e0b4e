//! Tests for tracked / untracked classification

use pretty_assertions::assert_eq;
use scriptsync_core::{Error, Project, SyncClassification};
use scriptsync_test_utils::TestProject;

async fn classify(project: &TestProject) -> SyncClassification {
    let loaded = Project::load(&project.config_path()).expect("Should load project");
    scriptsync_core::classify(
        loaded.content_dir(),
        loaded.rules(),
        loaded.extensions(),
        &loaded.collect_options(),
    )
    .await
    .expect("Should classify")
}

#[tokio::test]
async fn test_directory_of_untracked_files_collapses() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file("d/notes.txt", "n")
        .file("d/deeper/more.txt", "m");

    let status = classify(&project).await;

    assert_eq!(status.untracked, [".clasp.json", "d/"]);
    let tracked: Vec<_> = status.tracked_paths().iter().map(|p| p.as_str()).collect();
    assert_eq!(tracked, ["Code.js"]);
}

#[tokio::test]
async fn test_directory_with_tracked_file_lists_each_path() {
    let project = TestProject::with_script_id("abc")
        .file("d/Code.js", "a")
        .file("d/notes.txt", "n")
        .file("d/readme.md", "r");

    let status = classify(&project).await;

    assert_eq!(status.untracked, [".clasp.json", "d/notes.txt", "d/readme.md"]);
}

#[tokio::test]
async fn test_deep_node_modules_reports_single_entry() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file("node_modules/a/index.js", "1")
        .file("node_modules/a/lib/util.js", "2")
        .file("node_modules/@scope/b/node_modules/c/index.js", "3");

    let status = classify(&project).await;

    assert_eq!(status.untracked, [".clasp.json", "node_modules/"]);
}

#[tokio::test]
async fn test_skip_subdirectories_marks_nested_files_untracked() {
    let project = TestProject::new()
        .file("Code.js", "a")
        .file("lib/Util.js", "b");
    project.write_config(r#"{"scriptId": "abc", "skipSubdirectories": true}"#);

    let status = classify(&project).await;

    assert_eq!(status.untracked, [".clasp.json", "lib/"]);
}

#[tokio::test]
async fn test_status_json_shape() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file("notes.txt", "n");

    let status = classify(&project).await;
    let json: serde_json::Value = serde_json::from_str(&status.to_json().unwrap()).unwrap();

    assert_eq!(json["trackedFiles"], serde_json::json!(["Code.js"]));
    assert_eq!(
        json["untrackedFiles"],
        serde_json::json!([".clasp.json", "notes.txt"])
    );
}

#[tokio::test]
async fn test_status_propagates_conflicts() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file("Code.gs", "b");
    let loaded = Project::load(&project.config_path()).unwrap();

    let result = scriptsync_core::classify(
        loaded.content_dir(),
        loaded.rules(),
        loaded.extensions(),
        &loaded.collect_options(),
    )
    .await;

    assert!(matches!(result, Err(Error::FileConflict { .. })));
}
