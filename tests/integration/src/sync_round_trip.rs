//! End-to-end sync through a directory-backed remote
//!
//! Exercises the complete flow: project loading -> collection -> push ->
//! mirror storage -> pull -> re-collection.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use scriptsync_core::{
    ForceDelete, MirrorRemote, Project, ProjectFile, ScriptService, SyncEngine,
};
use scriptsync_test_utils::TestProject;
use tempfile::TempDir;

async fn mirror(temp: &TempDir) -> Arc<MirrorRemote> {
    let mirror = Arc::new(MirrorRemote::new(temp.path()));
    mirror.create_project("abc", "Round trip").await.unwrap();
    mirror
}

fn engine(project: &TestProject, remote: Arc<MirrorRemote>) -> SyncEngine {
    SyncEngine::new(Project::load(&project.config_path()).unwrap(), remote)
}

fn summary(files: Vec<ProjectFile>) -> Vec<(String, String, String)> {
    let mut rows: Vec<_> = files
        .into_iter()
        .map(|f| (f.remote_name, f.local_path.to_string(), f.source))
        .collect();
    rows.sort();
    rows
}

#[tokio::test]
async fn test_push_then_pull_reproduces_files() {
    let remote_dir = TempDir::new().unwrap();
    let remote = mirror(&remote_dir).await;

    let source = TestProject::with_script_id("abc")
        .file("appsscript.json", "{\"timeZone\": \"UTC\"}")
        .file("Code.js", "function main() {}")
        .file("lib/deep/Util.gs", "function util() {}")
        .file("views/index.html", "<p>hello</p>")
        .file("README.md", "not pushed");
    let pushed = engine(&source, remote.clone()).push().await.unwrap();
    assert_eq!(pushed.pushed.len(), 4);

    let checkout = TestProject::with_script_id("abc");
    let pull_engine = engine(&checkout, remote.clone());
    let report = pull_engine.pull(None).await.unwrap();
    assert_eq!(report.written.len(), 4);

    let original = engine(&source, remote.clone()).collect_local_files().await.unwrap();
    let pulled = pull_engine.collect_local_files().await.unwrap();

    // `.gs` comes back under the preferred script extension
    let expected: Vec<_> = summary(original)
        .into_iter()
        .map(|(name, path, source)| (name, path.replace(".gs", ".js"), source))
        .collect();
    assert_eq!(summary(pulled), expected);
    checkout.assert_file_not_exists("README.md");
}

#[tokio::test]
async fn test_push_order_is_kept_by_remote() {
    let remote_dir = TempDir::new().unwrap();
    let remote = mirror(&remote_dir).await;
    let project = TestProject::new()
        .file("appsscript.json", "{}")
        .file("a.js", "a")
        .file("polyfill.js", "p");
    project.write_config(r#"{"scriptId": "abc", "filePushOrder": ["polyfill.js"]}"#);

    engine(&project, remote.clone()).push().await.unwrap();

    let names: Vec<_> = remote
        .fetch_files("abc", None)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, ["polyfill", "a", "appsscript"]);
}

#[tokio::test]
async fn test_pull_into_content_subdirectory() {
    let remote_dir = TempDir::new().unwrap();
    let remote = mirror(&remote_dir).await;
    let source = TestProject::with_script_id("abc")
        .file("appsscript.json", "{}")
        .file("Code.js", "main()");
    engine(&source, remote.clone()).push().await.unwrap();

    let checkout = TestProject::new();
    checkout.write_config(r#"{"scriptId": "abc", "rootDir": "src"}"#);
    engine(&checkout, remote).pull(None).await.unwrap();

    checkout.assert_file_contains("src/Code.js", "main()");
    checkout.assert_file_exists("src/appsscript.json");
    checkout.assert_file_not_exists("Code.js");
}

#[tokio::test]
async fn test_pull_prune_removes_files_deleted_remotely() {
    let remote_dir = TempDir::new().unwrap();
    let remote = mirror(&remote_dir).await;
    let project = TestProject::with_script_id("abc")
        .file("appsscript.json", "{}")
        .file("Code.js", "main()")
        .file("Old.js", "old()");
    let engine = engine(&project, remote.clone());
    engine.push().await.unwrap();

    remote
        .replace_files(
            "abc",
            &remote
                .fetch_files("abc", None)
                .await
                .unwrap()
                .into_iter()
                .filter(|f| f.name != "Old")
                .collect::<Vec<_>>(),
        )
        .await
        .unwrap();

    let report = engine.pull(None).await.unwrap();
    let outcome = report
        .prune
        .apply(engine.project().content_dir(), &ForceDelete)
        .unwrap();

    assert_eq!(outcome.deleted.len(), 1);
    project.assert_file_not_exists("Old.js");
    project.assert_file_exists("Code.js");
}

#[tokio::test]
async fn test_versions_survive_later_pushes() {
    let remote_dir = TempDir::new().unwrap();
    let remote = mirror(&remote_dir).await;
    let project = TestProject::with_script_id("abc")
        .file("appsscript.json", "{}")
        .file("Code.js", "v1()");
    let engine = engine(&project, remote.clone());

    engine.push().await.unwrap();
    remote.create_version("abc", Some("v1")).await.unwrap();
    project.write_file("Code.js", "v2()");
    engine.push().await.unwrap();

    let versions = engine.versions().await.unwrap();
    assert_eq!(versions.results.len(), 1);
    assert_eq!(versions.results[0].description.as_deref(), Some("v1"));

    engine.pull(Some(1)).await.unwrap();
    project.assert_file_contains("Code.js", "v1()");
}
