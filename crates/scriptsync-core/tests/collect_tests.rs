//! Tests for local file collection

use pretty_assertions::assert_eq;
use rstest::rstest;
use scriptsync_core::{Error, FileType, Project};
use scriptsync_test_utils::TestProject;

fn load(project: &TestProject) -> Project {
    Project::load(&project.config_path()).expect("Should load project")
}

async fn remote_names(project: &TestProject) -> Vec<String> {
    load(project)
        .collect()
        .await
        .expect("Should collect")
        .into_iter()
        .map(|f| f.remote_name)
        .collect()
}

#[tokio::test]
async fn test_collect_default_project() {
    let project = TestProject::with_script_id("abc")
        .file("appsscript.json", "{}")
        .file("Code.js", "function a() {}")
        .file("sub/Code.js", "function b() {}")
        .file("page.html", "<p></p>");

    let files = load(&project).collect().await.unwrap();

    let names: Vec<_> = files.iter().map(|f| f.remote_name.as_str()).collect();
    assert_eq!(names, ["Code", "appsscript", "page", "sub/Code"]);

    let sub = files.iter().find(|f| f.remote_name == "sub/Code").unwrap();
    assert_eq!(sub.local_path.as_str(), "sub/Code.js");
    assert_eq!(sub.file_type, FileType::Script);
    assert_eq!(sub.source, "function b() {}");

    let manifest = files.iter().find(|f| f.remote_name == "appsscript").unwrap();
    assert_eq!(manifest.file_type, FileType::Config);
}

#[tokio::test]
async fn test_collect_conflicting_extensions_fail() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file("Code.gs", "b");

    let result = load(&project).collect().await;

    match result {
        Err(Error::FileConflict { basename, paths }) => {
            assert_eq!(basename, "Code");
            let paths: Vec<_> = paths.iter().map(|p| p.as_str()).collect();
            assert_eq!(paths, ["Code.gs", "Code.js"]);
        }
        other => panic!("Expected FileConflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_collect_skips_unrecognized_and_ignored() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file("README.md", "# readme")
        .file("package.json", "{}")
        .file("node_modules/pkg/index.js", "module.exports = 1");

    assert_eq!(remote_names(&project).await, ["Code"]);
}

#[tokio::test]
async fn test_collect_skips_hidden_directories() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file(".github/setup.js", "b");

    assert_eq!(remote_names(&project).await, ["Code"]);
}

#[tokio::test]
async fn test_collect_skips_short_hidden_directories_under_defaults() {
    let project = TestProject::with_script_id("abc")
        .file("appsscript.json", "{}")
        .file(".h/page.html", "<p></p>")
        .file(".j/x.js", "x");

    assert_eq!(remote_names(&project).await, ["appsscript"]);
}

#[tokio::test]
async fn test_collect_hidden_directory_named_by_negation() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file(".shared/lib.js", "b");
    project.write_ignore("**/**\n!**/*.js\n!.shared/**\n");

    assert_eq!(remote_names(&project).await, [".shared/lib", "Code"]);
}

#[tokio::test]
async fn test_collect_skip_subdirectories() {
    let project = TestProject::new()
        .file("Code.js", "a")
        .file("lib/Util.js", "b");
    project.write_config(r#"{"scriptId": "abc", "skipSubdirectories": true}"#);

    assert_eq!(remote_names(&project).await, ["Code"]);
}

#[tokio::test]
async fn test_collect_uppercase_extension() {
    let project = TestProject::with_script_id("abc").file("Main.JS", "a");

    let files = load(&project).collect().await.unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].remote_name, "Main");
    assert_eq!(files[0].file_type, FileType::Script);
}

#[tokio::test]
async fn test_collect_explicit_empty_ignore_file_ignores_nothing() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file("data.json", "{}")
        .file("node_modules/pkg/index.js", "b");
    project.write_ignore("");

    // `.clasp.json` stays out: its top segment is hidden
    assert_eq!(
        remote_names(&project).await,
        ["Code", "data", "node_modules/pkg/index"]
    );
}

#[tokio::test]
async fn test_collect_absent_ignore_file_uses_defaults() {
    let project = TestProject::with_script_id("abc")
        .file("Code.js", "a")
        .file("data.json", "{}")
        .file("node_modules/pkg/index.js", "b");

    assert_eq!(remote_names(&project).await, ["Code"]);
}

#[tokio::test]
async fn test_collect_push_order_first() {
    let project = TestProject::new()
        .file("src/a.js", "a")
        .file("src/b.js", "b")
        .file("src/z.js", "z")
        .file("src/appsscript.json", "{}");
    project.write_config(
        r#"{"scriptId": "abc", "rootDir": "src", "filePushOrder": ["src/z.js", "b"]}"#,
    );

    assert_eq!(remote_names(&project).await, ["z", "b", "a", "appsscript"]);
}

#[tokio::test]
async fn test_collect_custom_extensions() {
    let project = TestProject::new()
        .file("Code.ts", "a")
        .file("Other.js", "b")
        .file("view.htm", "<p></p>");
    project.write_ignore("");
    project.write_config(
        r#"{"scriptId": "abc", "fileExtensions": {"SERVER_JS": ["ts"], "HTML": [".htm"]}}"#,
    );

    let files = load(&project).collect().await.unwrap();

    let names: Vec<_> = files.iter().map(|f| (f.remote_name.as_str(), f.file_type)).collect();
    assert_eq!(names, [("Code", FileType::Script), ("view", FileType::Markup)]);
}

#[rstest]
#[case::plain("{\"scriptId\": \"abc\"}", "Code")]
#[case::root_dir("{\"scriptId\": \"abc\", \"rootDir\": \".\"}", "Code")]
#[case::content_dir_alias("{\"scriptId\": \"abc\", \"contentDir\": \"\"}", "Code")]
#[tokio::test]
async fn test_collect_content_root_variants(#[case] config: &str, #[case] expected: &str) {
    let project = TestProject::new().file("Code.js", "a");
    project.write_config(config);

    assert_eq!(remote_names(&project).await, [expected]);
}

#[test]
fn test_malformed_config_is_config_error() {
    let project = TestProject::new();
    project.write_config("{ not json");

    let result = Project::load(&project.config_path());

    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn test_unreadable_explicit_ignore_file_is_config_error() {
    let project = TestProject::with_script_id("abc");

    let result = Project::load_with_ignore(
        &project.config_path(),
        Some(project.path("missing.ignore").as_path()),
    );

    assert!(matches!(result, Err(Error::Config { .. })));
}
