use pretty_assertions::assert_eq;
use rstest::rstest;
use scriptsync_fs::NormalizedPath;

#[rstest]
#[case("foo/bar/baz", "foo/bar/baz")]
#[case("foo\\bar\\baz", "foo/bar/baz")]
#[case("foo/bar\\baz", "foo/bar/baz")]
#[case("foo//bar/", "foo/bar")]
#[case("./foo/./bar", "foo/bar")]
#[case("/abs//path", "/abs/path")]
#[case(".", "")]
fn test_normalization(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    let joined = base.join("baz");
    assert_eq!(joined.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_onto_empty_root() {
    let root = NormalizedPath::new("");
    assert_eq!(root.join("sub\\Code.js").as_str(), "sub/Code.js");
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("foo/bar/baz");
    let parent = path.parent().unwrap();
    assert_eq!(parent.as_str(), "foo/bar");
}

#[test]
fn test_file_name() {
    let path = NormalizedPath::new("foo/bar/baz.txt");
    assert_eq!(path.file_name(), Some("baz.txt"));
}

#[test]
fn test_extension() {
    assert_eq!(NormalizedPath::new("a/Code.JS").extension(), Some("JS"));
    assert_eq!(NormalizedPath::new("a/Makefile").extension(), None);
}

#[test]
fn test_first_segment() {
    let path = NormalizedPath::new(".git/objects/pack");
    assert_eq!(path.first_segment(), Some(".git"));
}

#[test]
fn test_parent_traversal_detected() {
    assert!(NormalizedPath::new("../evil").has_parent_traversal());
    assert!(NormalizedPath::new("a/../../evil").has_parent_traversal());
    assert!(!NormalizedPath::new("a/..b/c").has_parent_traversal());
}

#[test]
fn test_exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
}

#[test]
fn test_canonicalize_existing_dir() {
    let temp = tempfile::TempDir::new().unwrap();
    let canonical = NormalizedPath::canonicalize(temp.path()).unwrap();
    assert!(canonical.is_dir());
}

#[test]
fn test_canonicalize_missing_dir_fails() {
    let result = NormalizedPath::canonicalize("/nonexistent/scriptsync/dir");
    assert!(result.unwrap_err().is_not_found());
}
