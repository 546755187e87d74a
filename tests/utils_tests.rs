use asc_tree::errors::IncludeGraphError;
use asc_tree::utils::{file_walker, paths};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn file_walker_finds_nested_and_hidden_documents() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root.join("top.asc"), "");
    write(&root.join("a/b/deep.asc"), "");
    write(&root.join(".hidden/secret.asc"), "");
    write(&root.join("a/skip.adoc"), "");

    let files = file_walker::documents_with_options(&root, "asc", false);
    assert_eq!(files.len(), 3);
    assert!(files.contains(&root.join("a/b/deep.asc")));
    assert!(files.contains(&root.join(".hidden/secret.asc")));
    assert!(files.iter().all(|f| f.is_absolute()));
}

#[test]
fn file_walker_respects_ignore_only_when_asked() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root.join("main.asc"), "");
    write(&root.join("drafts/wip.asc"), "");
    write(&root.join(".ignore"), "drafts/\n");

    let all = file_walker::documents_with_options(&root, "asc", false);
    assert!(all.iter().any(|f| f.ends_with("drafts/wip.asc")));

    let kept = file_walker::documents_with_options(&root, "asc", true);
    assert!(kept.iter().any(|f| f.ends_with("main.asc")));
    assert!(!kept.iter().any(|f| f.ends_with("drafts/wip.asc")));
}

#[cfg(unix)]
#[test]
fn file_walker_keeps_file_links_and_skips_linked_dirs() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let outside_dir = tempdir().unwrap();
    let outside = outside_dir.path().canonicalize().unwrap();
    write(&outside.join("shared.asc"), "");
    write(&outside.join("tree/inner.asc"), "");
    std::os::unix::fs::symlink(outside.join("shared.asc"), root.join("link.asc")).unwrap();
    std::os::unix::fs::symlink(outside.join("tree"), root.join("tree")).unwrap();

    for respect_ignore in [false, true] {
        let files = file_walker::documents_with_options(&root, "asc", respect_ignore);
        assert_eq!(files, vec![root.join("link.asc")]);
    }
}

#[test]
fn resolve_canonicalizes_existing_and_missing_paths() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root.join("x/real.asc"), "");

    assert_eq!(paths::resolve(&root.join("x/./../x/real.asc")), root.join("x/real.asc"));
    assert_eq!(paths::resolve(&root.join("x/nope/../../y.asc")), root.join("y.asc"));
    assert_eq!(paths::resolve(&root.join("ghost/./z.asc")), root.join("ghost/z.asc"));
}

#[cfg(unix)]
#[test]
fn resolve_follows_symlinks() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root.join("real/doc.asc"), "");
    std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();
    assert_eq!(paths::resolve(&root.join("link/doc.asc")), root.join("real/doc.asc"));
}

#[test]
fn relative_display_and_outside_base() {
    let base = Path::new("/work/docs");
    assert_eq!(paths::display_relative(Path::new("/work/docs/ch/a.asc"), base).unwrap(), "ch/a.asc");
    let err = paths::relative_to(Path::new("/work/other.asc"), base).unwrap_err();
    assert!(matches!(err, IncludeGraphError::OutsideBase { .. }));
}

fn write(path: &Path, s: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = fs::File::create(path).unwrap();
    f.write_all(s.as_bytes()).unwrap();
}
