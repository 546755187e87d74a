use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let mut f = fs::File::create(path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
}

fn chain(root: &Path) {
    write_file(&root.join("root.asc"), "= Book\n\ninclude::a.asc[]\n");
    write_file(&root.join("a.asc"), "include::b.asc[leveloffset=+1]\n");
    write_file(&root.join("b.asc"), "Plain text.\n");
}

#[test]
fn normal_view_from_current_directory() {
    let dir = tempdir().unwrap();
    chain(dir.path());

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert().success().stdout("root.asc\n└── a.asc\n    └── b.asc\n");
}

#[test]
fn reverse_view_with_short_flag() {
    let dir = tempdir().unwrap();
    chain(dir.path());

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(dir.path()).arg("-r").arg(".");
    cmd.assert()
        .success()
        .stdout("a.asc\n└── root.asc\nb.asc\n└── a.asc\n    └── root.asc\nroot.asc\n");
}

#[test]
fn nested_root_is_shown_relative_to_cwd() {
    let dir = tempdir().unwrap();
    let docs = dir.path().join("docs");
    write_file(&docs.join("index.asc"), "include::chapters/one.asc[]\n");
    write_file(&docs.join("chapters/one.asc"), "include::../shared/note.asc[]\n");
    write_file(&docs.join("shared/note.asc"), "");

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(dir.path()).arg("docs");
    cmd.assert().success().stdout(
        "docs/index.asc\n└── docs/chapters/one.asc\n    └── docs/shared/note.asc\n",
    );
}

#[test]
fn mutual_inclusion_terminates() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("x.asc"), "include::y.asc[]\n");
    write_file(&dir.path().join("y.asc"), "include::x.asc[]\n");

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("x.asc\n└── y.asc\n    └── x.asc\n        └── y.asc  (cycle)\n"))
        .stdout(predicate::str::contains("y.asc\n└── x.asc\n    └── y.asc\n        └── x.asc  (cycle)\n"));
}

#[test]
fn root_that_is_not_a_directory_fails() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("file.asc"), "");

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(dir.path()).arg("file.asc");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn empty_directory_fails() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("readme.md"), "nothing\n");

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no .asc files found"));
}

#[test]
fn documents_outside_cwd_fail_unless_base_is_given() {
    let dir = tempdir().unwrap();
    let docs = dir.path().join("docs");
    let elsewhere = dir.path().join("elsewhere");
    fs::create_dir_all(&elsewhere).unwrap();
    chain(&docs);

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(&elsewhere).arg(&docs);
    cmd.assert().failure().code(1).stderr(predicate::str::contains("is not below"));

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(&elsewhere).arg(&docs).arg("--base").arg(&docs);
    cmd.assert().success().stdout("root.asc\n└── a.asc\n    └── b.asc\n");
}

#[test]
fn json_and_dot_formats() {
    let dir = tempdir().unwrap();
    chain(dir.path());

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(dir.path()).arg("--format").arg("json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"view\": \"normal\""))
        .stdout(predicate::str::contains("\"roots\": [\n    \"root.asc\"\n  ]"));

    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.current_dir(dir.path()).arg("--format").arg("dot");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("digraph includes {"))
        .stdout(predicate::str::contains("\"a.asc\" -> \"b.asc\";"));
}

#[test]
fn completions_are_printed() {
    let mut cmd = Command::cargo_bin("asc-tree").unwrap();
    cmd.arg("--completions").arg("bash");
    cmd.assert().success().stdout(predicate::str::contains("asc-tree"));
}
