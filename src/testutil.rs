//! Throwaway git repositories for tests.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

pub(crate) fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

pub(crate) fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a repository with one root commit; returns the checked-out
/// branch name alongside the directory guard.
pub(crate) fn init_repo() -> (TempDir, String) {
    let temp = TempDir::new().expect("tempdir");
    git(temp.path(), &["init"]);
    git(temp.path(), &["config", "user.name", "Test"]);
    git(temp.path(), &["config", "user.email", "test@test.invalid"]);

    std::fs::write(temp.path().join("README.md"), "# test\n").expect("write file");
    git(temp.path(), &["add", "."]);
    git(temp.path(), &["commit", "-m", "init"]);

    let branch = git_stdout(temp.path(), &["rev-parse", "--abbrev-ref", "HEAD"]);
    (temp, branch)
}

/// Write a file, stage it, and commit; returns the new commit id.
pub(crate) fn commit_file(dir: &Path, path: &str, contents: &str, message: &str) -> git2::Oid {
    std::fs::write(dir.join(path), contents).expect("write file");
    git(dir, &["add", path]);
    git(dir, &["commit", "-m", message]);

    let oid = git_stdout(dir, &["rev-parse", "HEAD"]);
    git2::Oid::from_str(&oid).expect("commit oid")
}
