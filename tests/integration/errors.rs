use assert_cmd::Command;
use kujo::test_utils::ManifestFixture;
use predicates::prelude::*;
use tempfile::TempDir;

fn kujo() -> Command {
    let mut cmd = Command::cargo_bin("kujo").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_invalid_yaml_fails() {
    kujo()
        .write_stdin(ManifestFixture::invalid_syntax().content)
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Failed to decode input manifests"));
}

#[test]
fn test_invalid_json_fails() {
    kujo()
        .write_stdin("{\"kind\": \"Job\",")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    kujo()
        .arg("--file")
        .arg(temp.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));
}

#[test]
fn test_invalid_annotation_warns() {
    kujo()
        .write_stdin(ManifestFixture::invalid_annotation().content)
        .assert()
        .success()
        .stdout(predicate::str::contains("name: pi\n"))
        .stderr(predicate::str::contains("please"));
}

#[test]
fn test_quiet_suppresses_warnings() {
    kujo()
        .arg("--quiet")
        .write_stdin(ManifestFixture::invalid_annotation().content)
        .assert()
        .success()
        .stderr("");
}

#[test]
fn test_verbose_and_quiet_conflict() {
    kujo().args(["--verbose", "--quiet"]).assert().failure();
}
