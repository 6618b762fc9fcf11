use assert_cmd::Command;
use kujo::test_utils::{ManifestFixture, is_valid_suffix};
use predicates::prelude::*;
use tempfile::TempDir;

fn kujo() -> Command {
    let mut cmd = Command::cargo_bin("kujo").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(input: &str) -> String {
    let output = kujo().write_stdin(input).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

/// Suffix of the first Job renamed from `name`.
fn suffix_of(output: &str, name: &str) -> String {
    let prefix = format!("name: {name}-");
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix(prefix.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| panic!("no renamed Job {name} in:\n{output}"))
}

#[test]
fn test_renames_opted_in_job() {
    let output = run(&ManifestFixture::full_config().content);

    let suffix = suffix_of(&output, "pi");
    assert!(is_valid_suffix(&suffix), "{suffix}");
    assert!(output.contains("name: perl-job-config"));
    assert!(output.contains("name: mysecret"));
    assert!(!output.contains("kind: Deployment"));
}

#[test]
fn test_reads_file_flag() {
    let temp = TempDir::new().unwrap();
    let fixture = ManifestFixture::full_config();
    let path = fixture.write_to(temp.path()).unwrap();

    let from_stdin = run(&fixture.content);
    kujo()
        .arg("--file")
        .arg(&path)
        .assert()
        .success()
        .stdout(from_stdin);
}

#[test]
fn test_output_is_deterministic() {
    let input = ManifestFixture::full_config().content;
    assert_eq!(run(&input), run(&input));
}

#[test]
fn test_config_change_changes_suffix() {
    let original = ManifestFixture::full_config().content;
    let changed = original.replace("digits: \"2000\"", "digits: \"3000\"");
    assert_ne!(original, changed);

    assert_ne!(suffix_of(&run(&original), "pi"), suffix_of(&run(&changed), "pi"));
}

#[test]
fn test_unrelated_change_keeps_suffix() {
    let original = ManifestFixture::full_config().content;
    let changed = original.replace("replicas: 1", "replicas: 3");
    assert_ne!(original, changed);

    assert_eq!(suffix_of(&run(&original), "pi"), suffix_of(&run(&changed), "pi"));
}

#[test]
fn test_missing_references_still_rename() {
    let output = run(&ManifestFixture::job_only().content);
    assert!(is_valid_suffix(&suffix_of(&output, "pi")));
}

#[test]
fn test_passthrough_without_opted_in_jobs() {
    let output = run(&ManifestFixture::unannotated_job().content);
    assert!(output.contains("name: pi\n"));
    assert!(!output.contains("name: pi-"));

    let output = run(&ManifestFixture::config_only().content);
    assert!(output.contains("kind: ConfigMap"));
    assert!(output.contains("kind: Secret"));
}

#[test]
fn test_documents_are_separated() {
    let output = run(&ManifestFixture::full_config().content);
    assert_eq!(output.matches("---\n").count(), 2);
    assert!(!output.starts_with("---"));
    assert!(output.ends_with('\n'));
    assert!(!output.ends_with("\n\n"));
}

#[test]
fn test_empty_input_prints_nothing() {
    kujo().write_stdin(ManifestFixture::no_config().content).assert().success().stdout("");
}

#[test]
fn test_wrong_versions_are_dropped() {
    kujo()
        .write_stdin(ManifestFixture::wrong_versions().content)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_json_input_renders_yaml() {
    let input = r#"{"apiVersion":"batch/v1","kind":"Job","metadata":{"name":"foo","annotations":{"kujo.sphc.io":"true"}}}"#;
    kujo()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("name: foo-b8m4h2g4g8"))
        .stdout(predicate::str::contains("kind: Job"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    kujo()
        .arg("--verbose")
        .write_stdin(ManifestFixture::full_config().content)
        .assert()
        .success()
        .stdout(predicate::str::contains("name: pi-"))
        .stdout(predicate::str::contains("Renaming").not())
        .stderr(predicate::str::contains("Renaming Job default/pi"));
}
