//! End-to-end smoke test: the binary runs against a real (if small) seed
//! range using the bundled demo backend and exits cleanly.

use assert_cmd::Command;
use predicates::str::contains;

fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/minimal_query.json")
}

#[test]
fn a_small_range_scan_completes_and_prints_a_summary() {
    Command::cargo_bin("seedscan")
        .unwrap()
        .args([
            "--query",
            fixture_path().to_str().unwrap(),
            "--seed-start",
            "0",
            "--seed-count",
            "200",
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(contains("seedscan: scanned 200 seed(s)"));
}

#[test]
fn a_missing_query_file_is_reported_and_the_binary_exits_nonzero() {
    Command::cargo_bin("seedscan")
        .unwrap()
        .args(["--query", "does/not/exist.json", "--seed-count", "8"])
        .assert()
        .failure()
        .stderr(contains("file not found"));
}

#[test]
fn cutoff_and_auto_cutoff_are_mutually_exclusive() {
    Command::cargo_bin("seedscan")
        .unwrap()
        .args([
            "--query",
            fixture_path().to_str().unwrap(),
            "--cutoff",
            "5",
            "--auto-cutoff",
        ])
        .assert()
        .failure();
}
