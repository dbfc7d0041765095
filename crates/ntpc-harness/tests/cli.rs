// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! End-to-end tests driving the `ntpc-harness` binary against fake clients.
//!
//! The fake clients are tiny shell scripts written to a temp dir, so the
//! unix-only tests are gated; the path-validation tests run everywhere.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn harness() -> Command {
    Command::cargo_bin("ntpc-harness").unwrap()
}

// ── Path validation ─────────────────────────────────────────────────────

#[test]
fn missing_file_flag_prints_message_and_exits_one() {
    harness()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unspecified file name"))
        .stdout(predicate::str::contains("Test ").not());
}

#[test]
fn nonexistent_client_prints_message_and_exits_one() {
    harness()
        .args(["-f", "/no/such/ntpc"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("File /no/such/ntpc not found"))
        .stdout(predicate::str::contains("Test ").not());
}

// ── Full runs against scripted clients ──────────────────────────────────

#[cfg(unix)]
mod with_fake_client {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    use ntpc_harness::harness::RunReport;

    fn fake_client(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("ntpc");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// A client that gets every drill right: help/version/query succeed,
    /// anything malformed is rejected, and the clock-step run is refused as
    /// it would be for an unprivileged user.
    const WELL_BEHAVED: &str = r#"case "$*" in
  "-h"|"-v") exit 0 ;;
  "-a ntp.accelance.net") exit 0 ;;
  "-a ntp.accelance.net --count 1") exit 0 ;;
  "-a ntp.accelance.net -u") exit 13 ;;
  *) exit 2 ;;
esac"#;

    #[test]
    fn well_behaved_client_passes_every_drill() {
        let dir = tempfile::tempdir().unwrap();
        let client = fake_client(&dir, WELL_BEHAVED);
        harness()
            .args(["-f", client.to_str().unwrap()])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Total of tests 13"))
            .stdout(predicate::str::contains("- FAILED  0"))
            .stdout(predicate::str::is_match(r"Test 11 Single\s+OK").unwrap());
    }

    #[test]
    fn single_query_only_client_fails_the_other_success_drills() {
        // exit 0 only for exactly `-a ntp.accelance.net`: Help, Version and
        // Count miss their expectation, every error drill passes
        let dir = tempfile::tempdir().unwrap();
        let client = fake_client(
            &dir,
            r#"if [ "$*" = "-a ntp.accelance.net" ]; then exit 0; fi
exit 2"#,
        );
        harness()
            .args(["-f", client.to_str().unwrap()])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("- FAILED  3"))
            .stdout(predicate::str::is_match(r"Test 02 Help\s+FAILED").unwrap())
            .stdout(predicate::str::is_match(r"Test 11 Single\s+OK").unwrap())
            .stdout(predicate::str::is_match(r"Test 13 Update\s+OK").unwrap());
    }

    #[test]
    fn scenario_failures_do_not_change_the_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let client = fake_client(&dir, "exit 0");
        harness()
            .args(["-f", client.to_str().unwrap()])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("- FAILED  9"));
    }

    #[test]
    fn run_report_carries_the_aggregate_and_per_drill_detail() {
        let dir = tempfile::tempdir().unwrap();
        let client = fake_client(&dir, WELL_BEHAVED);
        let report_path = dir.path().join("run.json");
        harness()
            .args(["-f", client.to_str().unwrap()])
            .args(["--report", report_path.to_str().unwrap()])
            .assert()
            .code(0);

        let report: RunReport =
            serde_json::from_reader(std::fs::File::open(&report_path).unwrap()).unwrap();
        assert_eq!(report.total, 13);
        assert_eq!(report.total, report.passed + report.failed);
        assert_eq!(report.failed, 0);
        assert_eq!(report.scenarios.len(), 13);
        let update = report.scenarios.last().unwrap();
        assert_eq!(update.label, "Update");
        assert_eq!(update.exit_code, Some(13));
        assert!(update.passed);
    }

    #[test]
    fn timeout_flag_kills_a_hanging_query() {
        let dir = tempfile::tempdir().unwrap();
        let client = fake_client(
            &dir,
            r#"case "$*" in
  "-h"|"-v") exit 0 ;;
  "-a ntp.accelance.net") sleep 30 ;;
  "-a ntp.accelance.net --count 1") exit 0 ;;
  "-a ntp.accelance.net -u") exit 13 ;;
  *) exit 2 ;;
esac"#,
        );
        harness()
            .args(["-f", client.to_str().unwrap()])
            .args(["--timeout", "1"])
            .assert()
            .code(0)
            .stdout(predicate::str::is_match(r"Test 11 Single\s+FAILED").unwrap())
            .stdout(predicate::str::contains("- FAILED  1"));
    }
}
