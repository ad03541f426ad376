#![forbid(unsafe_code)]
use predicates::prelude::*;
use roulement::{JsonRepository, Repository};
use std::path::Path;
use tempfile::TempDir;

fn cli(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("roulement-cli"));
    cmd.arg("--data-dir").arg(dir);
    cmd
}

#[test]
fn sample_schedule_then_check() {
    let dir = TempDir::new().unwrap();

    cli(dir.path())
        .arg("load-sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 users, 6 shifts"));

    // second load without --force must refuse
    cli(dir.path()).arg("load-sample").assert().failure();

    cli(dir.path())
        .args(["configure", "--forbid-double-booking", "true"])
        .assert()
        .success();

    let scheduled = cli(dir.path()).arg("schedule").assert();
    let code = scheduled.get_output().status.code();
    assert!(matches!(code, Some(0) | Some(2)), "unexpected exit code {code:?}");
    scheduled.stdout(predicate::str::contains("Shift distribution:"));

    cli(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));

    let repo = JsonRepository::open(dir.path()).unwrap();
    let shifts = repo.load_shifts();
    assert_eq!(shifts.len(), 6);
    assert!(shifts.iter().any(|s| !s.assigned_users.is_empty()));
}

#[test]
fn conflicting_pair_scenario_through_cli() {
    let dir = TempDir::new().unwrap();
    for name in ["Alice", "Bob"] {
        cli(dir.path())
            .args(["add-user", "--name", name, "--max-shifts", "2", "--available", "mon:9-12"])
            .assert()
            .success();
    }
    cli(dir.path())
        .args(["add-conflict", "--user", "alice", "--with", "bob"])
        .assert()
        .success();
    cli(dir.path())
        .args(["add-shift", "--name", "Desk", "--day", "0", "--start", "9", "--end", "11", "--staff", "2"])
        .assert()
        .success();

    cli(dir.path())
        .arg("schedule")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("1 shift(s) understaffed"));

    let repo = JsonRepository::open(dir.path()).unwrap();
    let shifts = repo.load_shifts();
    assert_eq!(shifts[0].assigned_users.len(), 1);

    cli(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon 09:00-11:00 | Desk [fixed]"))
        .stdout(predicate::str::contains("1/2 !"));
}

#[test]
fn invalid_shift_is_refused() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["add-shift", "--name", "Broken", "--day", "0", "--start", "12", "--end", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("end hour must be strictly after start hour"));
}

#[test]
fn out_of_range_shift_never_reaches_storage() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["add-user", "--name", "Night Owl", "--available", "mon:18-24"])
        .assert()
        .success();
    cli(dir.path())
        .args(["add-shift", "--name", "Late", "--day", "0", "--start", "20", "--end", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("end hour 30 is past 24"));

    let repo = JsonRepository::open(dir.path()).unwrap();
    assert!(repo.load_shifts().is_empty());

    cli(dir.path())
        .args(["add-shift", "--name", "Late", "--day", "0", "--start", "20", "--end", "24"])
        .assert()
        .success();
    cli(dir.path()).arg("schedule").assert().success();
}

#[test]
fn configure_persists_settings() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["configure", "--window-start", "8", "--window-end", "18", "--seed", "3"])
        .assert()
        .success();

    let settings = JsonRepository::open(dir.path()).unwrap().load_settings();
    assert_eq!(settings.window_start_hour, 8);
    assert_eq!(settings.window_end_hour, 18);

    cli(dir.path())
        .args(["configure", "--window-start", "20"])
        .assert()
        .failure();
}

#[test]
fn check_flags_manual_double_booking() {
    let dir = TempDir::new().unwrap();
    cli(dir.path()).arg("load-sample").assert().success();
    let repo = JsonRepository::open(dir.path()).unwrap();
    let mut shifts = repo.load_shifts();
    // Alice et Bob sont déclarés incompatibles
    shifts[0].assigned_users = vec!["alice", "bob"]
        .into_iter()
        .map(roulement::UserId::new)
        .collect();
    repo.save_shifts(&shifts).unwrap();

    let report = dir.path().join("report.csv");
    cli(dir.path())
        .args(["check", "--report"])
        .arg(&report)
        .assert()
        .code(2);
    let text = std::fs::read_to_string(report).unwrap();
    assert!(text.contains("pair_conflict"));
}
