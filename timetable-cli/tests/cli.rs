use assert_cmd::Command;
use predicates::prelude::*;

fn timetable() -> Command {
    Command::cargo_bin("timetable").unwrap()
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

// ============================================================
// Resolving
// ============================================================

#[test]
fn test_current_and_upcoming() {
    timetable()
        .args([fixture("student.json").as_str(), "--at", "2026-02-09T09:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "now:\n  09:00 - 10:00  Math @ LT-1 (Dr. Asante)",
        ))
        .stdout(predicate::str::contains(
            "upcoming:\n  10:30 - 11:30  Physics @ Lab 2 (Prof. Ruiz)",
        ))
        .stdout(predicate::str::contains("next: Physics in 60 min"));
}

#[test]
fn test_after_last_class() {
    timetable()
        .args([fixture("student.json").as_str(), "--at", "2026-02-09T12:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now: none\nupcoming: none"))
        .stdout(predicate::str::contains("next:").not());
}

#[test]
fn test_zoned_reference_time() {
    timetable()
        .args([
            fixture("student.json").as_str(),
            "--at",
            "2026-02-09T09:30:00+00:00[UTC]",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Math"));
}

#[test]
fn test_teacher_shape_wrapped_payload() {
    timetable()
        .args([
            fixture("teacher.json").as_str(),
            "--shape",
            "teacher",
            "--at",
            "2026-02-13T09:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("08:00 - 10:00  Operating Systems"))
        .stdout(predicate::str::contains(
            "upcoming:\n  10:00 - 12:00  Networks @ Lab 1 (BSc Information Technology)\n  13:00 - 15:00  Algorithms",
        ));
}

#[test]
fn test_all_days_keeps_every_entry() {
    timetable()
        .args([
            fixture("student.json").as_str(),
            "--all-days",
            "--at",
            "2026-02-10T08:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "09:00 - 10:00  Math @ LT-1 (Dr. Asante)\n  09:00 - 11:00  Chemistry",
        ))
        .stdout(predicate::str::contains("14:00 - 15:30  Statistics"));
}

#[test]
fn test_reads_stdin() {
    timetable()
        .args(["--at", "2026-02-11T13:00"])
        .write_stdin(r#"[{ "course_name": "Statistics", "day": "We", "time": "14:00 - 15:30" }]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("next: Statistics in 60 min"));
}

#[test]
fn test_dash_reads_stdin() {
    timetable()
        .args(["-", "--at", "2026-02-11T14:15"])
        .write_stdin(r#"[{ "course_name": "Statistics", "day": "We", "time": "14:00 - 15:30" }]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("now:\n  14:00 - 15:30  Statistics"));
}

// ============================================================
// Output formats
// ============================================================

#[test]
fn test_json_output() {
    timetable()
        .args([fixture("student.json").as_str(), "--json", "--at", "2026-02-09T09:30"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"subjectName\": \"Math\""))
        .stdout(predicate::str::contains("\"startTime\": \"10:30\""))
        .stdout(predicate::str::contains("\"skipped\": []"));
}

#[test]
fn test_day_listing() {
    timetable()
        .args([fixture("student.json").as_str(), "--day", "We"])
        .assert()
        .success()
        .stdout(predicate::str::contains("14:00 - 15:30  Statistics @ TBA (TBA)"));
}

#[test]
fn test_day_listing_json() {
    timetable()
        .args([fixture("student.json").as_str(), "--day", "monday", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("\"Physics\""));
}

#[test]
fn test_day_without_classes() {
    timetable()
        .args([fixture("student.json").as_str(), "--day", "Su"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no classes on Sunday"));
}

// ============================================================
// Validation
// ============================================================

#[test]
fn test_check_valid() {
    timetable()
        .args([fixture("student.json").as_str(), "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 records valid"));
}

#[test]
fn test_check_reports_skipped() {
    timetable()
        .args([fixture("malformed.json").as_str(), "--check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("record 1:"))
        .stderr(predicate::str::contains("record 2: missing field 'day'"))
        .stderr(predicate::str::contains("2 of 3 records invalid"));
}

#[test]
fn test_malformed_records_do_not_abort() {
    timetable()
        .args([fixture("malformed.json").as_str(), "--json", "--at", "2026-02-09T09:10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"subjectName\": \"Math\""))
        .stdout(predicate::str::contains("\"index\": 1"));
}

// ============================================================
// Errors
// ============================================================

#[test]
fn test_invalid_json() {
    timetable()
        .args(["--at", "2026-02-09T09:30"])
        .write_stdin("[{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid class list JSON"));
}

#[test]
fn test_missing_file() {
    timetable()
        .arg("/nonexistent/classes.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_invalid_reference_time() {
    timetable()
        .args([fixture("student.json").as_str(), "--at", "half past nine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --at datetime"));
}

#[test]
fn test_unknown_weekday() {
    timetable()
        .args([fixture("student.json").as_str(), "--day", "Mon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown weekday 'Mon'"));
}

#[test]
fn test_day_conflicts_with_at() {
    timetable()
        .args([fixture("student.json").as_str(), "--day", "Mo", "--at", "2026-02-09T09:30"])
        .assert()
        .code(2);
}

#[test]
fn test_version() {
    timetable()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("timetable"));
}
