use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn roster(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir);
    cmd
}

fn add(dir: &Path, name: &str, year: &str) {
    add_in_course(dir, name, year, "2");
}

fn add_in_course(dir: &Path, name: &str, year: &str, course: &str) {
    roster(dir)
        .args([
            "add",
            "--name",
            name,
            "--surname",
            "Orlova",
            "--middle-name",
            "Ivanovna",
            "--year",
            year,
            "--course",
            course,
            "--subject",
            "Math:5,4,3",
            "--subject",
            "Art:4,4,4",
            "--subject",
            "Music:3,3,3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student added"));
}

#[test]
fn add_persists_to_text_file_and_lists() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Anna", "2001");

    let text = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();
    assert_eq!(
        text,
        "2001|2|Anna|Orlova|Ivanovna|Math|5,4,3|Art|4,4,4|Music|3,3,3\n"
    );

    roster(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("|Anna "))
        .stdout(predicate::str::contains("Course"));
}

#[test]
fn empty_roster_lists_placeholder() {
    let temp = tempfile::tempdir().unwrap();
    roster(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No students."));
}

#[test]
fn add_prompts_for_missing_fields() {
    let temp = tempfile::tempdir().unwrap();
    roster(temp.path())
        .args(["add", "--name", "Vera", "--surname", "Popova"])
        .write_stdin("Olegovna\n1888\n1999\n1\nMath\n5,4\n5,4,4\nArt\n3,3,3\nMusic\n4,4,4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input").count(2))
        .stdout(predicate::str::contains("Student added"));

    let text = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();
    assert!(text.starts_with("1999|1|Vera|Popova|Olegovna|Math|5,4,4|"));
}

#[test]
fn invalid_option_fails_with_error() {
    let temp = tempfile::tempdir().unwrap();
    roster(temp.path())
        .args(["add", "--name", "R2D2"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn delete_removes_by_number() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Anna", "2001");
    add(temp.path(), "Boris", "1999");

    // Loaded rosters are ordered by birth year, so Boris is number 1.
    roster(temp.path())
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boris"));

    let text = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("|Anna|"));
}

#[test]
fn delete_out_of_range_fails_and_keeps_file() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Anna", "2001");

    roster(temp.path())
        .args(["delete", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid student number 5"));

    let text = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn edit_with_yes_applies() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Anna", "2001");

    roster(temp.path())
        .args(["edit", "1", "course", "5", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));

    let text = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();
    assert!(text.starts_with("2001|5|Anna|"));
}

#[test]
fn declined_edit_leaves_file_untouched() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Anna", "2001");
    let before = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();

    roster(temp.path())
        .args(["edit", "1", "name", "Alla"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Edit cancelled"));

    let after = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn sort_prints_table_without_saving() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Anna", "2001");
    add(temp.path(), "Boris", "1999");
    let before = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();

    let output = roster(temp.path())
        .args(["sort", "year", "--desc"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.find("Anna").unwrap() < stdout.find("Boris").unwrap());

    let after = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn binary_save_and_fallback_load() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Anna", "2001");

    roster(temp.path())
        .args(["save", "binary"])
        .assert()
        .success();
    assert!(temp.path().join("students.bin").exists());

    std::fs::remove_file(temp.path().join("students.txt")).unwrap();

    roster(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"))
        .stdout(predicate::str::contains("Anna"));
}

#[test]
fn corrupt_binary_load_fails() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Anna", "2001");
    std::fs::write(temp.path().join("students.bin"), [9u8, 0, 0, 0, 1]).unwrap();

    roster(temp.path())
        .args(["load", "binary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupt binary file"));
}

#[test]
fn malformed_text_lines_warn_but_load() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("students.txt"),
        "2001|2|Anna|Orlova|Ivanovna|Math|5,4,3|Art|4,4,4|Music|3,3,3\nbroken line\n",
    )
    .unwrap();

    roster(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped line 2"))
        .stdout(predicate::str::contains("Anna"));
}

#[test]
fn config_set_and_show() {
    let temp = tempfile::tempdir().unwrap();

    roster(temp.path())
        .args(["config", "course-min", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("course-min set to 1"));

    roster(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("course-min = 1"))
        .stdout(predicate::str::contains("text-file = students.txt"));
}

#[test]
fn roster_home_env_selects_directory() {
    let temp = tempfile::tempdir().unwrap();
    Command::cargo_bin("roster")
        .unwrap()
        .env("ROSTER_HOME", temp.path())
        .env("NO_COLOR", "1")
        .args(["config", "autoload", "false"])
        .assert()
        .success();

    assert!(temp.path().join("config.json").exists());
}

#[test]
fn menu_runs_until_exit() {
    let temp = tempfile::tempdir().unwrap();
    add(temp.path(), "Anna", "2001");

    roster(temp.path())
        .write_stdin("2\n7\n42\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Add student"))
        .stdout(predicate::str::contains("|Anna "))
        .stdout(predicate::str::contains("Loaded 1 record(s)"))
        .stdout(predicate::str::contains("Unknown option: 42"));
}

#[test]
fn menu_survives_errors_and_end_of_input() {
    let temp = tempfile::tempdir().unwrap();

    roster(temp.path())
        .write_stdin("4\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Invalid student number 3"));
}

#[test]
fn tightening_course_min_keeps_saved_records() {
    let temp = tempfile::tempdir().unwrap();
    add_in_course(temp.path(), "Anna", "1999", "0");
    add_in_course(temp.path(), "Boris", "2000", "0");

    roster(temp.path())
        .args(["config", "course-min", "1"])
        .assert()
        .success();
    add(temp.path(), "Vera", "2001");

    let text = std::fs::read_to_string(temp.path().join("students.txt")).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("|0|Anna|"));
    assert!(text.contains("|0|Boris|"));
}

#[test]
fn oversized_initial_capacity_is_refused() {
    let temp = tempfile::tempdir().unwrap();

    roster(temp.path())
        .args(["config", "initial-capacity", "100000000000000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial-capacity must be between"));

    std::fs::write(
        temp.path().join("config.json"),
        r#"{"initial_capacity": 100000000000000000}"#,
    )
    .unwrap();
    roster(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No students."));
    roster(temp.path())
        .args(["config", "initial-capacity", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial-capacity set to 10"));
}
