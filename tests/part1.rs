use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("example.txt");

    cmd.assert().success().stdout(str::contains("143"));
}

#[test]
fn part1_serial_gives_same_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("--serial").arg("-vv").arg("example.txt");

    cmd.assert().success().stdout(str::contains("143"));
}

#[test]
fn part1_fails_on_missing_input() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("missing.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to read printer settings"));
}
