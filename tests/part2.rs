use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("example.txt");

    cmd.assert().success().stdout(str::contains("123"));
}

#[test]
fn part2_rejects_malformed_update() {
    let input = assert_fs::NamedTempFile::new("inputs.txt").unwrap();
    input.write_str("1|2\n\n1,one,2\n").unwrap();
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg(input.path());

    cmd.assert()
        .failure()
        .stderr(str::contains("Invalid page number text(one)"));
}
