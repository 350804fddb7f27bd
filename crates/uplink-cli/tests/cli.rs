use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("uplink"))
}

#[test]
fn decode_outputs_datalines_json() {
    let assert = cmd()
        .arg("decode")
        .arg("dlmbx")
        .arg("02012f000304d200010bb1")
        .arg("1")
        .arg("--time")
        .arg("2022-03-02T12:21:30+00:00")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value[0]["time"], "2022-03-02T12:21:30+00:00");
    assert_eq!(value[0]["data"]["dl_id"], 303);
    assert_eq!(value[0]["data"]["distance"], 1234);
    assert_eq!(value[0]["data"]["batt"], 2.993);
}

#[test]
fn decode_without_time_emits_null() {
    let assert = cmd()
        .arg("decode")
        .arg("paxcounter")
        .arg("0003")
        .arg("1")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert!(value[0]["time"].is_null());
    assert_eq!(value[0]["data"]["wifi"], 3);
}

#[test]
fn pretty_output_is_multiline_json() {
    let assert = cmd()
        .arg("decode")
        .arg("paxcounter")
        .arg("0003")
        .arg("1")
        .arg("--pretty")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.lines().count() > 1);
    let _: Value = serde_json::from_str(&stdout).expect("valid json");
}

#[test]
fn unknown_format_shows_error_and_hint() {
    cmd()
        .arg("decode")
        .arg("nosuchformat")
        .arg("0003")
        .arg("1")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn malformed_hex_fails_with_hint() {
    cmd()
        .arg("decode")
        .arg("paxcounter")
        .arg("00zz")
        .arg("1")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("malformed hex").and(contains("even-length hex string")));
}

#[test]
fn invalid_time_fails() {
    cmd()
        .arg("decode")
        .arg("paxcounter")
        .arg("0003")
        .arg("1")
        .arg("--time")
        .arg("yesterday")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error:").and(contains("RFC3339")));
}

#[test]
fn formats_lists_known_keys() {
    cmd()
        .arg("formats")
        .assert()
        .success()
        .stdout(contains("dlmbx").and(contains("paxcounter")).and(contains("sompasensecap")));
}
