//! Tests for `brackt check`.

use brackt::test_utils::TestWorkspace;
use predicates::prelude::*;
use serde_json::Value;

use super::brackt;

#[test]
fn test_check_lists_referenced_paths() {
    let workspace = TestWorkspace::new();
    let template =
        workspace.write("invite.html", "[#if inviter_name][inviter_name][#endif] joined [app.name]");

    brackt(&workspace)
        .arg("check")
        .arg(&template)
        .assert()
        .success()
        .stdout(predicate::str::contains("invite.html"))
        .stdout(predicate::str::contains("variables: inviter_name, app.name"))
        .stdout(predicate::str::contains("conditions: inviter_name"));
}

#[test]
fn test_check_rejects_nested_if() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["check", "-"])
        .write_stdin("[#if a][#if b]x[#endif][#endif]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template syntax error"));
}

#[test]
fn test_check_json_success() {
    let workspace = TestWorkspace::new();

    let output = brackt(&workspace)
        .args(["check", "-", "--syntax", "directive", "--format", "json"])
        .write_stdin(r#"{ "sub": "{{user.id}}" }"#)
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(report["file"], "<stdin>");
    assert_eq!(report["valid"], true);
    assert_eq!(report["variables"], serde_json::json!(["user.id"]));
    assert!(report.get("error").is_none());
}

#[test]
fn test_check_json_failure() {
    let workspace = TestWorkspace::new();

    let output = brackt(&workspace)
        .args(["check", "-", "--format", "json"])
        .write_stdin("Hello\n[#else]")
        .assert()
        .failure();

    let report: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["error"]["kind"], "syntax");
    assert_eq!(report["error"]["line"], 2);
    assert_eq!(report["error"]["column"], 1);
}

#[test]
fn test_check_reports_stray_comment_marker() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["check", "-", "--syntax", "directive"])
        .write_stdin("Price {# unclosed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed template"));
}
