//! Tests for `brackt shortcode`.

use brackt::test_utils::TestWorkspace;
use predicates::prelude::*;
use serde_json::Value;

use super::brackt;

#[test]
fn test_insert_into_empty_object() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["shortcode", "insert", "-", "user.id"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("{ \"user.id\": \"{{user.id}}\" }\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_insert_after_existing_claim() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["shortcode", "insert", "-", "user.id"])
        .write_stdin(r#"{ "a": "{{a}}" }"#)
        .assert()
        .success()
        .stdout("{ \"a\": \"{{a}}\", \"user.id\": \"{{user.id}}\" }\n");
}

#[test]
fn test_insert_in_place() {
    let workspace = TestWorkspace::new();
    let claims = workspace.write("claims.json", "{}\n");

    brackt(&workspace)
        .args(["shortcode", "insert"])
        .arg(&claims)
        .arg("user.id")
        .assert()
        .success();
    brackt(&workspace)
        .args(["shortcode", "insert"])
        .arg(&claims)
        .arg("app.name")
        .arg("--in-place")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let updated: Value = serde_json::from_str(&workspace.read("claims.json")).unwrap();
    assert_eq!(updated, serde_json::json!({ "app.name": "{{app.name}}" }));
}

#[test]
fn test_in_place_rejects_stdin() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["shortcode", "insert", "-", "user.id", "--in-place"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--in-place needs a file"));
}

#[test]
fn test_unknown_shortcode_warns_but_inserts() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["shortcode", "insert", "-", "user.frist_name"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"user.frist_name\": \"{{user.frist_name}}\""))
        .stderr(predicate::str::contains("did you mean user.first_name"));
}

#[test]
fn test_unclosed_buffer_keeps_claims() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["shortcode", "insert", "-", "app.name"])
        .write_stdin(r#"{ "sub": "{{user.id}}""#)
        .assert()
        .success()
        .stdout("{ \"sub\": \"{{user.id}}\", \"app.name\": \"{{app.name}}\" }\n");
}

#[test]
fn test_empty_buffer_is_replaced() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["shortcode", "insert", "-", "user.id"])
        .write_stdin("   ")
        .assert()
        .success()
        .stdout("{ \"user.id\": \"{{user.id}}\" }\n");
}

#[test]
fn test_list_text() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["shortcode", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user.first_name"))
        .stdout(predicate::str::contains("invitation.expires_in_days"));
}

#[test]
fn test_list_json() {
    let workspace = TestWorkspace::new();

    let output = brackt(&workspace)
        .args(["shortcode", "list", "--format", "json"])
        .assert()
        .success();

    let shortcodes: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let entries = shortcodes.as_array().unwrap();
    assert_eq!(entries.len(), brackt::shortcode::SHORTCODES.len());
    assert!(entries.iter().any(|s| s["name"] == "app.url" && s["category"] == "app"));
}
