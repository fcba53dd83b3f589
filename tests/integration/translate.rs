//! Tests for `brackt translate`.

use brackt::test_utils::TestWorkspace;
use predicates::prelude::*;

use super::brackt;

#[test]
fn test_translate_file() {
    let workspace = TestWorkspace::new();
    let template = workspace.write("welcome.html", "Hi [user.first_name][#if app.url], visit [app.url][#endif]");

    brackt(&workspace)
        .arg("translate")
        .arg(&template)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<p>Hi {{ user.first_name }}{% if app.url %}, visit {{ app.url }}{% endif %}</p>",
        ));
}

#[test]
fn test_translate_stdin_without_wrapping() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["translate", "-", "--no-wrap"])
        .write_stdin("[#if a]yes[#else]no[#endif]")
        .assert()
        .success()
        .stdout("{% if a %}yes{% else %}no{% endif %}\n");
}

#[test]
fn test_translate_keeps_existing_paragraph() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["translate", "-"])
        .write_stdin("<p>Hello [user.username]</p>")
        .assert()
        .success()
        .stdout("<p>Hello {{ user.username }}</p>\n");
}

#[test]
fn test_translate_missing_file() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["translate", "missing.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read template from missing.html"));
}
