//! Tests for `brackt render`.

use brackt::test_utils::TestWorkspace;
use brackt::test_utils::fixtures::{ACCESS_CLAIMS, INVITATION_EMAIL, WELCOME_EMAIL};
use predicates::prelude::*;

use super::brackt;

#[test]
fn test_render_with_context_file() {
    let workspace = TestWorkspace::new();
    let (template, context) = workspace.write_fixture(&INVITATION_EMAIL);

    brackt(&workspace)
        .arg("render")
        .arg(&template)
        .arg("--context")
        .arg(&context)
        .assert()
        .success()
        .stdout(format!("{}\n", INVITATION_EMAIL.expected));
}

#[test]
fn test_render_falsy_condition_takes_else_branch() {
    let workspace = TestWorkspace::new();
    let template = workspace.write(INVITATION_EMAIL.name, INVITATION_EMAIL.source);

    brackt(&workspace)
        .arg("render")
        .arg(&template)
        .args(["--var", "app.name=Console", "--var", "invitation.expires_in_days=3"])
        .assert()
        .success()
        .stdout("<p>You were invited to Console. The link expires in 3 days.</p>\n");
}

#[test]
fn test_var_overrides_context_file() {
    let workspace = TestWorkspace::new();
    let (template, context) = workspace.write_fixture(&WELCOME_EMAIL);

    brackt(&workspace)
        .arg("render")
        .arg(&template)
        .arg("--context")
        .arg(&context)
        .args(["--var", "user.first_name=Grace"])
        .assert()
        .success()
        .stdout("<p>Welcome Grace!</p>\n");
}

#[test]
fn test_missing_variables_render_empty() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["render", "-"])
        .write_stdin("Hello [user.first_name]!")
        .assert()
        .success()
        .stdout("<p>Hello !</p>\n");
}

#[test]
fn test_values_are_escaped_by_default() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["render", "-", "--no-wrap", "--var", "user.first_name=<b>Ada</b> & co"])
        .write_stdin("[user.first_name]")
        .assert()
        .success()
        .stdout("&lt;b&gt;Ada&lt;&#x2F;b&gt; &amp; co\n");

    brackt(&workspace)
        .args(["render", "-", "--no-wrap", "--no-escape", "--var", "user.first_name=<b>Ada</b>"])
        .write_stdin("[user.first_name]")
        .assert()
        .success()
        .stdout("<b>Ada</b>\n");
}

#[test]
fn test_strict_mode_reports_missing_variable() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["render", "-", "--strict", "--var", "user.first_nam=Ada"])
        .write_stdin("Hello [user.first_name]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("variable `user.first_name`"))
        .stderr(predicate::str::contains("is not defined"))
        .stderr(predicate::str::contains("user.first_nam"));
}

#[test]
fn test_sample_values() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["render", "-", "--sample", "--var", "app.name=Docs"])
        .write_stdin("[user.first_name] [user.last_name] uses [app.name]")
        .assert()
        .success()
        .stdout("<p>Ada Lovelace uses Docs</p>\n");
}

#[test]
fn test_render_directive_claims() {
    let workspace = TestWorkspace::new();
    let (template, context) = workspace.write_fixture(&ACCESS_CLAIMS);

    brackt(&workspace)
        .arg("render")
        .arg(&template)
        .arg("--context")
        .arg(&context)
        .args(["--syntax", "directive", "--no-escape"])
        .assert()
        .success()
        .stdout(format!("{}\n", ACCESS_CLAIMS.expected));
}

#[test]
fn test_render_several_files() {
    let workspace = TestWorkspace::new();
    let first = workspace.write("a.html", "A [x]");
    let second = workspace.write("b.html", "B [x]");

    brackt(&workspace)
        .arg("render")
        .arg(&first)
        .arg(&second)
        .arg(&first)
        .args(["--var", "x=1"])
        .assert()
        .success()
        .stdout("<p>A 1</p>\n<p>B 1</p>\n<p>A 1</p>\n");
}

#[test]
fn test_syntax_error_is_reported_with_location() {
    let workspace = TestWorkspace::new();
    let template = workspace.write("broken.html", "Hi\n[#if app.url]open");

    brackt(&workspace)
        .arg("render")
        .arg(&template)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unclosed `if` block"))
        .stderr(predicate::str::contains("Line: 2"));
}

#[test]
fn test_invalid_context_file() {
    let workspace = TestWorkspace::new();
    let template = workspace.write("t.html", "[a]");
    let context = workspace.write("context.json", "[1, 2]");

    brackt(&workspace)
        .arg("render")
        .arg(&template)
        .arg("--context")
        .arg(&context)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template context"));
}

#[test]
fn test_invalid_assignment() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["render", "-", "--var", "user.first_name"])
        .write_stdin("[user.first_name]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid variable assignment 'user.first_name'"));
}
