//! Tests for configuration file handling.

use brackt::test_utils::TestWorkspace;
use predicates::prelude::*;

use super::brackt;

#[test]
fn test_config_file_sets_defaults() {
    let workspace = TestWorkspace::new();
    let config = workspace.write("brackt.toml", "[templates]\nwrap_paragraph = false\nstrict = true\n");

    brackt(&workspace)
        .arg("--config")
        .arg(&config)
        .args(["translate", "-"])
        .write_stdin("[a]")
        .assert()
        .success()
        .stdout("{{ a }}\n");

    brackt(&workspace)
        .arg("--config")
        .arg(&config)
        .args(["render", "-"])
        .write_stdin("[a]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("variable `a`"));
}

#[test]
fn test_config_from_environment() {
    let workspace = TestWorkspace::new();
    let config = workspace.write("env.toml", "[templates]\nescape_html = false\n");

    brackt(&workspace)
        .env("BRACKT_CONFIG", &config)
        .args(["render", "-", "--no-wrap", "--var", "a=<i>"])
        .write_stdin("[a]")
        .assert()
        .success()
        .stdout("<i>\n");
}

#[test]
fn test_missing_explicit_config() {
    let workspace = TestWorkspace::new();

    brackt(&workspace)
        .args(["--config", "absent.toml", "shortcode", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found: absent.toml"));
}

#[test]
fn test_invalid_config() {
    let workspace = TestWorkspace::new();
    let config = workspace.write("bad.toml", "[templates]\nstrict = \"yes\"\n");

    brackt(&workspace)
        .arg("--config")
        .arg(&config)
        .args(["shortcode", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
