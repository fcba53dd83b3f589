//! Integration test suite for brackt
//!
//! End-to-end tests that drive the `brackt` binary through `assert_cmd`.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **translate**: Bracket to directive translation
//! - **render**: Rendering with context files, `--var` overrides and samples
//! - **check**: Validation reports in text and JSON
//! - **shortcode**: Claim insertion and the shortcode list
//! - **config**: Configuration file lookup and overrides

use assert_cmd::Command;
use brackt::test_utils::{TestWorkspace, init_test_logging};

mod check;
mod config;
mod render;
mod shortcode;
mod translate;

/// A `brackt` command isolated from the user's configuration.
///
/// `BRACKT_CONFIG` points at a file that does not exist inside the
/// workspace, so every test starts from default settings.
pub fn brackt(workspace: &TestWorkspace) -> Command {
    init_test_logging(None);
    let mut cmd = Command::cargo_bin("brackt").unwrap();
    cmd.current_dir(workspace.path())
        .env("BRACKT_CONFIG", workspace.path().join("no-config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}
