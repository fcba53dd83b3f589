//! Template fixtures and temporary workspaces.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::templating::VariableContext;

/// A named template with a context and the output it should render to.
#[derive(Debug, Clone, Copy)]
pub struct TemplateFixture {
    pub name: &'static str,
    pub source: &'static str,
    pub context: &'static str,
    pub expected: &'static str,
}

impl TemplateFixture {
    /// Parse [`TemplateFixture::context`] as a [`VariableContext`].
    ///
    /// # Panics
    ///
    /// Panics if the fixture context is not a valid context object.
    pub fn context(&self) -> VariableContext {
        serde_json::from_str(self.context).expect("fixture context must be a JSON object")
    }
}

pub const INVITATION_EMAIL: TemplateFixture = TemplateFixture {
    name: "invitation.html",
    source: "[#if inviter_name][inviter_name] invited you[#else]You were invited[#endif] to [app.name]. \
             The link expires in [invitation.expires_in_days] days.",
    context: r#"{"inviter_name": "Grace", "app": {"name": "Console"}, "invitation": {"expires_in_days": 7}}"#,
    expected: "<p>Grace invited you to Console. The link expires in 7 days.</p>",
};

pub const WELCOME_EMAIL: TemplateFixture = TemplateFixture {
    name: "welcome.html",
    source: "<p>Welcome [user.first_name]!</p>[#if app.url]<a href=\"[app.url]\">Open [app.name]</a>[#endif]",
    context: r#"{"user": {"first_name": "Ada"}, "app": {"name": "Console", "url": ""}}"#,
    expected: "<p>Welcome Ada!</p>",
};

pub const ACCESS_CLAIMS: TemplateFixture = TemplateFixture {
    name: "claims.json",
    source: r#"{ "sub": "{{user.id}}", "org": "{{ organization.name }}" }"#,
    context: r#"{"user.id": "user_1", "organization": {"name": "Analytical Engines"}}"#,
    expected: r#"{ "sub": "user_1", "org": "Analytical Engines" }"#,
};

/// A temporary directory for template, context and config files.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` inside the workspace and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }

    /// Write a fixture's template and context; returns `(template, context)` paths.
    pub fn write_fixture(&self, fixture: &TemplateFixture) -> (PathBuf, PathBuf) {
        let template = self.write(fixture.name, fixture.source);
        let context = self.write(&format!("{}.context.json", fixture.name), fixture.context);
        (template, context)
    }

    /// # Panics
    ///
    /// Panics if the file cannot be read.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).expect("failed to read fixture file")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
