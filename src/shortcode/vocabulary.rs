//! Known shortcodes offered by the template editors.
//!
//! The vocabulary only drives editor affordances: listing, "did you mean"
//! suggestions and sample preview data. The compiler treats every dotted
//! path the same way whether or not it appears here.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::templating::{ContextValue, VariableContext};
use crate::templating::utils::find_similar;

/// Domain object a shortcode draws its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcodeCategory {
    User,
    Organization,
    Session,
    App,
    Invitation,
}

impl fmt::Display for ShortcodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShortcodeCategory::User => "user",
            ShortcodeCategory::Organization => "organization",
            ShortcodeCategory::Session => "session",
            ShortcodeCategory::App => "app",
            ShortcodeCategory::Invitation => "invitation",
        };
        f.write_str(name)
    }
}

/// A predefined variable insertable from the editor toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortcode {
    pub name: &'static str,
    pub category: ShortcodeCategory,
    pub description: &'static str,
    /// Value used for previews when no real data is available
    pub sample: &'static str,
}

const fn shortcode(
    name: &'static str,
    category: ShortcodeCategory,
    description: &'static str,
    sample: &'static str,
) -> Shortcode {
    Shortcode {
        name,
        category,
        description,
        sample,
    }
}

pub const SHORTCODES: &[Shortcode] = &[
    shortcode("user.id", ShortcodeCategory::User, "Unique user identifier", "user_2a9f1c"),
    shortcode("user.username", ShortcodeCategory::User, "Username", "ada"),
    shortcode("user.first_name", ShortcodeCategory::User, "First name", "Ada"),
    shortcode("user.last_name", ShortcodeCategory::User, "Last name", "Lovelace"),
    shortcode(
        "user.primary_email_address",
        ShortcodeCategory::User,
        "Primary email address",
        "ada@example.com",
    ),
    shortcode(
        "user.primary_phone_number",
        ShortcodeCategory::User,
        "Primary phone number",
        "+15555550100",
    ),
    shortcode("user.image_url", ShortcodeCategory::User, "Profile image URL", "https://img.example.com/ada.png"),
    shortcode("organization.id", ShortcodeCategory::Organization, "Active organization identifier", "org_7c21"),
    shortcode("organization.name", ShortcodeCategory::Organization, "Active organization name", "Analytical Engines"),
    shortcode("organization.role", ShortcodeCategory::Organization, "User role in the active organization", "admin"),
    shortcode("session.id", ShortcodeCategory::Session, "Session identifier", "sess_91ab"),
    shortcode("session.actor", ShortcodeCategory::Session, "Impersonating actor, if any", ""),
    shortcode("app.name", ShortcodeCategory::App, "Application name", "Acme Console"),
    shortcode("app.url", ShortcodeCategory::App, "Application URL", "https://console.example.com"),
    shortcode("app.logo_url", ShortcodeCategory::App, "Application logo URL", "https://img.example.com/logo.png"),
    shortcode("inviter_name", ShortcodeCategory::Invitation, "Name of the person who sent the invitation", "Grace Hopper"),
    shortcode("invitation.expires_in_days", ShortcodeCategory::Invitation, "Days until the invitation expires", "7"),
    shortcode("invitation.action_url", ShortcodeCategory::Invitation, "Link that accepts the invitation", "https://console.example.com/accept"),
];

/// Look up a shortcode by exact name.
pub fn find(name: &str) -> Option<&'static Shortcode> {
    SHORTCODES.iter().find(|shortcode| shortcode.name == name)
}

/// Known shortcode names close to `name`, closest first.
pub fn suggest(name: &str) -> Vec<String> {
    find_similar(name, SHORTCODES.iter().map(|shortcode| shortcode.name))
}

pub fn by_category(category: ShortcodeCategory) -> impl Iterator<Item = &'static Shortcode> {
    SHORTCODES.iter().filter(move |shortcode| shortcode.category == category)
}

/// A context filled with every shortcode's sample value, for previews.
///
/// Values are nested by path segment, so a context merged on top overrides
/// individual samples.
pub fn sample_context() -> VariableContext {
    let mut root = BTreeMap::new();
    for shortcode in SHORTCODES {
        nest(&mut root, shortcode.name, ContextSample(shortcode.sample).into());
    }
    root.into_iter().collect()
}

/// Place `value` at a dotted `path`, creating intermediate maps.
fn nest(map: &mut BTreeMap<String, ContextValue>, path: &str, value: ContextValue) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| ContextValue::Map(BTreeMap::new()));
            if !matches!(entry, ContextValue::Map(_)) {
                *entry = ContextValue::Map(BTreeMap::new());
            }
            if let ContextValue::Map(inner) = entry {
                nest(inner, rest, value);
            }
        }
    }
}

/// Sample values are text except for the numeric ones.
struct ContextSample(&'static str);

impl From<ContextSample> for ContextValue {
    fn from(sample: ContextSample) -> Self {
        let numeric = !sample.0.is_empty() && sample.0.chars().all(|c| c.is_ascii_digit());
        match sample.0.parse::<i64>() {
            Ok(n) if numeric => n.into(),
            _ => sample.0.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique_dotted_paths() {
        let mut seen = HashSet::new();
        for shortcode in SHORTCODES {
            assert!(crate::templating::is_dotted_path(shortcode.name), "{}", shortcode.name);
            assert!(seen.insert(shortcode.name), "duplicate shortcode {}", shortcode.name);
        }
    }

    #[test]
    fn test_find_and_suggest() {
        assert_eq!(find("app.url").map(|s| s.category), Some(ShortcodeCategory::App));
        assert!(find("app.uri").is_none());
        assert_eq!(suggest("user.frist_name").first().map(String::as_str), Some("user.first_name"));
    }

    #[test]
    fn test_sample_context() {
        let ctx = sample_context();
        assert_eq!(ctx.lookup("user.first_name"), Some(&ContextValue::from("Ada")));
        assert_eq!(ctx.lookup("invitation.expires_in_days"), Some(&ContextValue::from(7_i64)));
        assert_eq!(ctx.lookup("session.actor"), Some(&ContextValue::from("")));
        assert!(matches!(ctx.lookup("user"), Some(ContextValue::Map(_))));
    }

    #[test]
    fn test_sample_context_yields_to_merged_values() {
        let mut ctx = sample_context();
        ctx.merge(VariableContext::from_json(serde_json::json!({"user": {"first_name": "Grace"}})).unwrap());

        assert_eq!(ctx.lookup("user.first_name"), Some(&ContextValue::from("Grace")));
        assert_eq!(ctx.lookup("user.last_name"), Some(&ContextValue::from("Lovelace")));
    }

    #[test]
    fn test_by_category() {
        assert!(by_category(ShortcodeCategory::Invitation).any(|s| s.name == "inviter_name"));
        assert_eq!(ShortcodeCategory::Organization.to_string(), "organization");
    }
}
