//! Variable context for template rendering.
//!
//! The host page assembles a [`VariableContext`] from domain data (user,
//! organization, session, app fields) and hands it to
//! [`CompiledTemplate::render`](super::CompiledTemplate::render). Values are
//! a closed set of variants so missing keys and type mismatches are explicit.
//!
//! Keys may be plain (`"user"` holding a map) or dotted (`"user.name"`).
//! [`VariableContext::lookup`] accepts both shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::utils::deep_merge;

/// Errors raised when building a context from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("template context must be a JSON object, found {found}")]
    NotAnObject {
        found: &'static str,
    },

    #[error("arrays are not supported in template context (at `{path}`)")]
    ArrayNotSupported {
        path: String,
    },
}

/// A single value in the variable context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ContextValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Map(BTreeMap<String, ContextValue>),
}

impl ContextValue {
    /// Truthiness used by conditional blocks.
    ///
    /// Null, `false`, zero, `NaN` and the empty string are falsy. Maps are
    /// always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            ContextValue::Null => false,
            ContextValue::Bool(b) => *b,
            ContextValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            ContextValue::String(s) => !s.is_empty(),
            ContextValue::Map(_) => true,
        }
    }

    /// Text produced when the value is interpolated, if it has one.
    ///
    /// Null and maps have no textual form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ContextValue::Null | ContextValue::Map(_) => None,
            ContextValue::Bool(b) => Some(b.to_string()),
            ContextValue::Number(n) => Some(n.to_string()),
            ContextValue::String(s) => Some(s.clone()),
        }
    }

    /// Parse a command-line literal.
    ///
    /// JSON scalars and objects are taken as JSON; anything else is a plain
    /// string, so `--var user.name=Ada` needs no quoting.
    pub fn parse_literal(literal: &str) -> ContextValue {
        match serde_json::from_str::<Value>(literal) {
            Ok(value @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::Object(_))) => {
                ContextValue::try_from(value)
                    .unwrap_or_else(|_| ContextValue::String(literal.to_string()))
            }
            _ => ContextValue::String(literal.to_string()),
        }
    }

    fn from_json(value: Value, path: &str) -> Result<Self, ContextError> {
        Ok(match value {
            Value::Null => ContextValue::Null,
            Value::Bool(b) => ContextValue::Bool(b),
            Value::Number(n) => ContextValue::Number(n),
            Value::String(s) => ContextValue::String(s),
            Value::Array(_) => {
                return Err(ContextError::ArrayNotSupported {
                    path: path.to_string(),
                });
            }
            Value::Object(map) => ContextValue::Map(map_from_json(map, path)?),
        })
    }
}

fn map_from_json(
    map: Map<String, Value>,
    parent: &str,
) -> Result<BTreeMap<String, ContextValue>, ContextError> {
    map.into_iter()
        .map(|(key, value)| {
            let path = if parent.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", parent, key)
            };
            ContextValue::from_json(value, &path).map(|value| (key, value))
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<Value> for ContextValue {
    type Error = ContextError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ContextValue::from_json(value, "")
    }
}

impl From<ContextValue> for Value {
    fn from(value: ContextValue) -> Self {
        match value {
            ContextValue::Null => Value::Null,
            ContextValue::Bool(b) => Value::Bool(b),
            ContextValue::Number(n) => Value::Number(n),
            ContextValue::String(s) => Value::String(s),
            ContextValue::Map(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Number(Number::from(value))
    }
}

impl From<u64> for ContextValue {
    fn from(value: u64) -> Self {
        ContextValue::Number(Number::from(value))
    }
}

impl From<f64> for ContextValue {
    /// Non-finite floats have no JSON form and become null.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(ContextValue::Null, ContextValue::Number)
    }
}

impl From<BTreeMap<String, ContextValue>> for ContextValue {
    fn from(value: BTreeMap<String, ContextValue>) -> Self {
        ContextValue::Map(value)
    }
}

impl<T: Into<ContextValue>> From<Option<T>> for ContextValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ContextValue::Null, Into::into)
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Map(_) => write!(f, "{}", Value::from(self.clone())),
            ContextValue::Null => f.write_str("null"),
            other => f.write_str(&other.as_text().unwrap_or_default()),
        }
    }
}

/// String-keyed variables supplied at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct VariableContext {
    values: BTreeMap<String, ContextValue>,
}

impl VariableContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value under `key`, replacing any previous value for that exact key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Resolve a dotted path.
    ///
    /// An exact key wins. Otherwise the path is split at each `.` from the
    /// right and the longest prefix naming a map is searched for the rest of
    /// the path, recursively.
    pub fn lookup(&self, path: &str) -> Option<&ContextValue> {
        lookup_in(&self.values, path)
    }

    /// Every addressable leaf path, sorted. Used for suggestions.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.values, "", &mut paths);
        paths.sort();
        paths.dedup();
        paths
    }

    /// Merge `overrides` into this context.
    ///
    /// Maps present on both sides are merged recursively; any other value in
    /// `overrides` replaces the existing one.
    pub fn merge(&mut self, overrides: VariableContext) {
        deep_merge(&mut self.values, overrides.values);
    }

    /// Build a context from a JSON object.
    ///
    /// # Errors
    ///
    /// Fails when the value is not an object or contains arrays.
    pub fn from_json(value: Value) -> Result<Self, ContextError> {
        match value {
            Value::Object(map) => Ok(Self {
                values: map_from_json(map, "")?,
            }),
            other => Err(ContextError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn lookup_in<'a>(map: &'a BTreeMap<String, ContextValue>, path: &str) -> Option<&'a ContextValue> {
    if let Some(value) = map.get(path) {
        return Some(value);
    }

    for (dot, _) in path.rmatch_indices('.') {
        let (head, tail) = (&path[..dot], &path[dot + 1..]);
        if let Some(ContextValue::Map(inner)) = map.get(head) {
            if let Some(value) = lookup_in(inner, tail) {
                return Some(value);
            }
        }
    }

    None
}

fn collect_paths(map: &BTreeMap<String, ContextValue>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            ContextValue::Map(inner) if !inner.is_empty() => collect_paths(inner, &path, out),
            _ => out.push(path),
        }
    }
}

impl TryFrom<Value> for VariableContext {
    type Error = ContextError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        VariableContext::from_json(value)
    }
}

impl From<VariableContext> for Value {
    fn from(context: VariableContext) -> Self {
        Value::Object(context.values.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for VariableContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = VariableContext::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_exact_dotted_key() {
        let ctx = VariableContext::new().with("user.name", "Ada");
        assert_eq!(ctx.lookup("user.name"), Some(&ContextValue::from("Ada")));
        assert_eq!(ctx.lookup("user"), None);
    }

    #[test]
    fn test_lookup_structural() {
        let ctx = VariableContext::from_json(json!({
            "user": { "first_name": "Ada", "profile": { "age": 36 } },
            "invitation": { "expires_in_days": 7 }
        }))
        .unwrap();

        assert_eq!(ctx.lookup("user.first_name"), Some(&ContextValue::from("Ada")));
        assert_eq!(ctx.lookup("user.profile.age"), Some(&ContextValue::from(36_i64)));
        assert_eq!(ctx.lookup("invitation.expires_in_days"), Some(&ContextValue::from(7_i64)));
        assert_eq!(ctx.lookup("user.last_name"), None);
        assert_eq!(ctx.lookup("user.first_name.x"), None);
    }

    #[test]
    fn test_lookup_mixed_dotted_keys_inside_maps() {
        let ctx = VariableContext::from_json(json!({
            "app": { "branding.logo": "logo.png" },
            "app.name": "Console"
        }))
        .unwrap();

        assert_eq!(ctx.lookup("app.branding.logo"), Some(&ContextValue::from("logo.png")));
        assert_eq!(ctx.lookup("app.name"), Some(&ContextValue::from("Console")));
    }

    #[test]
    fn test_exact_key_wins_over_structure() {
        let ctx = VariableContext::new()
            .with("user.name", "flat")
            .with("user", BTreeMap::from([("name".to_string(), ContextValue::from("nested"))]));
        assert_eq!(ctx.lookup("user.name"), Some(&ContextValue::from("flat")));
    }

    #[test]
    fn test_truthiness() {
        assert!(!ContextValue::Null.is_truthy());
        assert!(!ContextValue::from(false).is_truthy());
        assert!(!ContextValue::from(0_i64).is_truthy());
        assert!(!ContextValue::from(0.0).is_truthy());
        assert!(!ContextValue::from("").is_truthy());
        assert!(ContextValue::from("0").is_truthy());
        assert!(ContextValue::from(-1_i64).is_truthy());
        assert!(ContextValue::Map(BTreeMap::new()).is_truthy());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(ContextValue::from(7_i64).as_text().as_deref(), Some("7"));
        assert_eq!(ContextValue::from(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(ContextValue::from(true).as_text().as_deref(), Some("true"));
        assert_eq!(ContextValue::Null.as_text(), None);
        assert_eq!(ContextValue::from(f64::NAN), ContextValue::Null);
    }

    #[test]
    fn test_from_json_rejects_arrays_and_scalars() {
        let err = VariableContext::from_json(json!({ "user": { "roles": ["admin"] } })).unwrap_err();
        assert_eq!(
            err,
            ContextError::ArrayNotSupported {
                path: "user.roles".to_string()
            }
        );

        let err = VariableContext::from_json(json!("nope")).unwrap_err();
        assert_eq!(
            err,
            ContextError::NotAnObject {
                found: "string"
            }
        );
    }

    #[test]
    fn test_deserialize_and_serialize() {
        let ctx: VariableContext =
            serde_json::from_str(r#"{"user.id": "u_1", "app": {"name": "Console"}}"#).unwrap();
        assert_eq!(ctx.lookup("app.name"), Some(&ContextValue::from("Console")));

        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value, json!({"user.id": "u_1", "app": {"name": "Console"}}));
    }

    #[test]
    fn test_merge_is_deep() {
        let mut base = VariableContext::from_json(json!({
            "user": { "first_name": "Ada", "last_name": "Lovelace" }
        }))
        .unwrap();
        let overrides = VariableContext::from_json(json!({
            "user": { "first_name": "Grace" },
            "app.name": "Console"
        }))
        .unwrap();

        base.merge(overrides);

        assert_eq!(base.lookup("user.first_name"), Some(&ContextValue::from("Grace")));
        assert_eq!(base.lookup("user.last_name"), Some(&ContextValue::from("Lovelace")));
        assert_eq!(base.lookup("app.name"), Some(&ContextValue::from("Console")));
    }

    #[test]
    fn test_paths() {
        let ctx = VariableContext::from_json(json!({
            "user": { "id": "u_1", "first_name": "Ada" },
            "inviter_name": "Grace"
        }))
        .unwrap();
        assert_eq!(ctx.paths(), vec!["inviter_name", "user.first_name", "user.id"]);
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(ContextValue::parse_literal("Ada"), ContextValue::from("Ada"));
        assert_eq!(ContextValue::parse_literal("7"), ContextValue::from(7_i64));
        assert_eq!(ContextValue::parse_literal("false"), ContextValue::from(false));
        assert_eq!(ContextValue::parse_literal("null"), ContextValue::Null);
        assert_eq!(ContextValue::parse_literal("[1, 2]"), ContextValue::from("[1, 2]"));
        assert_eq!(ContextValue::parse_literal("\"quoted\""), ContextValue::from("\"quoted\""));
    }
}
