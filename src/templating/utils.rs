//! Utility functions for the templating system.

use std::collections::BTreeMap;

use super::context::ContextValue;

/// Perform a deep merge of two context maps.
///
/// Recursively merges `overrides` into `base`. Where both sides hold a map
/// under the same key the maps are merged; otherwise the value from
/// `overrides` replaces the one in `base`.
///
/// # Examples
///
/// ```
/// use brackt::templating::{VariableContext, ContextValue};
///
/// let mut base: VariableContext = serde_json::from_str(
///     r#"{ "app": { "name": "Console", "url": "https://a.example" } }"#,
/// ).unwrap();
/// let overrides: VariableContext = serde_json::from_str(
///     r#"{ "app": { "url": "https://b.example" } }"#,
/// ).unwrap();
///
/// base.merge(overrides);
/// assert_eq!(base.lookup("app.name"), Some(&ContextValue::from("Console")));
/// assert_eq!(base.lookup("app.url"), Some(&ContextValue::from("https://b.example")));
/// ```
pub(crate) fn deep_merge(
    base: &mut BTreeMap<String, ContextValue>,
    overrides: BTreeMap<String, ContextValue>,
) {
    for (key, override_value) in overrides {
        match (base.get_mut(&key), override_value) {
            (Some(ContextValue::Map(base_map)), ContextValue::Map(override_map)) => {
                deep_merge(base_map, override_map);
            }
            (_, override_value) => {
                base.insert(key, override_value);
            }
        }
    }
}

/// Find similar names using Levenshtein distance.
///
/// Returns up to three candidates whose distance to `target` is within half
/// of the target's length, closest first.
pub(crate) fn find_similar<'a, I>(target: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<_> = candidates
        .into_iter()
        .map(|candidate| (candidate, strsim::levenshtein(target, candidate)))
        .collect();

    scored.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));

    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(MAX_SUGGESTIONS)
        .map(|(candidate, _)| candidate.to_string())
        .collect()
}

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

const MAX_SUGGESTIONS: usize = 3;
