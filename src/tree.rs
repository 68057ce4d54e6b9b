//! Translation Trees
//!
//! A translation tree maps locale codes to namespace roots. Values are
//! recursive: string/number/boolean/null leaves, sequences, and mappings.
//! `serde_json::Value` is exactly that shape, so it serves as the value type;
//! the `preserve_order` feature keeps tree walks deterministic.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// A single translation value: a leaf, a sequence, or a nested mapping.
pub type TranslationValue = Value;

/// Translations for all locales, keyed by locale code.
pub type TranslationTree = HashMap<String, TranslationValue>;

/// The six CLDR plural category keys, in canonical order.
pub const PLURAL_KEYS: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

/// Structural classification of a mapping node.
///
/// A mapping is a plural form purely by virtue of its keys: non-empty and
/// every key drawn from the fixed CLDR category set. There is no tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An ordinary nested namespace
    PlainNamespace,
    /// A plural-form object (keys ⊆ {zero,one,two,few,many,other})
    PluralForm,
}

/// Classify a mapping node as a plain namespace or a plural-form object.
///
/// Centralizes the shape dispatch so tree walkers never sniff keys inline.
pub fn classify_node(map: &Map<String, Value>) -> NodeKind {
    if !map.is_empty() && map.keys().all(|k| PLURAL_KEYS.contains(&k.as_str())) {
        NodeKind::PluralForm
    } else {
        NodeKind::PlainNamespace
    }
}

/// Deep-merge `incoming` into `existing`.
///
/// When both sides are plain mappings the merge recurses; any other pairing
/// lets the incoming value fully overwrite the old one. Arrays are replaced,
/// never concatenated.
pub fn deep_merge(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, value) in new {
                match old.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        old.insert(key, value);
                    }
                }
            }
        }
        (slot, new) => *slot = new,
    }
}

/// Render a resolved value as a display string.
///
/// Strings pass through unquoted, scalars use their JSON text, and
/// objects/arrays are JSON-encoded rather than erroring. Resolution misses
/// and odd shapes are never fatal, so this cannot fail: serializing an
/// in-memory `Value` only errors on pathological float edge cases, which
/// degrade to an empty string.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: &Value) -> &Map<String, Value> {
        value.as_object().unwrap()
    }

    #[test]
    fn test_classify_plural_form() {
        let v = json!({"one": "item", "other": "items"});
        assert_eq!(classify_node(as_map(&v)), NodeKind::PluralForm);

        let v = json!({"zero": "none"});
        assert_eq!(classify_node(as_map(&v)), NodeKind::PluralForm);
    }

    #[test]
    fn test_classify_plain_namespace() {
        let v = json!({"one": "item", "greeting": "hi"});
        assert_eq!(classify_node(as_map(&v)), NodeKind::PlainNamespace);

        // Empty mapping is not a plural object
        let v = json!({});
        assert_eq!(classify_node(as_map(&v)), NodeKind::PlainNamespace);
    }

    #[test]
    fn test_deep_merge_recurses_on_mappings() {
        let mut base = json!({"nav": {"home": "Home", "back": "Back"}});
        deep_merge(&mut base, json!({"nav": {"back": "Return", "next": "Next"}}));

        assert_eq!(
            base,
            json!({"nav": {"home": "Home", "back": "Return", "next": "Next"}})
        );
    }

    #[test]
    fn test_deep_merge_overwrites_non_mappings() {
        let mut base = json!({"items": ["a", "b"], "n": 1});
        deep_merge(&mut base, json!({"items": ["c"], "n": {"nested": true}}));

        assert_eq!(base, json!({"items": ["c"], "n": {"nested": true}}));
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!("plain")), "plain");
        assert_eq!(stringify(&json!(3)), "3");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(null)), "null");
        assert_eq!(stringify(&json!({"a": 1})), "{\"a\":1}");
        assert_eq!(stringify(&json!([1, 2])), "[1,2]");
    }
}
