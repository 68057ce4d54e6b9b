//! Translation Tree Conversion
//!
//! Rewrites every string and plural object in a translation tree from one
//! backend convention to the other. Interpolation placeholders are rewritten
//! in place; Rails plural objects collapse into single pipe-delimited string
//! leaves when targeting Laravel. Going the other way the tree walker only
//! rewrites placeholders; structural re-pluralization of a pipe string is
//! the separate [`laravel_plural_to_rails`] entry point.

use crate::interpolate::Interpolator;
use crate::mode::{InterpolationOptions, Mode};
use crate::plural::{key_to_pipe, pipe_to_key};
use crate::tree::{classify_node, NodeKind, TranslationTree};
use serde_json::{Map, Value};

/// Convert a whole translation tree between modes.
///
/// Equal modes are an identity conversion: the input is returned as-is
/// (cloned, since Rust has no aliasing to preserve here).
///
/// # Example
///
/// ```
/// use i18n_bridge::{convert_translations, Mode};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let mut tree = HashMap::new();
/// tree.insert("en".to_string(), json!({"greeting": "Hello, %{name}!"}));
///
/// let out = convert_translations(&tree, Mode::Rails, Mode::Laravel);
/// assert_eq!(out["en"]["greeting"], json!("Hello, :name!"));
/// ```
pub fn convert_translations(tree: &TranslationTree, from: Mode, to: Mode) -> TranslationTree {
    if from == to {
        return tree.clone();
    }

    let from_options = from.interpolation_options();
    let to_options = to.interpolation_options();

    log::debug!("converting translation tree {from}->{to} ({} locales)", tree.len());
    tree.iter()
        .map(|(locale, value)| {
            (
                locale.clone(),
                convert_value(value, from, to, &from_options, &to_options),
            )
        })
        .collect()
}

/// Convert a single pipe-delimited Laravel plural string into a Rails plural
/// object, placeholders included (`:count` -> `%{count}`).
///
/// Returns `None` when the string has no extractable plural form.
pub fn laravel_plural_to_rails(text: &str) -> Option<Value> {
    let map = pipe_to_key(text)?;
    let laravel = InterpolationOptions::laravel();
    let rails = InterpolationOptions::rails();

    let converted: Map<String, Value> = map
        .as_object()
        .into_iter()
        .flatten()
        .map(|(form, value)| {
            let text = value.as_str().unwrap_or_default();
            (
                form.clone(),
                Value::String(Interpolator::convert(text, &laravel, &rails)),
            )
        })
        .collect();
    Some(Value::Object(converted))
}

fn convert_value(
    value: &Value,
    from: Mode,
    to: Mode,
    from_options: &InterpolationOptions,
    to_options: &InterpolationOptions,
) -> Value {
    match value {
        Value::Object(map) => {
            if from == Mode::Rails
                && to == Mode::Laravel
                && classify_node(map) == NodeKind::PluralForm
            {
                if let Some(pipe) = convert_plural_object(map, from_options, to_options) {
                    return Value::String(pipe);
                }
                // No representable zero/one/other form; fall through and keep
                // the object shape with placeholders rewritten
            }
            Value::Object(
                map.iter()
                    .map(|(key, inner)| {
                        (
                            key.clone(),
                            convert_value(inner, from, to, from_options, to_options),
                        )
                    })
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| convert_value(item, from, to, from_options, to_options))
                .collect(),
        ),
        Value::String(text) => {
            Value::String(Interpolator::convert(text, from_options, to_options))
        }
        other => other.clone(),
    }
}

/// Rewrite each plural form's placeholders, then collapse the object into a
/// pipe-delimited string.
fn convert_plural_object(
    map: &Map<String, Value>,
    from_options: &InterpolationOptions,
    to_options: &InterpolationOptions,
) -> Option<String> {
    let converted: Map<String, Value> = map
        .iter()
        .map(|(form, value)| {
            let text = value.as_str().unwrap_or_default();
            (
                form.clone(),
                Value::String(Interpolator::convert(text, from_options, to_options)),
            )
        })
        .collect();
    key_to_pipe(&converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn tree(locale: &str, value: Value) -> TranslationTree {
        let mut tree = HashMap::new();
        tree.insert(locale.to_string(), value);
        tree
    }

    #[test]
    fn test_identity_conversion() {
        let input = tree("en", json!({"greeting": "Hello, %{name}!"}));
        let out = convert_translations(&input, Mode::Rails, Mode::Rails);
        assert_eq!(out, input);
    }

    #[test]
    fn test_rails_to_laravel_strings() {
        let input = tree("en", json!({"greeting": "Hello, %{name}!"}));
        let out = convert_translations(&input, Mode::Rails, Mode::Laravel);
        assert_eq!(out["en"]["greeting"], json!("Hello, :name!"));
    }

    #[test]
    fn test_rails_to_laravel_plural_collapses_to_string() {
        let input = tree(
            "en",
            json!({"items": {"zero": "none", "one": "%{count} item", "other": "%{count} items"}}),
        );
        let out = convert_translations(&input, Mode::Rails, Mode::Laravel);
        assert_eq!(
            out["en"]["items"],
            json!("{0} none|{1} :count item|[2,*] :count items")
        );
    }

    #[test]
    fn test_laravel_to_rails_keeps_pipe_string_shape() {
        let input = tree("en", json!({"items": "{1} :count item|[2,*] :count items"}));
        let out = convert_translations(&input, Mode::Laravel, Mode::Rails);
        // The walker rewrites placeholders only; the string stays a string
        assert_eq!(
            out["en"]["items"],
            json!("{1} %{count} item|[2,*] %{count} items")
        );
    }

    #[test]
    fn test_nested_and_non_string_leaves() {
        let input = tree(
            "en",
            json!({"nav": {"title": ":app", "depth": 3, "flags": [true, ":x"]}}),
        );
        let out = convert_translations(&input, Mode::Laravel, Mode::Rails);
        assert_eq!(
            out["en"],
            json!({"nav": {"title": "%{app}", "depth": 3, "flags": [true, "%{x}"]}})
        );
    }

    #[test]
    fn test_laravel_plural_to_rails() {
        assert_eq!(
            laravel_plural_to_rails("{0} none|{1} :count item|[2,*] :count items").unwrap(),
            json!({"zero": "none", "one": "%{count} item", "other": "%{count} items"})
        );
        assert_eq!(
            laravel_plural_to_rails("item|items").unwrap(),
            json!({"one": "item", "other": "items"})
        );
        assert_eq!(laravel_plural_to_rails("a|b|c"), None);
    }

    #[test]
    fn test_unrepresentable_plural_object_keeps_shape() {
        let input = tree("cy", json!({"cats": {"two": "%{count} gath"}}));
        let out = convert_translations(&input, Mode::Rails, Mode::Laravel);
        assert_eq!(out["cy"]["cats"], json!({"two": ":count gath"}));
    }
}
