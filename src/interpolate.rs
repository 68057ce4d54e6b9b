//! Placeholder Interpolation
//!
//! Substitutes named placeholders in a translation string using a
//! mode-specific pattern. Rails syntax wraps names in `%{` / `}`; Laravel
//! syntax prefixes names with `:` and relies on the identifier boundary
//! instead of a closing delimiter.

use crate::mode::InterpolationOptions;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// Identifier class for placeholder names.
const IDENT_PATTERN: &str = "[a-zA-Z_][a-zA-Z0-9_]*";

/// Finds and substitutes placeholders for one interpolation syntax.
///
/// Pure functions over immutable configuration; building one is cheap and
/// they carry no state beyond the compiled pattern.
#[derive(Debug, Clone)]
pub struct Interpolator {
    options: InterpolationOptions,
    pattern: Regex,
}

impl Interpolator {
    /// Build an interpolator for the given affixes.
    pub fn new(options: InterpolationOptions) -> Self {
        let mut source = String::new();
        source.push_str(&regex::escape(&options.prefix));
        source.push('(');
        source.push_str(IDENT_PATTERN);
        source.push(')');
        if !options.suffix.is_empty() {
            source.push_str(&regex::escape(&options.suffix));
        }
        // The pattern is assembled from escaped literals plus a fixed
        // identifier class, so compilation cannot fail.
        let pattern = Regex::new(&source).unwrap_or_else(|e| {
            unreachable!("interpolation pattern failed to compile: {e}")
        });

        Self { options, pattern }
    }

    /// Build an interpolator for a mode's default affixes.
    pub fn for_mode(mode: crate::Mode) -> Self {
        Self::new(mode.interpolation_options())
    }

    /// The affixes this interpolator was built with.
    pub fn options(&self) -> &InterpolationOptions {
        &self.options
    }

    /// Replace every known placeholder in `text` with its value.
    ///
    /// A name absent from `values` leaves the original placeholder text
    /// untouched, favoring visible breakage over silent removal. `Null`
    /// values render as the empty string; other scalars render via their
    /// display text.
    ///
    /// # Example
    ///
    /// ```
    /// use i18n_bridge::{Interpolator, InterpolationOptions};
    /// use std::collections::HashMap;
    ///
    /// let interp = Interpolator::new(InterpolationOptions::rails());
    /// let mut values = HashMap::new();
    /// values.insert("name".to_string(), "Alice".into());
    ///
    /// assert_eq!(interp.interpolate("Hi, %{name}!", &values), "Hi, Alice!");
    /// assert_eq!(interp.interpolate("Hi, %{other}!", &values), "Hi, %{other}!");
    /// ```
    pub fn interpolate(&self, text: &str, values: &HashMap<String, Value>) -> String {
        self.pattern
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let name = &caps[1];
                match values.get(name) {
                    Some(value) => render_value(value),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Unique placeholder names in first-occurrence order.
    pub fn extract_variables(&self, text: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for caps in self.pattern.captures_iter(text) {
            let name = &caps[1];
            if !seen.iter().any(|s: &String| s == name) {
                seen.push(name.to_string());
            }
        }
        seen
    }

    /// Rewrite every placeholder from one syntax to another.
    ///
    /// Implemented as a literal find/replace per discovered variable name.
    /// A variable whose source-delimited text also appears as plain
    /// substring text in the string is rewritten there too; callers wanting
    /// positional precision should pre-escape such strings.
    pub fn convert(
        text: &str,
        from: &InterpolationOptions,
        to: &InterpolationOptions,
    ) -> String {
        let source = Interpolator::new(from.clone());
        let mut result = text.to_string();
        for name in source.extract_variables(text) {
            result = result.replace(&from.wrap(&name), &to.wrap(&name));
        }
        result
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
