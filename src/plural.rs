//! Pluralization
//!
//! Two orthogonal plural representations are supported:
//!
//! - **Key-based** (Rails): a mapping whose keys are CLDR categories
//!   (`{"one": "1 item", "other": "%{count} items"}`), resolved through the
//!   locale's plural-category selector with an explicit zero-form priority.
//! - **Pipe-based** (Laravel): a single string of `|`-delimited segments with
//!   optional `{n}` exact and `[n,m]` range markers
//!   (`"{0} none|{1} one|[2,*] many"`), resolved first-match-wins.
//!
//! The structural converters between the two ([`key_to_pipe`] /
//! [`pipe_to_key`]) are lossy by design; the compatibility checker reports
//! the loss before conversion.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

// ============================================================================
// Plural Categories
// ============================================================================

/// CLDR plural categories.
///
/// Not all languages use all categories: English has two (one, other),
/// Russian has four, Arabic has all six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    /// Zero items (Arabic)
    Zero,
    /// One item (most languages)
    One,
    /// Two items (Arabic, Welsh)
    Two,
    /// Few items (Slavic languages)
    Few,
    /// Many items (Slavic languages, Arabic)
    Many,
    /// All other cases
    Other,
}

impl PluralCategory {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Get the plural category for a count in a locale.
///
/// This is the locale plural-category selector: CLDR-derived rules keyed by
/// the locale's language subtag. Unknown languages use English-like rules.
///
/// # Example
///
/// ```
/// use i18n_bridge::{plural_category, PluralCategory};
///
/// assert_eq!(plural_category(1.0, "en"), PluralCategory::One);
/// assert_eq!(plural_category(2.0, "en"), PluralCategory::Other);
/// assert_eq!(plural_category(2.0, "ru"), PluralCategory::Few);
/// ```
pub fn plural_category(count: f64, locale: &str) -> PluralCategory {
    let language = crate::locale::language_of(locale);
    let fractional = count.fract() != 0.0;
    let i = count.abs() as i64;

    match language {
        // East Asian languages have no plural distinction
        "ja" | "ko" | "zh" | "vi" | "th" | "id" | "ms" => PluralCategory::Other,

        "fr" => {
            if !fractional && (i == 0 || i == 1) {
                PluralCategory::One
            } else {
                PluralCategory::Other
            }
        }

        "ru" | "uk" | "be" => slavic_category(i, fractional),

        "pl" => {
            if fractional {
                PluralCategory::Other
            } else if i == 1 {
                PluralCategory::One
            } else {
                slavic_category(i, false)
            }
        }

        "cs" | "sk" => {
            if fractional {
                PluralCategory::Many
            } else {
                match i {
                    1 => PluralCategory::One,
                    2..=4 => PluralCategory::Few,
                    _ => PluralCategory::Other,
                }
            }
        }

        "cy" => {
            if fractional {
                PluralCategory::Other
            } else {
                match i {
                    0 => PluralCategory::Zero,
                    1 => PluralCategory::One,
                    2 => PluralCategory::Two,
                    3 => PluralCategory::Few,
                    6 => PluralCategory::Many,
                    _ => PluralCategory::Other,
                }
            }
        }

        "ar" => {
            if fractional {
                return PluralCategory::Other;
            }
            let mod100 = i % 100;
            match i {
                0 => PluralCategory::Zero,
                1 => PluralCategory::One,
                2 => PluralCategory::Two,
                _ if (3..=10).contains(&mod100) => PluralCategory::Few,
                _ if (11..=99).contains(&mod100) => PluralCategory::Many,
                _ => PluralCategory::Other,
            }
        }

        // Germanic, Romance (except French), and everything else
        _ => {
            if !fractional && i == 1 {
                PluralCategory::One
            } else {
                PluralCategory::Other
            }
        }
    }
}

/// Russian-style rules (ru, uk, be; also Polish above 1).
fn slavic_category(i: i64, fractional: bool) -> PluralCategory {
    if fractional {
        return PluralCategory::Other;
    }
    let mod10 = i % 10;
    let mod100 = i % 100;

    if mod10 == 1 && mod100 != 11 {
        PluralCategory::One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        PluralCategory::Few
    } else {
        PluralCategory::Many
    }
}

// ============================================================================
// Pipe-delimited Rules
// ============================================================================

/// One parsed segment of a pipe-delimited plural string.
///
/// Carries at most one predicate; a rule with neither an exact count nor a
/// range matches nothing structurally but is kept as the ultimate fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralRule {
    /// Exact-count predicate (`{3}`)
    pub exact: Option<i64>,
    /// Closed or open range predicate (`[2,10]`, `[2,*]`); `None` end is +∞
    pub range: Option<(i64, Option<i64>)>,
    /// Display text for this segment
    pub text: String,
}

impl PluralRule {
    fn bare(text: impl Into<String>) -> Self {
        Self {
            exact: None,
            range: None,
            text: text.into(),
        }
    }

    /// Whether this rule's predicate matches a count. Bare rules never match.
    pub fn matches(&self, count: f64) -> bool {
        if let Some(exact) = self.exact {
            return count.fract() == 0.0 && count as i64 == exact;
        }
        if let Some((start, end)) = self.range {
            let above = count >= start as f64;
            let below = end.map_or(true, |e| count <= e as f64);
            return above && below;
        }
        false
    }
}

static EXACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{\s*(-?\d+)\s*\}\s*(.*)$").unwrap_or_else(|e| unreachable!("{e}"))
});
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\s*(-?\d+)\s*,\s*(\*|-?\d+)\s*\]\s*(.*)$").unwrap_or_else(|e| unreachable!("{e}"))
});

/// Split a pipe-delimited string on `|` characters outside `[...]`/`{...}`
/// and parse each trimmed segment into a [`PluralRule`].
///
/// A two-segment string with no markers is the singular/plural shorthand:
/// segment 0 becomes `{1}` and segment 1 becomes `[0,*]`.
pub fn parse_pipe_separated(text: &str) -> Vec<PluralRule> {
    let segments = split_top_level(text);
    let shorthand = segments.len() == 2;

    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let segment = segment.trim();
            if let Some(caps) = EXACT_RE.captures(segment) {
                if let Ok(n) = caps[1].parse::<i64>() {
                    return PluralRule {
                        exact: Some(n),
                        range: None,
                        text: caps[2].to_string(),
                    };
                }
            }
            if let Some(caps) = RANGE_RE.captures(segment) {
                if let Ok(start) = caps[1].parse::<i64>() {
                    let end = if &caps[2] == "*" {
                        None
                    } else {
                        caps[2].parse::<i64>().ok()
                    };
                    // `[n,x]` with unparseable x only occurs for overflow;
                    // treat as open-ended rather than dropping the segment
                    return PluralRule {
                        exact: None,
                        range: Some((start, end)),
                        text: caps[3].to_string(),
                    };
                }
            }
            if shorthand {
                if index == 0 {
                    PluralRule {
                        exact: Some(1),
                        range: None,
                        text: segment.to_string(),
                    }
                } else {
                    PluralRule {
                        exact: None,
                        range: Some((0, None)),
                        text: segment.to_string(),
                    }
                }
            } else {
                PluralRule::bare(segment)
            }
        })
        .collect()
}

/// Split on `|` at bracket depth zero, tracking `[...]` and `{...}` nesting.
fn split_top_level(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for ch in text.chars() {
        match ch {
            '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ']' | '}' => {
                depth = (depth - 1).max(0);
                current.push(ch);
            }
            '|' if depth == 0 => {
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    segments.push(current);
    segments
}

// ============================================================================
// Structural Converters
// ============================================================================

/// Serialize a key-based plural mapping into a pipe-delimited string.
///
/// Only the `zero`/`one`/`other` forms are representable; `two`/`few`/`many`
/// are dropped. The loss is reported ahead of time by the compatibility
/// checker, not here. Returns `None` when no representable form exists.
pub fn key_to_pipe(map: &Map<String, Value>) -> Option<String> {
    let text_of = |key: &str| map.get(key).and_then(Value::as_str);

    let zero = text_of("zero");
    let one = text_of("one");
    let other = text_of("other");

    let mut segments: Vec<String> = Vec::new();
    match (zero, one, other) {
        (None, Some(one), Some(other)) => {
            // Idiomatic singular/plural shorthand
            segments.push(one.to_string());
            segments.push(other.to_string());
        }
        (zero, one, other) => {
            if let Some(text) = zero {
                segments.push(format!("{{0}} {text}"));
            }
            if let Some(text) = one {
                segments.push(format!("{{1}} {text}"));
            }
            if let Some(text) = other {
                // Start the open range after the highest tagged exact count
                let start = if zero.is_some() || one.is_some() { 2 } else { 0 };
                segments.push(format!("[{start},*] {text}"));
            }
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("|"))
    }
}

/// Parse a pipe-delimited string back into a key-based plural mapping.
///
/// `{0}` maps to `zero`, `{1}` to `one`, any open-ended range to `other`, and
/// the two-segment shorthand to `one`/`other`. Segments with no key-based
/// equivalent (closed ranges, exact counts above 1) are dropped. Returns
/// `None` when no usable form was extracted.
pub fn pipe_to_key(text: &str) -> Option<Value> {
    let rules = parse_pipe_separated(text);
    let mut map = Map::new();

    for rule in &rules {
        let key = match (rule.exact, rule.range) {
            (Some(0), _) => Some("zero"),
            (Some(1), _) => Some("one"),
            (_, Some((_, None))) => Some("other"),
            _ => None,
        };
        if let Some(key) = key {
            map.entry(key.to_string())
                .or_insert_with(|| Value::String(rule.text.clone()));
        }
    }

    if map.is_empty() {
        None
    } else {
        Some(Value::Object(map))
    }
}

// ============================================================================
// Pluralizer
// ============================================================================

/// Locale-bound plural resolution for both representations.
///
/// Carries only the locale used for category selection; rebinding via
/// [`with_locale`](Pluralizer::with_locale) returns a new value and leaves
/// the original untouched.
#[derive(Debug, Clone)]
pub struct Pluralizer {
    locale: String,
}

impl Pluralizer {
    /// Create a pluralizer bound to a locale's category selector.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    /// The bound locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// A new pluralizer bound to a different locale.
    pub fn with_locale(&self, locale: impl Into<String>) -> Self {
        Self::new(locale)
    }

    /// Select a form from a key-based plural mapping.
    ///
    /// An explicit `zero` form wins at count 0 regardless of what the locale
    /// category selector says (Rails compatibility); otherwise the locale
    /// category is tried, then `other`.
    pub fn resolve_key_based<'a>(
        &self,
        map: &'a Map<String, Value>,
        count: f64,
    ) -> Option<&'a Value> {
        if count == 0.0 {
            if let Some(zero) = map.get("zero") {
                return Some(zero);
            }
        }
        let category = plural_category(count, &self.locale);
        map.get(category.as_str()).or_else(|| map.get("other"))
    }

    /// Select a segment from a pipe-delimited plural string.
    ///
    /// Scans rules in order: first exact match wins, then the first matching
    /// range. When nothing matches, the **last** parsed rule's text is
    /// returned (a deliberate last-wins fallback, not `other`).
    pub fn resolve_pipe_based(&self, text: &str, count: f64) -> String {
        let rules = parse_pipe_separated(text);

        if let Some(rule) = rules
            .iter()
            .find(|r| r.exact.is_some() && r.matches(count))
        {
            return rule.text.clone();
        }
        if let Some(rule) = rules
            .iter()
            .find(|r| r.range.is_some() && r.matches(count))
        {
            return rule.text.clone();
        }
        rules.last().map(|r| r.text.clone()).unwrap_or_default()
    }
}
