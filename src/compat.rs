//! Conversion Compatibility Checking
//!
//! Inspects a translation tree and reports what a format conversion would
//! lose before it happens. Almost everything is advisory: lossy plural
//! forms, range syntax, collapsed exact markers and awkward variable names
//! are warnings. The single error path is a pipe-delimited string that
//! cannot be structurally parsed at all.

use crate::mode::Mode;
use crate::plural::pipe_to_key;
use crate::tree::{classify_node, NodeKind, TranslationTree};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

/// Category tag for a reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Variable name not expressible in the target interpolation syntax
    InvalidVariableName,
    /// Plural form the target representation cannot express (`two`/`few`)
    UnsupportedPluralForm,
    /// `[n,m]` range syntax with no key-based equivalent
    RangeSyntax,
    /// Exact-match marker that will collapse into `other`
    ExactMatchCollapsed,
    /// Pipe-delimited string with no extractable plural form
    MalformedPipeString,
}

/// One advisory or blocking finding at a specific key.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    /// Dot-path of the offending leaf
    pub key: String,
    /// Category tag
    pub kind: IssueKind,
    /// Human-readable description
    pub message: String,
    /// Optional remediation hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// The advisory output describing fidelity loss before a conversion.
///
/// `compatible` is exactly `errors.is_empty()`; warnings never flip it.
#[derive(Debug, Clone, Serialize)]
pub struct CompatReport {
    pub compatible: bool,
    pub warnings: Vec<Issue>,
    pub errors: Vec<Issue>,
}

impl CompatReport {
    fn from_issues(warnings: Vec<Issue>, errors: Vec<Issue>) -> Self {
        Self {
            compatible: errors.is_empty(),
            warnings,
            errors,
        }
    }
}

// Permissive capture of whatever sits between the rails affixes, so that
// names the strict identifier syntax rejects still surface for checking.
static RAILS_VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\{\s*([^}]+?)\s*\}").unwrap_or_else(|e| unreachable!("{e}")));
static LARAVEL_VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([a-zA-Z_][a-zA-Z0-9_]*)").unwrap_or_else(|e| unreachable!("{e}")));
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap_or_else(|e| unreachable!("{e}")));
static CLOSED_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*-?\d+\s*,\s*-?\d+\s*\]").unwrap_or_else(|e| unreachable!("{e}")));
static EXACT_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\s*(-?\d+)\s*\}").unwrap_or_else(|e| unreachable!("{e}")));

/// Check one locale's namespace root for conversion fidelity.
///
/// # Example
///
/// ```
/// use i18n_bridge::{check_compatibility, Mode};
/// use serde_json::json;
///
/// let root = json!({"greeting": "Hello, %{name}!"});
/// let report = check_compatibility(root.as_object().unwrap(), Mode::Rails, Mode::Laravel);
/// assert!(report.compatible);
/// assert!(report.warnings.is_empty());
/// ```
pub fn check_compatibility(root: &Map<String, Value>, from: Mode, to: Mode) -> CompatReport {
    let mut checker = Checker {
        from,
        to,
        warnings: Vec::new(),
        errors: Vec::new(),
    };
    checker.walk_map(root, "");

    if !checker.errors.is_empty() {
        log::warn!(
            "compatibility check {from}->{to}: {} error(s), {} warning(s)",
            checker.errors.len(),
            checker.warnings.len()
        );
    }
    CompatReport::from_issues(checker.warnings, checker.errors)
}

/// Check a whole translation tree, locale by locale.
///
/// Issue keys are prefixed with the locale (`en.nav.title`). Locales whose
/// root is not a mapping are skipped.
pub fn check_tree_compatibility(tree: &TranslationTree, from: Mode, to: Mode) -> CompatReport {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    let mut locales: Vec<&String> = tree.keys().collect();
    locales.sort();
    for locale in locales {
        if let Some(root) = tree.get(locale).and_then(Value::as_object) {
            let report = check_compatibility(root, from, to);
            let prefix = |mut issue: Issue| {
                issue.key = format!("{locale}.{}", issue.key);
                issue
            };
            warnings.extend(report.warnings.into_iter().map(prefix));
            errors.extend(report.errors.into_iter().map(prefix));
        }
    }
    CompatReport::from_issues(warnings, errors)
}

struct Checker {
    from: Mode,
    to: Mode,
    warnings: Vec<Issue>,
    errors: Vec<Issue>,
}

impl Checker {
    fn walk_map(&mut self, map: &Map<String, Value>, path: &str) {
        if self.from == Mode::Rails
            && self.to == Mode::Laravel
            && classify_node(map) == NodeKind::PluralForm
        {
            self.check_plural_object(map, path);
        }

        for (key, value) in map {
            let child_path = join_path(path, key);
            match value {
                Value::Object(inner) => self.walk_map(inner, &child_path),
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let item_path = join_path(&child_path, &index.to_string());
                        if let Value::Object(inner) = item {
                            self.walk_map(inner, &item_path);
                        } else if let Value::String(s) = item {
                            self.check_string(s, &item_path);
                        }
                    }
                }
                Value::String(s) => self.check_string(s, &child_path),
                _ => {}
            }
        }
    }

    fn check_plural_object(&mut self, map: &Map<String, Value>, path: &str) {
        for form in ["two", "few"] {
            if map.contains_key(form) {
                self.warnings.push(Issue {
                    key: path.to_string(),
                    kind: IssueKind::UnsupportedPluralForm,
                    message: format!(
                        "plural form {form:?} cannot be represented in pipe syntax and will be dropped"
                    ),
                    suggestion: Some(
                        "fold the text into `other`, or an exact `{n}` marker where the count is fixed"
                            .to_string(),
                    ),
                });
            }
        }
    }

    fn check_string(&mut self, text: &str, path: &str) {
        self.check_variables(text, path);

        if self.from == Mode::Laravel && self.to == Mode::Rails && text.contains('|') {
            self.check_pipe_string(text, path);
        }
    }

    fn check_variables(&mut self, text: &str, path: &str) {
        // Only the laravel target has a stricter syntax to violate
        if self.to != Mode::Laravel {
            return;
        }
        let pattern = match self.from {
            Mode::Rails => &RAILS_VARIABLE_RE,
            Mode::Laravel => &LARAVEL_VARIABLE_RE,
        };
        for caps in pattern.captures_iter(text) {
            let name = &caps[1];
            if !IDENTIFIER_RE.is_match(name) {
                self.warnings.push(Issue {
                    key: path.to_string(),
                    kind: IssueKind::InvalidVariableName,
                    message: format!(
                        "variable {name:?} is not a valid :placeholder identifier"
                    ),
                    suggestion: Some(format!(
                        "rename to {:?}",
                        sanitize_identifier(name)
                    )),
                });
            }
        }
    }

    fn check_pipe_string(&mut self, text: &str, path: &str) {
        if CLOSED_RANGE_RE.is_match(text) {
            self.warnings.push(Issue {
                key: path.to_string(),
                kind: IssueKind::RangeSyntax,
                message: "closed range [n,m] has no key-based equivalent and will be dropped"
                    .to_string(),
                suggestion: None,
            });
        }
        for caps in EXACT_MARKER_RE.captures_iter(text) {
            if caps[1].parse::<i64>().map_or(false, |n| n > 2) {
                self.warnings.push(Issue {
                    key: path.to_string(),
                    kind: IssueKind::ExactMatchCollapsed,
                    message: format!(
                        "exact marker {{{}}} will be collapsed into `other`",
                        &caps[1]
                    ),
                    suggestion: None,
                });
            }
        }
        if pipe_to_key(text).is_none() {
            self.errors.push(Issue {
                key: path.to_string(),
                kind: IssueKind::MalformedPipeString,
                message: "pipe-delimited string has no extractable plural form".to_string(),
                suggestion: Some(
                    "use `singular|plural`, or tag segments with {n} / [n,*] markers".to_string(),
                ),
            });
        }
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn sanitize_identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
