//! Error types for translation operations

use thiserror::Error;

/// A single problem found while validating an [`I18nConfig`](crate::I18nConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Configuration field the issue refers to (e.g. `defaultLocale`).
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur during translation operations.
///
/// Resolution misses (missing key, missing locale, missing plural form) are
/// never errors; they degrade to the fallback chain and ultimately the
/// literal key. Only construction and locale assignment can fail.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Invalid locale assignment (empty or whitespace-only)
    #[error("Invalid locale: {0:?}")]
    InvalidLocale(String),

    /// Configuration rejected at construction time
    #[error("Invalid configuration: {}", format_issues(.0))]
    InvalidConfig(Vec<ConfigIssue>),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display_joins_issues() {
        let err = I18nError::InvalidConfig(vec![
            ConfigIssue {
                field: "defaultLocale".to_string(),
                message: "must not be empty".to_string(),
            },
            ConfigIssue {
                field: "translations.en".to_string(),
                message: "must be a mapping".to_string(),
            },
        ]);

        let text = err.to_string();
        assert!(text.contains("defaultLocale: must not be empty"));
        assert!(text.contains("translations.en: must be a mapping"));
    }
}
