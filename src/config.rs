//! Facade Configuration
//!
//! Configuration is validated once, at construction time, by an explicit
//! validation pass returning a structured issue list. A rejected
//! configuration never produces a partially constructed facade.

use crate::error::ConfigIssue;
use crate::mode::Mode;
use crate::translator::MissingHandler;
use crate::tree::TranslationTree;
use serde_json::Value;

/// Configuration for an [`I18n`](crate::I18n) instance.
pub struct I18nConfig {
    /// Translations per locale; each root must be a mapping
    pub translations: TranslationTree,
    /// The universal last-resort locale
    pub default_locale: String,
    /// Explicit initial locale; when unset, the requested-locale preferences
    /// (if any) are negotiated against the available locales, else the
    /// default locale is used
    pub locale: Option<String>,
    /// Caller-preferred locales from the environment detector, consulted
    /// only at construction
    pub requested_locales: Vec<String>,
    /// Fallback locales tried after the language prefix, in order
    pub fallback_locales: Vec<String>,
    /// Backend convention for interpolation and pluralization
    pub mode: Mode,
    /// Consulted when the chain and the per-call default both miss
    pub missing_handler: Option<MissingHandler>,
}

impl I18nConfig {
    /// Create a configuration with required fields.
    pub fn new(translations: TranslationTree, default_locale: impl Into<String>) -> Self {
        Self {
            translations,
            default_locale: default_locale.into(),
            locale: None,
            requested_locales: Vec::new(),
            fallback_locales: Vec::new(),
            mode: Mode::default(),
            missing_handler: None,
        }
    }

    /// Set the initial locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set environment-detected locale preferences.
    pub fn with_requested_locales(mut self, requested: Vec<String>) -> Self {
        self.requested_locales = requested;
        self
    }

    /// Set the fallback locales.
    pub fn with_fallback_locales(mut self, fallbacks: Vec<String>) -> Self {
        self.fallback_locales = fallbacks;
        self
    }

    /// Set the backend convention.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the missing-translation handler.
    pub fn with_missing_handler(mut self, handler: MissingHandler) -> Self {
        self.missing_handler = Some(handler);
        self
    }

    /// Validate the configuration, collecting every issue rather than
    /// stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<ConfigIssue>> {
        let mut issues = Vec::new();

        if self.default_locale.trim().is_empty() {
            issues.push(ConfigIssue {
                field: "defaultLocale".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(locale) = &self.locale {
            if locale.trim().is_empty() {
                issues.push(ConfigIssue {
                    field: "locale".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        for (index, fallback) in self.fallback_locales.iter().enumerate() {
            if fallback.trim().is_empty() {
                issues.push(ConfigIssue {
                    field: format!("fallbackLocales[{index}]"),
                    message: "must not be empty".to_string(),
                });
            }
        }
        for (locale, root) in &self.translations {
            if !matches!(root, Value::Object(_)) {
                issues.push(ConfigIssue {
                    field: format!("translations.{locale}"),
                    message: "must be a mapping".to_string(),
                });
            }
        }

        if issues.is_empty() { Ok(()) } else { Err(issues) }
    }
}

impl std::fmt::Debug for I18nConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18nConfig")
            .field("default_locale", &self.default_locale)
            .field("locale", &self.locale)
            .field("requested_locales", &self.requested_locales)
            .field("fallback_locales", &self.fallback_locales)
            .field("mode", &self.mode)
            .field("locales", &self.translations.keys().collect::<Vec<_>>())
            .field("missing_handler", &self.missing_handler.is_some())
            .finish()
    }
}
