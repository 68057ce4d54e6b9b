//! Key Resolution
//!
//! Resolves a dot-path key through a locale fallback chain: scope join,
//! per-locale nested lookup, count-based plural resolution, stringification
//! and interpolation. A miss is never an error; resolution degrades through
//! the chain, then the per-call default, then the configured missing-key
//! handler, and finally the literal key itself.

use crate::interpolate::Interpolator;
use crate::locale::{has_region, language_of};
use crate::mode::Mode;
use crate::plural::Pluralizer;
use crate::tree::{deep_merge, stringify, TranslationTree, TranslationValue};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-call translation options, builder style.
#[derive(Debug, Default, Clone)]
pub struct TranslateOptions {
    /// Starting locale for the fallback chain (defaults to the current one)
    pub locale: Option<String>,
    /// Key-path prefix segments joined ahead of the key
    pub scope: Option<Vec<String>>,
    /// Count for plural resolution
    pub count: Option<f64>,
    /// Interpolation values
    pub values: HashMap<String, Value>,
    /// Fallback when no locale in the chain yields a value; a sequence uses
    /// its first element
    pub default: Option<Value>,
}

impl TranslateOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve under a specific locale instead of the current one.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Apply a single-segment scope.
    pub fn with_scope(mut self, segment: impl Into<String>) -> Self {
        self.scope = Some(vec![segment.into()]);
        self
    }

    /// Apply a multi-segment scope.
    pub fn with_scope_path(mut self, segments: Vec<String>) -> Self {
        self.scope = Some(segments);
        self
    }

    /// Set the plural count. Also available to interpolation as `count`.
    pub fn with_count(mut self, count: f64) -> Self {
        self.count = Some(count);
        self
    }

    /// Add an interpolation value.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set the default fallback value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Outcome of a resolution, with enough detail for missing-key tracking.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The final display string
    pub text: String,
    /// The scope-joined key that was looked up
    pub full_key: String,
    /// Whether any locale in the chain yielded a value
    pub found: bool,
}

/// Handler consulted when the whole chain and the default both miss.
pub type MissingHandler = Arc<dyn Fn(&str, &str) -> Option<String> + Send + Sync>;

/// Resolves keys against a shared translation tree.
///
/// Holds the current locale and the mode-bound interpolator/pluralizer; the
/// tree itself sits behind `Arc<RwLock<..>>` so facade callers can hold a
/// live view of it (mutations through
/// [`add_translations`](Translator::add_translations) are visible through
/// that view).
pub struct Translator {
    translations: Arc<RwLock<TranslationTree>>,
    default_locale: String,
    /// Configured fallbacks, normalized to end with the default locale
    fallback_locales: Vec<String>,
    mode: Mode,
    locale: String,
    pluralizer: Pluralizer,
    interpolator: Interpolator,
    missing_handler: Option<MissingHandler>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("default_locale", &self.default_locale)
            .field("fallback_locales", &self.fallback_locales)
            .field("mode", &self.mode)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// Create a translator.
    ///
    /// `fallback_locales` is normalized here: the default locale is appended
    /// and duplicates are dropped, preserving configured order.
    pub fn new(
        translations: Arc<RwLock<TranslationTree>>,
        default_locale: impl Into<String>,
        fallback_locales: Vec<String>,
        mode: Mode,
        initial_locale: impl Into<String>,
        missing_handler: Option<MissingHandler>,
    ) -> Self {
        let default_locale = default_locale.into();
        let locale = initial_locale.into();

        let mut normalized: Vec<String> = Vec::new();
        for fallback in fallback_locales.into_iter().chain([default_locale.clone()]) {
            if !normalized.contains(&fallback) {
                normalized.push(fallback);
            }
        }

        Self {
            translations,
            default_locale,
            fallback_locales: normalized,
            mode,
            pluralizer: Pluralizer::new(locale.clone()),
            locale,
            interpolator: Interpolator::for_mode(mode),
            missing_handler,
        }
    }

    /// The current locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// The mode this translator resolves under.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Shared view of the translation tree.
    pub fn translations(&self) -> Arc<RwLock<TranslationTree>> {
        Arc::clone(&self.translations)
    }

    /// Switch the current locale, rebinding the plural-category selector.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        self.pluralizer = self.pluralizer.with_locale(locale.clone());
        self.locale = locale;
    }

    /// Ordered, de-duplicated locale chain tried when resolving a key.
    ///
    /// `[locale]`, then the bare language subtag for regional locales
    /// (`en-US` -> `en`), then the configured fallbacks in order.
    pub fn build_fallback_chain(&self, locale: &str) -> Vec<String> {
        let mut chain = vec![locale.to_string()];
        if has_region(locale) {
            let language = language_of(locale).to_string();
            if !chain.contains(&language) {
                chain.push(language);
            }
        }
        for fallback in &self.fallback_locales {
            if !chain.contains(fallback) {
                chain.push(fallback.clone());
            }
        }
        chain
    }

    /// Resolve a key to a display string.
    pub fn translate(&self, key: &str, options: &TranslateOptions) -> String {
        self.resolve(key, options).text
    }

    /// Resolve a key, reporting whether it was actually found.
    pub fn resolve(&self, key: &str, options: &TranslateOptions) -> Resolution {
        let full_key = match &options.scope {
            Some(segments) if !segments.is_empty() => {
                format!("{}.{}", segments.join("."), key)
            }
            _ => key.to_string(),
        };

        let start = options.locale.as_deref().unwrap_or(&self.locale);
        let chain = self.build_fallback_chain(start);
        log::debug!("resolving {full_key:?} through chain {chain:?}");

        let translations = self.translations.read();
        for locale in &chain {
            let Some(found) = translations
                .get(locale)
                .and_then(|root| lookup(root, &full_key))
            else {
                continue;
            };

            let resolved = match options.count {
                Some(count) => match self.resolve_plural(found, count, locale) {
                    Some(value) => value,
                    // A plural miss in this locale is a miss, not an abort
                    None => continue,
                },
                None => found.clone(),
            };

            let text = self.interpolate_with_count(&stringify(&resolved), options);
            return Resolution {
                text,
                full_key,
                found: true,
            };
        }
        drop(translations);

        if let Some(default) = &options.default {
            let value = match default {
                Value::Array(items) => items.first().cloned().unwrap_or(Value::Null),
                other => other.clone(),
            };
            let text = self.interpolate_with_count(&stringify(&value), options);
            return Resolution {
                text,
                full_key,
                found: false,
            };
        }

        if let Some(handler) = &self.missing_handler {
            if let Some(text) = handler(&full_key, start) {
                return Resolution {
                    text,
                    full_key,
                    found: false,
                };
            }
        }

        log::warn!("no translation for {full_key:?} (locale {start:?})");
        Resolution {
            text: full_key.clone(),
            full_key,
            found: false,
        }
    }

    /// Whether any value exists for the key, without plural resolution or
    /// interpolation.
    pub fn exists(&self, key: &str, locale: Option<&str>) -> bool {
        let start = locale.unwrap_or(&self.locale);
        let translations = self.translations.read();
        self.build_fallback_chain(start).iter().any(|locale| {
            translations
                .get(locale)
                .and_then(|root| lookup(root, key))
                .is_some()
        })
    }

    /// Deep-merge a partial tree into a locale's translations.
    pub fn add_translations(&self, locale: &str, partial: TranslationValue) {
        let mut translations = self.translations.write();
        let slot = translations
            .entry(locale.to_string())
            .or_insert_with(|| Value::Object(Default::default()));
        deep_merge(slot, partial);
    }

    /// Mode-aware plural resolution.
    ///
    /// A plural-object mapping resolves key-based in either mode. A string
    /// resolves pipe-based only in Laravel mode; a Rails-mode string with a
    /// count passes through untouched.
    fn resolve_plural(&self, value: &Value, count: f64, locale: &str) -> Option<Value> {
        let pluralizer = if locale == self.pluralizer.locale() {
            self.pluralizer.clone()
        } else {
            self.pluralizer.with_locale(locale)
        };

        match value {
            Value::Object(map) => pluralizer.resolve_key_based(map, count).cloned(),
            Value::String(text) if self.mode == Mode::Laravel => {
                Some(Value::String(pluralizer.resolve_pipe_based(text, count)))
            }
            other => Some(other.clone()),
        }
    }

    /// Interpolate, exposing the plural count as the `count` value unless the
    /// caller supplied one explicitly.
    fn interpolate_with_count(&self, text: &str, options: &TranslateOptions) -> String {
        match options.count {
            Some(count) if !options.values.contains_key("count") => {
                let mut values = options.values.clone();
                values.insert("count".to_string(), count_value(count));
                self.interpolator.interpolate(text, &values)
            }
            _ => self.interpolator.interpolate(text, &options.values),
        }
    }
}

/// Render a count without a trailing `.0` for whole numbers.
fn count_value(count: f64) -> Value {
    if count.fract() == 0.0 && count.abs() < i64::MAX as f64 {
        Value::from(count as i64)
    } else {
        Value::from(count)
    }
}

/// Nested dot-path lookup. Non-object intermediates and absent keys abort
/// the lookup (a miss for this locale, not an error).
fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in key.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
