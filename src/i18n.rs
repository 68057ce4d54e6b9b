//! I18n Facade
//!
//! Owns the validated configuration, the current locale, the change-listener
//! set and the missing-key observations, and wires the translator,
//! pluralizer and interpolator together.

use crate::config::I18nConfig;
use crate::error::I18nError;
use crate::locale::{negotiate_locale, normalize};
use crate::mode::Mode;
use crate::translator::{Resolution, TranslateOptions, Translator};
use crate::tree::{TranslationTree, TranslationValue};
use crate::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Change-listener callback, invoked with the new locale.
pub type LocaleListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle for removing a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A deduplicated missing-translation observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKey {
    /// Locale the lookup started from
    pub locale: String,
    /// Scope-joined key that missed
    pub key: String,
    /// When the miss was first observed
    pub first_seen: DateTime<Utc>,
}

/// Thread-safe translation facade.
///
/// # Example
///
/// ```
/// use i18n_bridge::{I18n, I18nConfig, TranslateOptions};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let mut translations = HashMap::new();
/// translations.insert("en".to_string(), json!({"greeting": "Hello, %{name}!"}));
///
/// let i18n = I18n::new(I18nConfig::new(translations, "en")).unwrap();
/// let text = i18n.t("greeting", &TranslateOptions::new().with_value("name", "Ada"));
/// assert_eq!(text, "Hello, Ada!");
/// ```
pub struct I18n {
    translator: RwLock<Translator>,
    listeners: RwLock<Vec<(ListenerId, LocaleListener)>>,
    next_listener_id: RwLock<u64>,
    missing: RwLock<HashMap<String, MissingKey>>,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("translator", &*self.translator.read())
            .field("listeners", &self.listeners.read().len())
            .field("missing", &self.missing.read().len())
            .finish()
    }
}

impl I18n {
    /// Construct a facade from a validated configuration.
    ///
    /// Fails fast with [`I18nError::InvalidConfig`] listing every issue; no
    /// partially constructed instance escapes.
    pub fn new(config: I18nConfig) -> Result<Self> {
        config.validate().map_err(I18nError::InvalidConfig)?;

        let I18nConfig {
            translations,
            default_locale,
            locale,
            requested_locales,
            fallback_locales,
            mode,
            missing_handler,
        } = config;

        let initial_locale = match locale {
            Some(locale) => locale.trim().to_string(),
            None if !requested_locales.is_empty() => {
                let mut available: Vec<&String> = translations.keys().collect();
                available.sort();
                negotiate_locale(&requested_locales, &available, &default_locale)
            }
            None => default_locale.clone(),
        };
        log::debug!("i18n starting with locale {initial_locale:?} ({mode} mode)");

        let translator = Translator::new(
            Arc::new(RwLock::new(translations)),
            default_locale,
            fallback_locales,
            mode,
            initial_locale,
            missing_handler,
        );

        Ok(Self {
            translator: RwLock::new(translator),
            listeners: RwLock::new(Vec::new()),
            next_listener_id: RwLock::new(0),
            missing: RwLock::new(HashMap::new()),
        })
    }

    /// The current locale.
    pub fn locale(&self) -> String {
        self.translator.read().locale().to_string()
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> String {
        self.translator.read().default_locale().to_string()
    }

    /// The backend convention this instance resolves under.
    pub fn mode(&self) -> Mode {
        self.translator.read().mode()
    }

    /// Switch the current locale.
    ///
    /// The input is trimmed; empty or whitespace-only input is rejected and
    /// state stays unchanged. On an actual change the pluralizer is rebound
    /// and every listener is invoked synchronously, in registration order.
    /// A listener that assigns the locale again recurses; the change guard
    /// stops the recursion once the locale settles, but avoiding livelock
    /// between mutually reassigning listeners is the caller's responsibility.
    pub fn set_locale(&self, locale: &str) -> Result<()> {
        let normalized =
            normalize(locale).ok_or_else(|| I18nError::InvalidLocale(locale.to_string()))?;

        {
            let mut translator = self.translator.write();
            if translator.locale() == normalized {
                return Ok(());
            }
            translator.set_locale(normalized.clone());
        }

        // Fan out on a snapshot, outside any lock, so listeners may call
        // back into this instance
        let snapshot: Vec<LocaleListener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(&normalized);
        }
        Ok(())
    }

    /// Translate a key.
    ///
    /// Misses degrade through the fallback chain, the per-call default, the
    /// configured handler, and finally the literal key.
    ///
    /// A miss is recorded in the missing-key observations (first occurrence
    /// per `locale:key`) only when no value exists for the key at all. A key
    /// that exists but yields no usable plural form for the given count is
    /// not recorded.
    pub fn t(&self, key: &str, options: &TranslateOptions) -> String {
        let resolution = self.translator.read().resolve(key, options);
        if !resolution.found && resolution.text == resolution.full_key {
            let locale = options
                .locale
                .clone()
                .unwrap_or_else(|| self.locale());
            if !self.exists(&resolution.full_key, Some(&locale)) {
                self.record_missing(&locale, &resolution.full_key);
            }
        }
        resolution.text
    }

    /// Resolve a key with full outcome detail.
    pub fn resolve(&self, key: &str, options: &TranslateOptions) -> Resolution {
        self.translator.read().resolve(key, options)
    }

    /// Whether any value exists for the key.
    pub fn exists(&self, key: &str, locale: Option<&str>) -> bool {
        self.translator.read().exists(key, locale)
    }

    /// Whether translations were supplied for a locale.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.translator
            .read()
            .translations()
            .read()
            .contains_key(locale)
    }

    /// All locales with translations, sorted.
    pub fn available_locales(&self) -> Vec<String> {
        let translator = self.translator.read();
        let translations = translator.translations();
        let guard = translations.read();
        let mut locales: Vec<String> = guard.keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Deep-merge additional translations into a locale.
    pub fn add_translations(&self, locale: &str, partial: TranslationValue) {
        self.translator.read().add_translations(locale, partial);
    }

    /// Live shared view of the translation tree.
    ///
    /// Mutations made through [`add_translations`](I18n::add_translations)
    /// are visible through this handle; callers needing isolation must copy.
    pub fn translations(&self) -> Arc<RwLock<TranslationTree>> {
        self.translator.read().translations()
    }

    /// Register a locale-change listener. Listeners run synchronously, in
    /// registration order.
    pub fn on_change(&self, listener: impl Fn(&str) + Send + Sync + 'static) -> ListenerId {
        let mut next = self.next_listener_id.write();
        let id = ListenerId(*next);
        *next += 1;
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    /// Remove a previously registered listener.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Missing-key observations, ordered by first occurrence.
    pub fn missing_keys(&self) -> Vec<MissingKey> {
        let mut keys: Vec<MissingKey> = self.missing.read().values().cloned().collect();
        keys.sort_by(|a, b| {
            a.first_seen
                .cmp(&b.first_seen)
                .then_with(|| a.locale.cmp(&b.locale))
                .then_with(|| a.key.cmp(&b.key))
        });
        keys
    }

    /// Whether any missing key has been observed.
    pub fn has_missing_keys(&self) -> bool {
        !self.missing.read().is_empty()
    }

    /// Forget all missing-key observations.
    pub fn clear_missing_keys(&self) {
        self.missing.write().clear();
    }

    fn record_missing(&self, locale: &str, full_key: &str) {
        let id = format!("{locale}:{full_key}");
        let mut missing = self.missing.write();
        missing.entry(id).or_insert_with(|| MissingKey {
            locale: locale.to_string(),
            key: full_key.to_string(),
            first_seen: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn simple_i18n() -> I18n {
        let mut translations = TranslationTree::new();
        translations.insert("en".to_string(), json!({"greeting": "Hello"}));
        translations.insert("ja".to_string(), json!({"greeting": "こんにちは"}));
        I18n::new(I18nConfig::new(translations, "en")).unwrap()
    }

    #[test]
    fn test_construction_rejects_bad_config() {
        let err = I18n::new(I18nConfig::new(TranslationTree::new(), " ")).unwrap_err();
        assert!(matches!(err, I18nError::InvalidConfig(_)));
    }

    #[test]
    fn test_locale_setter_trims_and_rejects_blank() {
        let i18n = simple_i18n();

        assert!(i18n.set_locale("").is_err());
        assert!(i18n.set_locale("   ").is_err());
        assert_eq!(i18n.locale(), "en");

        i18n.set_locale("  ja  ").unwrap();
        assert_eq!(i18n.locale(), "ja");
    }

    #[test]
    fn test_listeners_fire_in_order_on_actual_change() {
        let i18n = simple_i18n();
        let calls = Arc::new(RwLock::new(Vec::new()));

        for tag in ["first", "second"] {
            let calls = Arc::clone(&calls);
            i18n.on_change(move |locale| {
                calls.write().push(format!("{tag}:{locale}"));
            });
        }

        i18n.set_locale("ja").unwrap();
        // Same locale again: no change, no notification
        i18n.set_locale("ja").unwrap();

        assert_eq!(*calls.read(), vec!["first:ja", "second:ja"]);
    }

    #[test]
    fn test_remove_listener() {
        let i18n = simple_i18n();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        let id = i18n.on_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(i18n.remove_listener(id));
        assert!(!i18n.remove_listener(id));

        i18n.set_locale("ja").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_key_tracking_dedup() {
        let i18n = simple_i18n();

        for _ in 0..3 {
            assert_eq!(i18n.t("missing", &TranslateOptions::new()), "missing");
        }
        let keys = i18n.missing_keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].locale, "en");
        assert_eq!(keys[0].key, "missing");

        assert!(i18n.has_missing_keys());
        i18n.clear_missing_keys();
        assert!(!i18n.has_missing_keys());
    }

    #[test]
    fn test_plural_form_miss_not_tracked_as_missing() {
        let mut translations = TranslationTree::new();
        // The key exists but offers no usable form for count 5
        translations.insert("en".to_string(), json!({"items": {"two": "a pair"}}));
        let i18n = I18n::new(I18nConfig::new(translations, "en")).unwrap();

        let text = i18n.t("items", &TranslateOptions::new().with_count(5.0));
        assert_eq!(text, "items");
        assert!(i18n.exists("items", None));
        assert!(!i18n.has_missing_keys());
    }

    #[test]
    fn test_default_value_not_tracked_as_missing() {
        let i18n = simple_i18n();
        let text = i18n.t("missing", &TranslateOptions::new().with_default("fallback"));
        assert_eq!(text, "fallback");
        assert!(!i18n.has_missing_keys());
    }

    #[test]
    fn test_negotiated_initial_locale() {
        let mut translations = TranslationTree::new();
        translations.insert("en".to_string(), json!({}));
        translations.insert("fr-FR".to_string(), json!({}));

        let i18n = I18n::new(
            I18nConfig::new(translations, "en")
                .with_requested_locales(vec!["fr-CA".to_string()]),
        )
        .unwrap();
        assert_eq!(i18n.locale(), "fr-FR");
    }

    #[test]
    fn test_shared_translations_view() {
        let i18n = simple_i18n();
        let view = i18n.translations();

        i18n.add_translations("en", json!({"fresh": "New"}));
        assert_eq!(view.read()["en"]["fresh"], json!("New"));
    }

    #[test]
    fn test_available_locales_and_has_locale() {
        let i18n = simple_i18n();
        assert_eq!(i18n.available_locales(), vec!["en", "ja"]);
        assert!(i18n.has_locale("ja"));
        assert!(!i18n.has_locale("de"));
    }
}
