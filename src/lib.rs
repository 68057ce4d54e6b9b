//! Translation Resolution for Two Backend Conventions
//!
//! `i18n-bridge` resolves translation keys into localized strings under
//! either of two divergent backend-framework conventions, and converts
//! translation trees between them:
//!
//! - **Rails style**: nested key-based plural objects
//!   (`{"one": "...", "other": "..."}`) with `%{var}` interpolation
//! - **Laravel style**: pipe-delimited plural strings
//!   (`"{0} none|{1} one|[2,*] many"`) with `:var` interpolation
//!
//! # Quick Start
//!
//! ```
//! use i18n_bridge::{I18n, I18nConfig, Mode, TranslateOptions};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let mut translations = HashMap::new();
//! translations.insert("en".to_string(), json!({
//!     "greeting": "Hello, %{name}!",
//!     "inbox": {"zero": "No messages", "one": "One message", "other": "%{count} messages"}
//! }));
//!
//! let i18n = I18n::new(I18nConfig::new(translations, "en")).unwrap();
//!
//! let text = i18n.t("greeting", &TranslateOptions::new().with_value("name", "Ada"));
//! assert_eq!(text, "Hello, Ada!");
//!
//! let text = i18n.t("inbox", &TranslateOptions::new().with_count(3.0));
//! assert_eq!(text, "3 messages");
//! ```
//!
//! # Format Conversion
//!
//! ```
//! use i18n_bridge::{check_compatibility, convert_translations, Mode};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let mut tree = HashMap::new();
//! tree.insert("en".to_string(), json!({"greeting": "Hello, %{name}!"}));
//!
//! let report = check_compatibility(
//!     tree["en"].as_object().unwrap(),
//!     Mode::Rails,
//!     Mode::Laravel,
//! );
//! assert!(report.compatible);
//!
//! let converted = convert_translations(&tree, Mode::Rails, Mode::Laravel);
//! assert_eq!(converted["en"]["greeting"], json!("Hello, :name!"));
//! ```
//!
//! Resolution misses are never errors: a missing translation surfaces as the
//! untranslated key string, favoring visible breakage over silent data loss.
//! Only construction and locale assignment can fail.

mod compat;
mod config;
mod convert;
mod error;
mod i18n;
mod interpolate;
pub mod locale;
mod mode;
mod plural;
mod translator;
mod tree;

pub use compat::{check_compatibility, check_tree_compatibility, CompatReport, Issue, IssueKind};
pub use config::I18nConfig;
pub use convert::{convert_translations, laravel_plural_to_rails};
pub use error::{ConfigIssue, I18nError};
pub use i18n::{I18n, ListenerId, LocaleListener, MissingKey};
pub use interpolate::Interpolator;
pub use mode::{InterpolationOptions, Mode};
pub use plural::{
    key_to_pipe, parse_pipe_separated, pipe_to_key, plural_category, PluralCategory, PluralRule,
    Pluralizer,
};
pub use translator::{MissingHandler, Resolution, TranslateOptions, Translator};
pub use tree::{
    classify_node, deep_merge, NodeKind, TranslationTree, TranslationValue, PLURAL_KEYS,
};

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        check_compatibility, convert_translations, laravel_plural_to_rails, plural_category,
        CompatReport, I18n, I18nConfig, I18nError, Mode, PluralCategory, Pluralizer, Result,
        TranslateOptions,
    };
}
