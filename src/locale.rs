//! Locale String Helpers
//!
//! Locales are plain BCP 47-ish tags (`en`, `en-US`, `pt_BR`). The crate
//! never parses them into structured form; it only needs the language subtag
//! for plural-rule selection and fallback-chain construction, plus a small
//! negotiation helper for picking an initial locale.

/// Trim and validate a locale tag.
///
/// Returns `None` for empty or whitespace-only input.
pub fn normalize(locale: &str) -> Option<String> {
    let trimmed = locale.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The language subtag of a locale (`en-US` -> `en`, `pt_BR` -> `pt`).
pub fn language_of(locale: &str) -> &str {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
}

/// Whether the locale carries more than a bare language subtag.
pub fn has_region(locale: &str) -> bool {
    locale.contains(['-', '_'])
}

/// Pick the best locale from `available` for the `requested` preferences.
///
/// Tries each requested locale in order: exact match first, then a
/// language-only match (`fr-CA` matches available `fr` or `fr-FR`). Falls
/// back to `default` when nothing matches.
///
/// # Example
///
/// ```
/// use i18n_bridge::locale::negotiate_locale;
///
/// let available = ["en", "fr-FR", "de"];
/// assert_eq!(negotiate_locale(&["fr-CA"], &available, "en"), "fr-FR");
/// assert_eq!(negotiate_locale(&["ja"], &available, "en"), "en");
/// ```
pub fn negotiate_locale<S: AsRef<str>, A: AsRef<str>>(
    requested: &[S],
    available: &[A],
    default: &str,
) -> String {
    for req in requested {
        let req = req.as_ref();
        if let Some(exact) = available.iter().find(|a| a.as_ref() == req) {
            return exact.as_ref().to_string();
        }
        let lang = language_of(req);
        if let Some(by_lang) = available
            .iter()
            .find(|a| language_of(a.as_ref()) == lang)
        {
            return by_lang.as_ref().to_string();
        }
    }
    default.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  ja  "), Some("ja".to_string()));
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
    }

    #[test]
    fn test_language_of() {
        assert_eq!(language_of("en-US"), "en");
        assert_eq!(language_of("pt_BR"), "pt");
        assert_eq!(language_of("fr"), "fr");
    }

    #[test]
    fn test_negotiate_exact_beats_language() {
        let available = ["en", "en-GB"];
        assert_eq!(negotiate_locale(&["en-GB"], &available, "en"), "en-GB");
    }

    #[test]
    fn test_negotiate_language_fallback() {
        let available = ["en-US", "fr-FR"];
        assert_eq!(negotiate_locale(&["fr"], &available, "en-US"), "fr-FR");
    }

    #[test]
    fn test_negotiate_default() {
        let available = ["en"];
        assert_eq!(negotiate_locale(&["de", "ja"], &available, "en"), "en");
    }
}
