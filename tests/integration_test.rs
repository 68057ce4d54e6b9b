//! Integration tests for i18n-bridge

use i18n_bridge::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

fn rails_fixture() -> TranslationTree {
    let mut tree = HashMap::new();
    tree.insert(
        "en".to_string(),
        json!({
            "greeting": "Hello, %{name}!",
            "inbox": {
                "zero": "No messages",
                "one": "One message",
                "other": "%{count} messages"
            },
            "nav": {"home": "Home", "back": "Back"}
        }),
    );
    tree.insert("en-US".to_string(), json!({"spelling": "color"}));
    tree.insert(
        "ru".to_string(),
        json!({
            "inbox": {
                "one": "%{count} сообщение",
                "few": "%{count} сообщения",
                "many": "%{count} сообщений"
            }
        }),
    );
    tree
}

#[test]
fn test_resolution_pipeline_end_to_end() {
    let i18n = I18n::new(I18nConfig::new(rails_fixture(), "en")).unwrap();

    assert_eq!(
        i18n.t("greeting", &TranslateOptions::new().with_value("name", "Ada")),
        "Hello, Ada!"
    );
    // Missing variable stays visible
    assert_eq!(
        i18n.t("greeting", &TranslateOptions::new()),
        "Hello, %{name}!"
    );
    // Plural forms, including explicit zero priority
    assert_eq!(
        i18n.t("inbox", &TranslateOptions::new().with_count(0.0)),
        "No messages"
    );
    assert_eq!(
        i18n.t("inbox", &TranslateOptions::new().with_count(1.0)),
        "One message"
    );
    assert_eq!(
        i18n.t("inbox", &TranslateOptions::new().with_count(5.0)),
        "5 messages"
    );
}

#[test]
fn test_language_prefix_fallback() {
    let i18n = I18n::new(
        I18nConfig::new(rails_fixture(), "en").with_locale("en-US"),
    )
    .unwrap();

    // Region-specific key resolves from en-US, everything else from en
    assert_eq!(i18n.t("spelling", &TranslateOptions::new()), "color");
    assert_eq!(i18n.t("nav.home", &TranslateOptions::new()), "Home");
}

#[test]
fn test_russian_plural_categories() {
    let i18n = I18n::new(I18nConfig::new(rails_fixture(), "en")).unwrap();
    i18n.set_locale("ru").unwrap();

    let at = |n: f64| i18n.t("inbox", &TranslateOptions::new().with_count(n));
    assert_eq!(at(1.0), "1 сообщение");
    assert_eq!(at(3.0), "3 сообщения");
    assert_eq!(at(5.0), "5 сообщений");
    assert_eq!(at(21.0), "21 сообщение");
}

#[test]
fn test_laravel_mode_resolution() {
    let mut tree = HashMap::new();
    tree.insert(
        "en".to_string(),
        json!({
            "welcome": "Welcome, :name!",
            "apples": "{0} There are none|{1} There is one|[2,*] There are :count"
        }),
    );

    let i18n = I18n::new(
        I18nConfig::new(tree, "en").with_mode(Mode::Laravel),
    )
    .unwrap();

    assert_eq!(
        i18n.t("welcome", &TranslateOptions::new().with_value("name", "Ada")),
        "Welcome, Ada!"
    );
    let at = |n: f64| i18n.t("apples", &TranslateOptions::new().with_count(n));
    assert_eq!(at(0.0), "There are none");
    assert_eq!(at(1.0), "There is one");
    assert_eq!(at(9.0), "There are 9");
}

#[test]
fn test_check_then_convert_round_trip() {
    let tree = rails_fixture();

    let report = check_tree_compatibility(&tree, Mode::Rails, Mode::Laravel);
    assert!(report.compatible);
    // ru carries `few`/`many` forms pipe syntax cannot express
    assert!(report
        .warnings
        .iter()
        .any(|w| w.kind == IssueKind::UnsupportedPluralForm && w.key.starts_with("ru.")));

    let converted = convert_translations(&tree, Mode::Rails, Mode::Laravel);
    assert_eq!(converted["en"]["greeting"], json!("Hello, :name!"));
    assert_eq!(
        converted["en"]["inbox"],
        json!("{0} No messages|{1} One message|[2,*] :count messages")
    );

    // And back to a rails plural object via the structural entry point
    let pipe = converted["en"]["inbox"].as_str().unwrap();
    assert_eq!(
        laravel_plural_to_rails(pipe).unwrap(),
        json!({
            "zero": "No messages",
            "one": "One message",
            "other": "%{count} messages"
        })
    );
}

#[test]
fn test_malformed_pipe_string_blocks_conversion() {
    let mut tree = HashMap::new();
    tree.insert("en".to_string(), json!({"odd": "a|b|c|d"}));

    let report = check_tree_compatibility(&tree, Mode::Laravel, Mode::Rails);
    assert!(!report.compatible);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, IssueKind::MalformedPipeString);
}

#[test]
fn test_missing_key_tracking() {
    let i18n = I18n::new(I18nConfig::new(rails_fixture(), "en")).unwrap();

    for _ in 0..3 {
        assert_eq!(i18n.t("missing", &TranslateOptions::new()), "missing");
    }
    let missing = i18n.missing_keys();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].locale, "en");
    assert_eq!(missing[0].key, "missing");
}

#[test]
fn test_locale_change_notification_and_growth() {
    let i18n = I18n::new(I18nConfig::new(rails_fixture(), "en")).unwrap();

    let seen = Arc::new(support::Log::default());
    {
        let seen = Arc::clone(&seen);
        i18n.on_change(move |locale| seen.push(locale));
    }

    assert!(i18n.set_locale("  ja  ").is_ok());
    assert_eq!(i18n.locale(), "ja");
    assert!(i18n.set_locale("   ").is_err());
    assert_eq!(i18n.locale(), "ja");
    assert_eq!(seen.entries(), vec!["ja"]);

    // The tree only grows; a live view observes the merge
    let view = i18n.translations();
    i18n.add_translations("ja", json!({"greeting": "こんにちは, %{name}!"}));
    assert!(view.read()["ja"]["greeting"].is_string());
    assert_eq!(
        i18n.t("greeting", &TranslateOptions::new().with_value("name", "Ada")),
        "こんにちは, Ada!"
    );
}

/// Tiny synchronized log for listener assertions.
mod support {
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct Log(Mutex<Vec<String>>);

    impl Log {
        pub fn push(&self, entry: &str) {
            self.0.lock().unwrap().push(entry.to_string());
        }

        pub fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }
}
