//! Static per-language message table for the chat interface.
//!
//! Lookup falls back to English for languages with partial coverage.
//! Templates use `{name}` placeholders, filled via [`tf`].

/// Keys the chat interface can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    Welcome,
    Help,
    LanguageSet,
    LanguageUnsupported,
    LangUsage,
    UnknownCommand,
}

pub const SUPPORTED_LANGS: &[&str] = &["en", "hy", "ru", "fr", "es", "de", "zh", "ja", "ar"];

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGS.contains(&code)
}

fn lookup(lang: &str, key: MessageKey) -> Option<&'static str> {
    use MessageKey::*;
    match (lang, key) {
        ("en", Welcome) => Some("Welcome to HAYQ Bot"),
        ("en", Help) => Some("Available commands: /start /help /lang <code>"),
        ("en", LanguageSet) => Some("Language set to {lang}"),
        ("en", LanguageUnsupported) => Some("Language not supported."),
        ("en", LangUsage) => Some("Usage: /lang <en|hy|ru|fr|es|de|zh|ja|ar>"),
        ("en", UnknownCommand) => Some("Unknown command. Try /help"),

        ("hy", Welcome) => Some("Բարի գալուստ HAYQ Բոտ"),
        ("hy", Help) => Some("Հասանելի հրամաններ՝ /start /help /lang <code>"),
        ("hy", LanguageSet) => Some("Լեզուն փոխվեց՝ {lang}"),
        ("hy", LanguageUnsupported) => Some("Լեզուն չի աջակցվում։"),

        ("ru", Welcome) => Some("Добро пожаловать на HAYQ Бот"),
        ("ru", Help) => Some("Доступные команды: /start /help /lang <code>"),
        ("ru", LanguageSet) => Some("Язык изменён на {lang}"),
        ("ru", LanguageUnsupported) => Some("Язык не поддерживается."),

        ("fr", Welcome) => Some("Bienvenue sur le HAYQ Bot"),
        ("fr", Help) => Some("Commandes disponibles : /start /help /lang <code>"),
        ("fr", LanguageSet) => Some("Langue définie sur {lang}"),
        ("fr", LanguageUnsupported) => Some("Langue non prise en charge."),

        ("es", Welcome) => Some("Bienvenido al HAYQ Bot"),
        ("es", LanguageSet) => Some("Idioma cambiado a {lang}"),

        ("de", Welcome) => Some("Willkommen im HAYQ Bot"),
        ("de", LanguageSet) => Some("Sprache auf {lang} gesetzt"),

        ("zh", Welcome) => Some("欢迎来到 HAYQ Bot"),
        ("ja", Welcome) => Some("HAYQ ボットへようこそ"),
        ("ar", Welcome) => Some("مرحبًا بك في HAYQ Bot"),

        _ => None,
    }
}

/// Translate a key, falling back to English.
pub fn t(lang: &str, key: MessageKey) -> &'static str {
    lookup(lang, key)
        .or_else(|| lookup("en", key))
        .unwrap_or("")
}

/// Translate with `{placeholder}` substitution.
pub fn tf(lang: &str, key: MessageKey, params: &[(&str, &str)]) -> String {
    let mut result = t(lang, key).to_string();
    for (placeholder, value) in params {
        let pattern = format!("{{{}}}", placeholder);
        result = result.replace(&pattern, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_language_has_a_welcome() {
        for lang in SUPPORTED_LANGS {
            assert!(
                lookup(lang, MessageKey::Welcome).is_some(),
                "missing welcome for {}",
                lang
            );
        }
    }

    #[test]
    fn test_partial_languages_fall_back_to_english() {
        assert_eq!(t("zh", MessageKey::Help), t("en", MessageKey::Help));
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(t("xx", MessageKey::Welcome), "Welcome to HAYQ Bot");
    }

    #[test]
    fn test_template_substitution() {
        let text = tf("en", MessageKey::LanguageSet, &[("lang", "hy")]);
        assert_eq!(text, "Language set to hy");
    }
}
