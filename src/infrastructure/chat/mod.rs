use crate::infrastructure::i18n::{self, MessageKey};
use std::collections::HashMap;
use tracing::debug;

/// One incoming command from a chat session.
#[derive(Debug, Clone)]
pub struct ChatCommand {
    pub session_id: String,
    pub text: String,
}

/// Thin request/response adapter for the chat channel.
///
/// Understands `/start`, `/help` and `/lang <code>` and keeps per-session
/// language selection. This state is local to the chat interface and never
/// shared with the trading core.
pub struct ChatInterface {
    sessions: HashMap<String, String>,
    default_lang: String,
}

impl ChatInterface {
    /// Fails when the channel token is missing. The supervisor treats this
    /// as a startup error: better to abort than to silently run without
    /// the chat interface.
    pub fn new(token: &str, default_lang: &str) -> Result<Self, String> {
        if token.trim().is_empty() {
            return Err("chat bot token is empty; cannot authenticate".to_string());
        }
        if !i18n::is_supported(default_lang) {
            return Err(format!("unsupported default language: {}", default_lang));
        }
        Ok(Self {
            sessions: HashMap::new(),
            default_lang: default_lang.to_string(),
        })
    }

    fn lang_for(&self, session_id: &str) -> &str {
        self.sessions
            .get(session_id)
            .map(|s| s.as_str())
            .unwrap_or(&self.default_lang)
    }

    /// Dispatch one command and produce the reply text.
    pub fn handle(&mut self, command: &ChatCommand) -> String {
        let mut parts = command.text.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let lang = self.lang_for(&command.session_id).to_string();

        debug!(
            "Chat: session {} lang {} command {:?}",
            command.session_id, lang, verb
        );

        match verb {
            "/start" => i18n::t(&lang, MessageKey::Welcome).to_string(),
            "/help" => i18n::t(&lang, MessageKey::Help).to_string(),
            "/lang" => match (parts.next(), parts.next()) {
                (Some(code), None) if i18n::is_supported(code) => {
                    self.sessions
                        .insert(command.session_id.clone(), code.to_string());
                    i18n::tf(code, MessageKey::LanguageSet, &[("lang", code)])
                }
                (Some(_), None) => i18n::t(&lang, MessageKey::LanguageUnsupported).to_string(),
                _ => i18n::t(&lang, MessageKey::LangUsage).to_string(),
            },
            _ => i18n::t(&lang, MessageKey::UnknownCommand).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(session: &str, text: &str) -> ChatCommand {
        ChatCommand {
            session_id: session.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(ChatInterface::new("", "en").is_err());
        assert!(ChatInterface::new("   ", "en").is_err());
    }

    #[test]
    fn test_start_uses_default_language() {
        let mut chat = ChatInterface::new("token", "en").unwrap();
        assert_eq!(chat.handle(&cmd("a", "/start")), "Welcome to HAYQ Bot");
    }

    #[test]
    fn test_lang_switch_is_per_session() {
        let mut chat = ChatInterface::new("token", "en").unwrap();
        let reply = chat.handle(&cmd("a", "/lang hy"));
        assert!(reply.contains("hy"));

        // Session a switched; session b stays on the default.
        assert_eq!(chat.handle(&cmd("a", "/start")), "Բարի գալուստ HAYQ Բոտ");
        assert_eq!(chat.handle(&cmd("b", "/start")), "Welcome to HAYQ Bot");
    }

    #[test]
    fn test_lang_without_argument_shows_usage() {
        let mut chat = ChatInterface::new("token", "en").unwrap();
        assert!(chat.handle(&cmd("a", "/lang")).starts_with("Usage:"));
    }

    #[test]
    fn test_unsupported_language_rejected() {
        let mut chat = ChatInterface::new("token", "en").unwrap();
        assert_eq!(
            chat.handle(&cmd("a", "/lang xx")),
            "Language not supported."
        );
        // Selection unchanged
        assert_eq!(chat.handle(&cmd("a", "/start")), "Welcome to HAYQ Bot");
    }

    #[test]
    fn test_unknown_command() {
        let mut chat = ChatInterface::new("token", "en").unwrap();
        assert_eq!(chat.handle(&cmd("a", "/stake")), "Unknown command. Try /help");
    }
}
