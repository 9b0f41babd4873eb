//! Parsing of REPL input lines.

use arogya_chat::TopicId;
use arogya_core::types::Language;

pub const HELP: &str = "\
Commands:
  /lang <code>    Switch language (en, hi, ta, te, bn, mr)
  /languages      List languages
  /topics         List health topics
  /topic <id>     Open the chat from a topic
  /dashboard      Show the dashboard
  /chat           Open the chat
  /mic            Ask by voice
  /history        Show the conversation so far
  /help           Show this help
  /quit           Exit
Anything else is sent to the assistant.";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Lang(Language),
    Languages,
    Topics,
    Topic(TopicId),
    Dashboard,
    Chat,
    Mic,
    History,
    Help,
    Quit,
    /// Whitespace only.
    Nothing,
    /// Malformed command; the payload is shown to the user.
    Invalid(String),
}

pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Nothing;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        // Typed text goes through unchanged.
        return Command::Say(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match (name.as_str(), arg) {
        ("lang", "") => Command::Invalid("usage: /lang <code>".to_string()),
        ("lang", code) => match Language::from_code(code) {
            Some(language) => Command::Lang(language),
            None => Command::Invalid(format!("unknown language code: {}", code)),
        },
        ("languages", _) => Command::Languages,
        ("topics", _) => Command::Topics,
        ("topic", "") => Command::Invalid("usage: /topic <id>".to_string()),
        ("topic", id) => match id.parse::<TopicId>() {
            Ok(id) => Command::Topic(id),
            Err(e) => Command::Invalid(e.to_string()),
        },
        ("dashboard" | "back", _) => Command::Dashboard,
        ("chat", _) => Command::Chat,
        ("mic", _) => Command::Mic,
        ("history", _) => Command::History,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        (other, _) => Command::Invalid(format!("unknown command: /{}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_said() {
        assert_eq!(parse("dengue symptoms\n"), Command::Say("dengue symptoms".into()));
        assert_eq!(parse("  टीका  "), Command::Say("  टीका  ".into()));
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse(""), Command::Nothing);
        assert_eq!(parse("   \n"), Command::Nothing);
    }

    #[test]
    fn test_lang() {
        assert_eq!(parse("/lang hi"), Command::Lang(Language::Hindi));
        assert_eq!(parse("/LANG  EN "), Command::Lang(Language::English));
        assert!(matches!(parse("/lang"), Command::Invalid(_)));
        assert!(matches!(parse("/lang fr"), Command::Invalid(m) if m.contains("fr")));
    }

    #[test]
    fn test_topic() {
        assert_eq!(parse("/topic nutrition"), Command::Topic(TopicId::Nutrition));
        assert!(matches!(parse("/topic"), Command::Invalid(_)));
        assert!(matches!(parse("/topic surgery"), Command::Invalid(m) if m.contains("surgery")));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("/languages"), Command::Languages);
        assert_eq!(parse("/topics"), Command::Topics);
        assert_eq!(parse("/dashboard"), Command::Dashboard);
        assert_eq!(parse("/back"), Command::Dashboard);
        assert_eq!(parse("/chat"), Command::Chat);
        assert_eq!(parse("/mic"), Command::Mic);
        assert_eq!(parse("/history"), Command::History);
        assert_eq!(parse("/help"), Command::Help);
        assert_eq!(parse("/quit"), Command::Quit);
        assert_eq!(parse("/exit"), Command::Quit);
        assert!(matches!(parse("/bogus"), Command::Invalid(_)));
    }
}
