use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ArogyaError, Result};
use crate::types::Language;

/// Top-level configuration for the Arogya assistant.
///
/// Loaded from `~/.arogya/config.toml` by default. Every section and every
/// field is optional; missing values take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArogyaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl ArogyaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ArogyaConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        let rate = self.speech.speaking_rate;
        if !(0.1..=10.0).contains(&rate) {
            return Err(ArogyaError::Config(format!(
                "speech.speaking_rate must be between 0.1 and 10.0, got {}",
                rate
            )));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Language selected when a session starts.
    pub default_language: Language,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_language: Language::English,
        }
    }
}

/// Which language a deferred reply is resolved in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageBinding {
    /// The language selected when the reply is generated.
    #[default]
    AtReply,
    /// The language selected when the user message was submitted.
    AtSubmit,
}

/// Conversation behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Simulated generation latency before a reply is appended.
    pub reply_delay_ms: u64,
    /// Language captured for deferred replies.
    pub language_binding: LanguageBinding,
    /// Optional TOML file replacing the built-in response table.
    pub response_table_path: Option<String>,
    /// Open each session with a greeting from the assistant.
    pub greeting: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            language_binding: LanguageBinding::AtReply,
            response_table_path: None,
            greeting: true,
        }
    }
}

impl ChatConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// Speech input and playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speak assistant replies aloud.
    pub playback_enabled: bool,
    /// Speaking rate relative to the engine's normal speed (1.0).
    pub speaking_rate: f32,
    /// Text-to-speech program.
    pub playback_program: String,
    /// Arguments for the playback program. Supports `{lang}`, `{locale}`,
    /// `{wpm}` and `{text}` placeholders.
    pub playback_args: Vec<String>,
    /// Speech-to-text program. Speech input is unsupported when unset.
    pub recognizer_program: Option<String>,
    /// Arguments for the recognizer program. Supports `{lang}` and
    /// `{locale}` placeholders.
    pub recognizer_args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            playback_enabled: true,
            speaking_rate: 0.8,
            playback_program: "espeak-ng".to_string(),
            playback_args: vec![
                "-v".to_string(),
                "{lang}".to_string(),
                "-s".to_string(),
                "{wpm}".to_string(),
                "{text}".to_string(),
            ],
            recognizer_program: None,
            recognizer_args: vec!["--language".to_string(), "{locale}".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ArogyaConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.default_language, Language::English);
        assert_eq!(config.chat.reply_delay_ms, 1000);
        assert_eq!(config.chat.reply_delay(), Duration::from_secs(1));
        assert_eq!(config.chat.language_binding, LanguageBinding::AtReply);
        assert!(config.chat.response_table_path.is_none());
        assert!(config.chat.greeting);
        assert!(config.speech.playback_enabled);
        assert!((config.speech.speaking_rate - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.speech.playback_program, "espeak-ng");
        assert!(config.speech.recognizer_program.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"
default_language = "hi"

[chat]
reply_delay_ms = 250
language_binding = "at_submit"
response_table_path = "/etc/arogya/responses.toml"
greeting = false

[speech]
playback_enabled = false
speaking_rate = 1.2
playback_program = "say"
playback_args = ["-r", "{wpm}", "{text}"]
recognizer_program = "whisper-once"
recognizer_args = ["{locale}"]
"#;
        let file = create_temp_config(content);
        let config = ArogyaConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.default_language, Language::Hindi);
        assert_eq!(config.chat.reply_delay_ms, 250);
        assert_eq!(config.chat.language_binding, LanguageBinding::AtSubmit);
        assert_eq!(
            config.chat.response_table_path.as_deref(),
            Some("/etc/arogya/responses.toml")
        );
        assert!(!config.chat.greeting);
        assert!(!config.speech.playback_enabled);
        assert!((config.speech.speaking_rate - 1.2).abs() < f32::EPSILON);
        assert_eq!(config.speech.playback_program, "say");
        assert_eq!(config.speech.playback_args, vec!["-r", "{wpm}", "{text}"]);
        assert_eq!(
            config.speech.recognizer_program.as_deref(),
            Some("whisper-once")
        );
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[chat]
reply_delay_ms = 0
"#;
        let file = create_temp_config(content);
        let config = ArogyaConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.reply_delay_ms, 0);
        assert!(config.chat.greeting);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.speech.playback_program, "espeak-ng");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = ArogyaConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.reply_delay_ms, 1000);
        assert_eq!(config.general.default_language, Language::English);
    }

    #[test]
    fn test_unknown_language_code_is_rejected() {
        let file = create_temp_config("[general]\ndefault_language = \"fr\"\n");
        let result = ArogyaConfig::load(file.path());
        assert!(matches!(result, Err(ArogyaError::Config(_))));
    }

    #[test]
    fn test_out_of_range_speaking_rate_is_rejected() {
        let file = create_temp_config("[speech]\nspeaking_rate = 0.0\n");
        let err = ArogyaConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("speaking_rate"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        assert!(ArogyaConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ArogyaConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.chat.reply_delay_ms, 1000);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = ArogyaConfig::default();
        config.general.default_language = Language::Hindi;
        config.chat.language_binding = LanguageBinding::AtSubmit;
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = ArogyaConfig::load(&path).unwrap();
        assert_eq!(reloaded.general.default_language, Language::Hindi);
        assert_eq!(reloaded.chat.language_binding, LanguageBinding::AtSubmit);
        assert_eq!(reloaded.speech.playback_args, config.speech.playback_args);
    }
}
