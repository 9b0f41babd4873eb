//! CLI argument definitions for the Arogya terminal assistant.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use arogya_core::config::ArogyaConfig;
use arogya_core::types::Language;
use clap::Parser;

/// Arogya: a bilingual health-information assistant for the terminal.
#[derive(Parser, Debug)]
#[command(name = "arogya", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Initial language code (en, hi, ta, te, bn, mr).
    #[arg(short = 'L', long = "language", value_parser = parse_language)]
    pub language: Option<Language>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Do not speak replies aloud.
    #[arg(long = "mute")]
    pub mute: bool,

    /// Delay before each reply, in milliseconds.
    #[arg(long = "reply-delay-ms")]
    pub reply_delay_ms: Option<u64>,
}

fn parse_language(code: &str) -> Result<Language, String> {
    code.parse::<Language>().map_err(|e| e.to_string())
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > AROGYA_CONFIG env var > ~/.arogya/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("AROGYA_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Fold flag overrides into a loaded configuration.
    pub fn apply(&self, config: &mut ArogyaConfig) {
        if let Some(language) = self.language {
            config.general.default_language = language;
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
        if self.mute {
            config.speech.playback_enabled = false;
        }
        if let Some(ms) = self.reply_delay_ms {
            config.chat.reply_delay_ms = ms;
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".arogya").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".arogya").join("config.toml");
    }
    PathBuf::from("config.toml")
}
