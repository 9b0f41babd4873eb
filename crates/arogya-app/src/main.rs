//! Arogya application binary - composition root.
//!
//! Ties the Arogya crates together into a terminal assistant:
//! 1. Load configuration from TOML and fold in CLI overrides
//! 2. Load the response table (falling back to the built-in one)
//! 3. Bind speech playback and speech input to external programs
//! 4. Run the conversation REPL on stdin until `/quit` or Ctrl-C

mod cli;
mod commands;
mod dashboard;

use std::path::Path;
use std::sync::Arc;

use arogya_chat::{topics, ConversationSession, Navigator, ResponseResolver, ResponseTable, View};
use arogya_core::config::ArogyaConfig;
use arogya_core::error::Result;
use arogya_core::events::SessionEvent;
use arogya_core::types::{Notice, NoticeKind};
use arogya_speech::{
    CommandRecognizer, CommandSpeaker, SpeechError, SpeechInput, SpeechPlayback,
    SpeechRecognizer, UnsupportedRecognizer,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use crate::cli::CliArgs;
use crate::commands::Command;
use crate::dashboard::{render_chat_header, render_dashboard, render_languages, render_message};

/// Recognizer selected from configuration.
enum HostRecognizer {
    Command(CommandRecognizer),
    Unsupported(UnsupportedRecognizer),
}

impl SpeechRecognizer for HostRecognizer {
    fn is_available(&self) -> bool {
        match self {
            HostRecognizer::Command(r) => r.is_available(),
            HostRecognizer::Unsupported(r) => r.is_available(),
        }
    }

    async fn recognize(&self, locale: &str) -> std::result::Result<String, SpeechError> {
        match self {
            HostRecognizer::Command(r) => r.recognize(locale).await,
            HostRecognizer::Unsupported(r) => r.recognize(locale).await,
        }
    }
}

/// Load the configuration file if present. Errors are returned as text so
/// they can be logged once tracing is up.
fn load_config(path: &Path) -> (ArogyaConfig, Option<String>) {
    if !path.exists() {
        return (ArogyaConfig::default(), None);
    }
    match ArogyaConfig::load(path) {
        Ok(config) => (config, None),
        Err(e) => (ArogyaConfig::default(), Some(e.to_string())),
    }
}

fn try_load_table(path: &Path) -> Result<ResponseTable> {
    Ok(ResponseTable::load(path)?)
}

fn load_table(path: Option<&str>) -> ResponseTable {
    let Some(path) = path else {
        return ResponseTable::builtin();
    };
    match try_load_table(Path::new(path)) {
        Ok(table) => {
            tracing::info!(path, "Response table loaded");
            table
        }
        Err(e) => {
            tracing::warn!(path, error = %e, "Failed to load response table, using built-in content");
            ResponseTable::builtin()
        }
    }
}

fn build_playback(config: &ArogyaConfig) -> Option<Arc<dyn SpeechPlayback>> {
    if !config.speech.playback_enabled {
        tracing::info!("Speech playback disabled");
        return None;
    }
    let speaker = CommandSpeaker::new(
        config.speech.playback_program.clone(),
        config.speech.playback_args.clone(),
    );
    if !speaker.is_available() {
        tracing::warn!(
            program = %config.speech.playback_program,
            "Speech playback program not found, replies will not be spoken"
        );
        print_notice(&Notice::new(
            NoticeKind::PlaybackUnsupported,
            config.general.default_language,
        ));
        return None;
    }
    Some(Arc::new(speaker))
}

fn build_recognizer(config: &ArogyaConfig) -> HostRecognizer {
    match &config.speech.recognizer_program {
        Some(program) => HostRecognizer::Command(CommandRecognizer::new(
            program.clone(),
            config.speech.recognizer_args.clone(),
        )),
        None => HostRecognizer::Unsupported(UnsupportedRecognizer),
    }
}

fn print_notice(notice: &Notice) {
    println!("(!) {}", notice);
}

/// Print messages as the session appends them.
async fn render_events(mut rx: broadcast::Receiver<SessionEvent>) {
    loop {
        match rx.recv().await {
            Ok(SessionEvent::MessageAppended { message, .. }) if !message.is_user => {
                println!("{}", render_message(&message));
            }
            Ok(SessionEvent::ReplyPendingChanged { pending: true, .. }) => {
                println!("        ...");
            }
            Ok(SessionEvent::SessionClosed { .. }) | Err(broadcast::error::RecvError::Closed) => {
                break;
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "Event renderer lagged");
            }
        }
    }
}

async fn dictate(
    input: &SpeechInput<HostRecognizer>,
    session: &ConversationSession,
) -> Option<String> {
    let language = session.language();
    println!("(mic) ... Ctrl-C to stop");
    let listen = input.listen(language);
    tokio::pin!(listen);
    // Cancel and let the listen finish so it reports `Cancelled`.
    let result = tokio::select! {
        r = &mut listen => r,
        _ = tokio::signal::ctrl_c() => {
            input.cancel();
            listen.await
        }
    };
    match result {
        Ok(text) => Some(text),
        Err(e) => {
            if let Some(notice) = e.notice(language) {
                print_notice(&notice);
            }
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let (mut config, config_error) = load_config(&config_file);
    args.apply(&mut config);

    // Tracing goes to stderr so the transcript on stdout stays clean.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    tracing::info!("Starting Arogya v{}", env!("CARGO_PKG_VERSION"));
    match config_error {
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
        None => tracing::info!(path = %config_file.display(), "Configuration resolved"),
    }

    // Content and capabilities.
    let table = load_table(config.chat.response_table_path.as_deref());
    let resolver = ResponseResolver::new(table);
    let playback = build_playback(&config);
    let input = SpeechInput::new(build_recognizer(&config));
    if !input.is_available() {
        tracing::info!("Speech input unavailable, typed input only");
    }

    let mut builder = ConversationSession::builder(resolver)
        .language(config.general.default_language)
        .config(config.chat.clone());
    if let Some(playback) = playback {
        builder = builder.playback(playback, config.speech.speaking_rate);
    }
    let session = builder.build();

    let renderer = tokio::spawn(render_events(session.subscribe()));
    let mut nav = Navigator::new();

    println!("{}", render_dashboard(session.language()));
    println!("\n/help for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        match commands::parse(&line) {
            Command::Nothing => {}
            Command::Say(text) => {
                if nav.view() == View::Dashboard {
                    nav.start_chat();
                    print_chat(&session);
                }
                session.submit(&text);
            }
            Command::Lang(language) => {
                session.set_language(language);
                if !language.is_supported() {
                    println!("{}: replies will be in English", language.name());
                }
                redraw(&nav, &session);
            }
            Command::Languages => println!("{}", render_languages(session.language())),
            Command::Topics => {
                let text = dashboard::DashboardText::for_language(session.language());
                for topic in topics(session.language()) {
                    println!("{}", dashboard::render_topic_card(topic, text));
                }
            }
            Command::Topic(id) => {
                let topic = nav.select_topic(session.language(), id);
                println!("-> {}", topic.title);
                print_chat(&session);
            }
            Command::Dashboard => {
                nav.back();
                println!("{}", render_dashboard(session.language()));
            }
            Command::Chat => {
                nav.start_chat();
                print_chat(&session);
            }
            Command::Mic => {
                if let Some(text) = dictate(&input, &session).await {
                    println!("(mic) {}", text);
                    nav.start_chat();
                    session.submit(&text);
                }
            }
            Command::History => {
                for message in session.messages() {
                    println!("{}", render_message(&message));
                }
            }
            Command::Help => println!("{}", commands::HELP),
            Command::Quit => break,
            Command::Invalid(msg) => println!("{}", msg),
        }
    }

    let discarded = session.pending_count();
    if discarded > 0 {
        tracing::info!(discarded, "Discarding replies still pending");
    }
    session.try_close()?;
    if let Err(e) = renderer.await {
        tracing::debug!(error = %e, "Event renderer ended abnormally");
    }
    tracing::info!("Goodbye");
    Ok(())
}

fn print_chat(session: &ConversationSession) {
    println!("{}", render_chat_header(session.language()));
    for message in session.messages() {
        println!("{}", render_message(&message));
    }
    println!("{}", dashboard::DashboardText::for_language(session.language()).input_hint);
}

fn redraw(nav: &Navigator, session: &ConversationSession) {
    match nav.view() {
        View::Dashboard => println!("{}", render_dashboard(session.language())),
        View::Chat => println!("{}", render_chat_header(session.language())),
    }
}
