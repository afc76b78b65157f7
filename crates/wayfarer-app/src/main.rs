//! Wayfarer console binary: composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Initialize tracing (RUST_LOG > --log-level > WAYFARER_LOG > config)
//! 3. Build the travel agent over the in-memory fixture services
//! 4. Run one message (`--once`) or an interactive stdin/stdout loop

mod cli;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use wayfarer_chat::{AgentTurn, ChatMessage, ConversationalAgent, Sender, TravelAgent};
use wayfarer_core::config::WayfarerConfig;
use wayfarer_services::TravelServices;

use cli::CliArgs;

const PROMPT_HELP: &str = "Commands: :history, :suggest, :quit";

/// Print an agent turn: text, rich content kind (or JSON), navigation.
fn print_turn(turn: &AgentTurn, json: bool) {
    println!("agent> {}", turn.message.text);
    if let Some(rich) = &turn.message.rich_content {
        if json {
            match serde_json::to_string_pretty(rich) {
                Ok(body) => println!("  [{}] {}", rich.kind(), body),
                Err(e) => tracing::warn!(error = %e, "Failed to serialize rich content"),
            }
        } else {
            println!("  [{}]", rich.kind());
        }
    }
    if let Some(nav) = &turn.navigation {
        println!("  -> {:?}", nav);
    }
}

fn print_history(history: &[ChatMessage]) {
    if history.is_empty() {
        println!("(no messages yet)");
        return;
    }
    for message in history {
        let who = match message.sender {
            Sender::User => "you",
            Sender::Agent => "agent",
        };
        println!(
            "[{}] {}> {}",
            message.timestamp.format("%H:%M:%S"),
            who,
            message.text
        );
    }
}

/// Run one turn and print the outcome. Rejected messages are reported,
/// not fatal.
async fn send(agent: &TravelAgent, conversation: &str, text: &str, json: bool) {
    match agent.process_turn(conversation, text).await {
        Ok(turn) => print_turn(&turn, json),
        Err(e) => println!("agent> ({})", e),
    }
}

async fn console_loop(
    agent: &TravelAgent,
    conversation: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wayfarer travel assistant. {}", PROMPT_HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => continue,
            ":quit" | ":q" | ":exit" => break,
            ":history" => print_history(&agent.history(conversation).await?),
            ":suggest" => {
                for suggestion in agent.suggested_actions(conversation).await? {
                    println!("  - {}", suggestion);
                }
            }
            ":help" => println!("{}", PROMPT_HELP),
            text => send(agent, conversation, text, json).await,
        }

        let evicted = agent.evict_idle().await?;
        if evicted > 0 {
            tracing::debug!(evicted, "Idle conversations evicted");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before logging so its level can apply; report after.
    let config_file = args.resolve_config_path();
    let loaded = WayfarerConfig::load(&config_file);
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => WayfarerConfig::default(),
    };

    // Tracing.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    tracing::info!("Starting Wayfarer v{}", env!("CARGO_PKG_VERSION"));
    match loaded {
        Ok(_) => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Err(e) if config_file.exists() => {
            tracing::warn!(path = %config_file.display(), error = %e, "Invalid configuration, using defaults");
        }
        Err(_) => {
            tracing::info!(path = %config_file.display(), "No configuration file, using defaults");
        }
    }

    let agent = TravelAgent::new(&config, TravelServices::in_memory());
    let conversation = args
        .conversation
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    tracing::debug!(conversation = %conversation, "Conversation started");

    match args.once.as_deref() {
        Some(text) => send(&agent, &conversation, text, args.json).await,
        None => console_loop(&agent, &conversation, args.json).await?,
    }

    Ok(())
}
