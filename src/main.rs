mod agent;
mod cli;
mod config;
mod engine;
mod error;
mod time_tool;

use std::io::{self, Write};

use agent::{Agent, process_command};
use clap::Parser;
use cli::Cli;
use engine::VertexInitializer;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Commands that end the interactive loop, matched case-insensitively
const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "종료"];

const SHUTDOWN_MESSAGE: &str = "Hephaestus-Alpha shutting down. Mission complete.";

/// Loads `.env`, initializes tracing, connects the agent and either runs a single `--command`
/// or reads commands from stdin until an exit word, Ctrl-C or end of input.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` values become visible to RUST_LOG and clap's `env` fallbacks
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings();

    let Some(agent) = agent::initialize(&settings, &VertexInitializer) else {
        std::process::exit(1);
    };

    if let Some(command) = cli.command.as_deref() {
        println!("{}", process_command(&agent, command).await);
        return Ok(());
    }

    command_loop(&agent).await;
    Ok(())
}

async fn command_loop(agent: &Agent) {
    println!("Awaiting commands. Type 'exit', 'quit', or '종료' to end.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if let Err(e) = prompt() {
            error!("[FATAL] An unexpected error occurred in the main loop: {}", e);
            break;
        }

        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let user_command = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("End of input");
                println!();
                break;
            }
            Err(e) => {
                error!("[FATAL] An unexpected error occurred in the main loop: {}", e);
                break;
            }
        };

        if is_exit_command(&user_command) {
            break;
        }

        let result = tokio::select! {
            result = process_command(agent, &user_command) => result,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };
        println!("{}", result);
    }

    println!("{}", SHUTDOWN_MESSAGE);
}

fn prompt() -> io::Result<()> {
    print!("[COMMAND] > ");
    io::stdout().flush()
}

fn is_exit_command(command: &str) -> bool {
    let command = command.trim().to_lowercase();
    EXIT_COMMANDS.contains(&command.as_str())
}
