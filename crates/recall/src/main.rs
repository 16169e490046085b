// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recall - remembers the people you talk to.
//!
//! This is the binary entry point. It wires the SQLite identity store and the
//! Anthropic-backed collaborators into a conversation manager.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod doctor;
mod people;
mod replay;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recall_config::RecallConfig;

/// Recall - remembers the people you talk to.
#[derive(Parser, Debug)]
#[command(name = "recall", version, about, long_about = None)]
struct Cli {
    /// Load this config file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Feed a JSONL transcript through a conversation session.
    Replay {
        /// One `{"speaker", "text", "is_final"}` object per line.
        file: PathBuf,
    },
    /// Show what Recall remembers about a person.
    Person { name: String },
    /// Delete a person and their conversation history.
    Forget { name: String },
    /// Check configuration, database and API key.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => recall_config::load_and_validate_path(path),
        None => recall_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            recall_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Replay { file }) => replay::run_replay(&config, &file).await,
        Some(Commands::Person { name }) => people::run_person(&config, &name).await,
        Some(Commands::Forget { name }) => people::run_forget(&config, &name).await,
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("recall: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("recall: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("recall={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_config(config: &RecallConfig) -> Result<(), recall_core::RecallError> {
    print!("{}", render_config(config)?);
    Ok(())
}

/// Serializes the config as TOML with the API key masked.
fn render_config(config: &RecallConfig) -> Result<String, recall_core::RecallError> {
    let mut shown = config.clone();
    if shown.anthropic.api_key.is_some() {
        shown.anthropic.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| recall_core::RecallError::Config(format!("cannot render config: {e}")))
}
