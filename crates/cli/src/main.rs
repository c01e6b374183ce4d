//! LessonAid CLI — the main entry point.
//!
//! Commands:
//! - `ask`     — Ask for assistance on one learning unit
//! - `serve`   — Start the development workflows gateway
//! - `status`  — Show resolved configuration and endpoint health
//! - `config`  — Show, locate, or validate the config file

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "lessonaid",
    about = "LessonAid — AI assistance for e-learning units",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the assistance service about a learning unit
    Ask(commands::ask::AskArgs),

    /// Start the development workflows gateway
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,

        /// Orchestrator to answer with ("mock" or "context")
        #[arg(short, long)]
        orchestrator: Option<String>,
    },

    /// Show resolved configuration
    Status,

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Validate the configuration
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask(args) => commands::ask::run(args).await?,
        Commands::Serve { port, orchestrator } => commands::serve::run(port, orchestrator).await?,
        Commands::Status => commands::status::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
        },
    }

    Ok(())
}
