use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod display;
mod menu;
mod notify;

#[derive(Parser)]
#[command(name = "pomotick", version, about = "Pomodoro timer for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive timer session
    Run(commands::run::RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never tear the status line or the JSON stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
