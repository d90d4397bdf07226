mod error;
mod net;
mod tui;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use avalam_core::player::Player;
use avalam_core::session::Session;
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "avalam-cli", version, about = "Terminal client for networked Avalam games")]
struct Cli {
    /// WebSocket endpoint of the game controller
    #[arg(long, env = "AVALAM_SERVER_URL", default_value = "ws://localhost:8500/")]
    server: String,

    /// Log destination; the terminal itself stays quiet while the UI runs
    #[arg(long, value_name = "FILE", default_value = "avalam_cli.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    let server = Url::parse(&args.server).unwrap_or_else(|err| {
        eprintln!("Invalid server URL '{}': {err}", args.server);
        std::process::exit(1);
    });

    if let Err(err) = init_logging(&args.log_file) {
        eprintln!("Failed to open log file {}: {err}", args.log_file.display());
        std::process::exit(1);
    }
    info!(server = %server, "starting client");

    let session = tui::run(&server).await.unwrap_or_else(|err| {
        eprintln!("{err}");
        std::process::exit(1);
    });
    print_summary(&session);
}

/// Routes all tracing output to a file so it cannot corrupt the TUI.
fn init_logging(path: &Path) -> std::io::Result<()> {
    let log_file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Prints the final standing after the TUI has been torn down.
fn print_summary(session: &Session) {
    let status = session.status();
    if !status.primary.is_empty() {
        println!("{}", status.primary.bold());
    }
    if !status.secondary.is_empty() {
        println!("{}", status.secondary);
    }
    println!(
        "{} {}   {} {}",
        "Player 1:".green(),
        session.score(Player::One),
        "Player 2:".yellow(),
        session.score(Player::Two),
    );
}
