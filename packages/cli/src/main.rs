mod commands;
mod config;
mod display;
mod logging;
mod output;
mod repl;
mod session;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, init, render, EditArgs, InitArgs, RenderArgs};
use config::{Config, SERVER_URL_ENV};
use std::path::Path;

/// wiredit - edit wiring diagrams with a live rendered preview
#[derive(Parser, Debug)]
#[command(name = "wiredit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Diagram server URL (overrides config and WIREDIT_SERVER_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a diagram from the built-in template
    Init(InitArgs),

    /// Render a diagram once and print its bill of materials
    Render(RenderArgs),

    /// Edit a diagram interactively with a live preview
    Edit(EditArgs),
}

fn load_config(cwd: &Path, server: Option<String>) -> anyhow::Result<Config> {
    let config = Config::load(cwd)?.with_server_override(std::env::var(SERVER_URL_ENV).ok(), server);
    tracing::debug!(server = %config.server_url, "configuration loaded");
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Render(args) => render(args, &load_config(&cwd, cli.server)?, &cwd).await,
        Command::Edit(args) => edit(args, &load_config(&cwd, cli.server)?, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
