mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::ticket::{self, TicketArgs};
use crate::config::{StoredConfig, TicketConfig, config_file_path};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;

#[derive(Parser)]
#[command(name = "tkt", author, version, about = "Start work on a new ticket")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    ticket: TicketArgs,

    /// Read settings from this file instead of ~/.config/tkt/tkt.conf.
    #[arg(long, global = true, env = "TKT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr (-v for steps, -vv for git commands).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => config_file_path()?,
    };

    match cli.command {
        Some(Commands::Config(args)) => config_cmd::run(args.command, &config_path),
        None => run_ticket(cli.ticket, &config_path).await,
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("TKT_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_ticket(args: TicketArgs, config_path: &Path) -> AppResult<()> {
    let stored = StoredConfig::load_from(config_path)?.merge(args.into());
    let home = dirs::home_dir();
    let config = TicketConfig::resolve(stored, config_path, home.as_deref())?;

    let git = Arc::new(GitCli::new());
    let context = AppContext::new(config, git);

    let outcome = ticket::run(&context).await?;

    if outcome.cloned {
        println!("cloned: {}", outcome.source_dir.display());
    }
    let action = if outcome.created_branch {
        "created"
    } else {
        "switched to"
    };
    println!(
        "{action} branch {} in {}",
        outcome.branch,
        outcome.source_dir.display()
    );
    println!("updated: {}", outcome.ticket_file.display());

    Ok(())
}
