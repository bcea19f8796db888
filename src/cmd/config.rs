use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::StoredConfig;
use crate::domain::branch::BranchPattern;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration.
    Show,
}

pub fn run(command: ConfigCommand, path: &Path) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(path),
        ConfigCommand::Show => run_show(path),
    }
}

fn run_init(path: &Path) -> AppResult<()> {
    let mut cfg = StoredConfig::load_or_default(path)?;

    println!("Configuring tkt.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut ask = |field: &str, target: &mut Option<String>| {
        apply_prompt(&mut input, &mut stdout, field, target)
    };

    ask(
        "Directory repositories are cloned into",
        &mut cfg.local_repository_parent_dir,
    )?;
    ask(
        "Branch name regex (one capture group)",
        &mut cfg.branch_name_regex,
    )?;
    ask("Org file for ticket entries", &mut cfg.ticket_file_path)?;
    ask("Default remote repository URL", &mut cfg.remote_repository_url)?;
    ask("Main branch name", &mut cfg.main_branch_name)?;

    if let Some(regex) = &cfg.branch_name_regex {
        BranchPattern::new(regex)?;
    }

    cfg.save_to(path)?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show(path: &Path) -> AppResult<()> {
    let cfg = StoredConfig::load_from(path)?;

    println!("Configuration file: {}", path.display());
    for (key, value) in cfg.entries() {
        println!("{key}: {}", display_value(value));
    }
    Ok(())
}

fn apply_prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    field: &str,
    target: &mut Option<String>,
) -> AppResult<()> {
    match prompt(input, output, field, target.as_deref())? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    field: &str,
    current: Option<&str>,
) -> AppResult<PromptAction> {
    match current {
        Some(value) => write!(output, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(output, "{field} (Enter to skip): ")?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn display_value(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("<not set>")
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
