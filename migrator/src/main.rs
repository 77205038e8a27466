//! Interactive gate for the trading bot layout migration.
//!
//! Checks that the current directory is the bot project, asks for consent,
//! runs `migration_patch.py`, and reports what to do next. Takes no flags;
//! defaults can be overridden with `migrator.toml` in the project root.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use migrator::exit_codes;
use migrator::io::config::{CONFIG_FILE, load_config};
use migrator::io::process::SystemLauncher;
use migrator::io::prompt::{LinePrompter, unbuffered_stdin};
use migrator::logging;
use migrator::orchestrator::run_migration;

#[derive(Parser)]
#[command(
    name = "migrator",
    version,
    about = "Apply the project layout migration after explicit confirmation"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    logging::init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

fn run() -> Result<i32> {
    let root = std::env::current_dir().context("resolve working directory")?;
    let config = load_config(&root.join(CONFIG_FILE))?;
    debug!(root = %root.display(), ?config, "config loaded");

    let mut prompter = LinePrompter::new(unbuffered_stdin()?, io::stdout());
    let mut out = io::stdout();
    let outcome = run_migration(
        &root,
        &config,
        &mut prompter,
        &SystemLauncher,
        &mut out,
    )?;
    debug!(?outcome, "migration gate finished");
    Ok(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_without_arguments() {
        assert!(Cli::try_parse_from(["migrator"]).is_ok());
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert!(Cli::try_parse_from(["migrator", "--force"]).is_err());
    }
}
