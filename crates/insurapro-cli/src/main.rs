mod commands;
mod error;
mod prompt;
mod render;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{backup, completions, customers, interactions, menu, Context};
use crate::error::{exit_code_for, report_error};
use insurapro_config as config;
use insurapro_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(
    name = "insurapro",
    version,
    about = "InsuraPro Solutions customer manager"
)]
struct Cli {
    /// CSV file holding the customers (default: ./customers.csv)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive menu (the default)
    Menu,
    Add(customers::AddArgs),
    List,
    Search(customers::SearchArgs),
    Edit(customers::EditArgs),
    Delete(customers::DeleteArgs),
    #[command(name = "add-interaction")]
    AddInteraction(interactions::AddInteractionArgs),
    Interactions(interactions::InteractionsArgs),
    Backup(backup::BackupArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        data_file,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let command = command.unwrap_or(Command::Menu);
    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let data_path = paths::resolve_data_path(data_file, app_config.data_file.clone())
        .with_context(|| "resolve data file path")?;
    debug!(path = %data_path.display(), "data file resolved");

    let mut store = Store::open(&data_path)
        .with_context(|| format!("load customers from {}", data_path.display()))?;

    let mut ctx = Context {
        store: &mut store,
        json,
        config: &app_config,
    };

    match command {
        Command::Menu => menu::run_menu(&mut ctx),
        Command::Add(args) => customers::add_customer(&mut ctx, args),
        Command::List => customers::list_customers(&mut ctx),
        Command::Search(args) => customers::search_customers(&mut ctx, args),
        Command::Edit(args) => customers::edit_customer(&mut ctx, args),
        Command::Delete(args) => customers::delete_customer(&mut ctx, args),
        Command::AddInteraction(args) => interactions::add_interaction(&mut ctx, args),
        Command::Interactions(args) => interactions::list_interactions(&mut ctx, args),
        Command::Backup(args) => backup::backup(&mut ctx, args),
        Command::Completions(_) => {
            unreachable!("completions command handled before loading customers")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
