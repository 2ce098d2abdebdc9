//! scireport library root.
//! Exposes the form model, draft store, submission pipeline and the CLI
//! dispatcher used by main.rs.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod storage;
pub mod transport;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Set { .. } => cli::commands::set::handle(&cli.command, cfg),
        Commands::Row { .. } => cli::commands::row::handle(&cli.command, cfg),
        Commands::Figure { .. } => cli::commands::figure::handle(&cli.command, cfg),
        Commands::Show => cli::commands::show::handle(&cli.command, cfg),
        Commands::Draft { .. } => cli::commands::draft::handle(&cli.command, cfg),
        Commands::Duration { .. } => cli::commands::duration::handle(&cli.command),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Submit { .. } => cli::commands::submit::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load()?;

    // storage override from the command line
    if let Some(custom) = &cli.storage {
        cfg.storage_dir = Config::resolve_storage(custom)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
