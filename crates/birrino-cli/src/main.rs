use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use birrino_cli::commands::{drinks, export, fav, init, log, stats, status, undo};
use birrino_cli::{Cli, Commands, Config, DrinksAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(birrino_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = birrino_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Init) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            init::run(&mut stdout, &db)?;
        }
        Some(Commands::Drinks { action }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            match action {
                DrinksAction::List { json } => {
                    drinks::list(&mut stdout, &db, config.recents_shown, *json)?;
                }
                DrinksAction::Add {
                    name,
                    kind,
                    volume_ml,
                    abv,
                } => drinks::add(&mut stdout, &db, name, kind, *volume_ml, *abv)?,
            }
        }
        Some(Commands::Fav { drink }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            fav::run(&mut stdout, &db, drink)?;
        }
        Some(Commands::Log(args)) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            log::run(&mut stdout, &db, args, Utc::now())?;
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut stdout, &db, config.lookback_days, Utc::now())?;
        }
        Some(Commands::Stats(args)) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            // Evening/day windows anchor to wall-clock times, so "now"
            // carries the host timezone.
            stats::run(&mut stdout, &db, args, &config, Local::now())?;
        }
        Some(Commands::Undo { id }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            undo::run(&mut stdout, &db, id.as_deref())?;
        }
        Some(Commands::Export(args)) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            match &args.output {
                Some(path) => {
                    let mut file = std::fs::File::create(path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    export::run(&mut file, &db, args.format, Utc::now())?;
                    file.flush()?;
                    writeln!(stdout, "Exported to {}", path.display())?;
                }
                None => export::run(&mut stdout, &db, args.format, Utc::now())?,
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
