//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Personal alcohol-consumption tracker.
///
/// Logs drinks, shows rolling consumption statistics against health
/// guidelines and estimates the time until sober enough to drive.
#[derive(Debug, Parser)]
#[command(name = "birrino", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the database and seed the default drink catalog.
    Init,

    /// Manage the drink catalog.
    Drinks {
        #[command(subcommand)]
        action: DrinksAction,
    },

    /// Toggle a drink as favorite.
    Fav {
        /// Drink ID or name.
        drink: String,
    },

    /// Log a drink.
    Log(LogArgs),

    /// Show the drive timer (estimated minutes until sober).
    Status,

    /// Show consumption statistics per period.
    Stats(StatsArgs),

    /// Delete a consumption record (the most recent one by default).
    Undo {
        /// Consumption record ID.
        id: Option<String>,
    },

    /// Export the full consumption history.
    Export(ExportArgs),
}

/// Drink catalog actions.
#[derive(Debug, Subcommand)]
pub enum DrinksAction {
    /// List the catalog with favorites and recents marked.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add a drink to the catalog.
    Add {
        /// Display name (e.g., "Birra media").
        #[arg(long)]
        name: String,

        /// Category: beer, wine, spirit, cocktail or other.
        #[arg(long, default_value = "beer")]
        kind: String,

        /// Serving volume in milliliters.
        #[arg(long)]
        volume_ml: f64,

        /// Alcohol by volume percentage (e.g., 5 for 5%).
        #[arg(long)]
        abv: f64,
    },
}

/// Arguments for `birrino log`.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Drink ID or name.
    pub drink: String,

    /// Number of servings.
    #[arg(long, default_value_t = 1.0)]
    pub qty: f64,

    /// Timestamp of consumption (RFC 3339); defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}

/// Arguments for `birrino stats`.
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Single period to report (evening, day, week, month, year).
    /// Default: all periods.
    #[arg(long)]
    pub period: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `birrino export`.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Write to a file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Export output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}
