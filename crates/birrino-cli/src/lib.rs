//! Library surface of the Birrino CLI, exposed for integration tests.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands, DrinksAction, ExportFormat};
pub use config::Config;
