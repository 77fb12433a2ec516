//! Configuration for the CLI.
//!
//! Settings merge from four sources, later ones winning: built-in
//! defaults, `config.toml` in the user config directory, an explicit
//! `--config` file, and `BIRRINO_*` environment variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use birrino_core::constants::{MONTHLY_UNIT_ESTIMATE, WEEKLY_UNIT_LIMIT};

/// Tunable settings. Every field has a default, so a config file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the SQLite database lives.
    pub database_path: PathBuf,
    /// Weekly unit threshold for the stats bar and warning.
    pub weekly_limit: f64,
    /// Monthly unit estimate for the stats bar and warning.
    pub monthly_estimate: f64,
    /// How many recently logged drinks are marked in the catalog listing.
    pub recents_shown: u32,
    /// Days of history the drive timer loads.
    pub lookback_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = default_data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("birrino.db"),
            weekly_limit: WEEKLY_UNIT_LIMIT,
            monthly_estimate: MONTHLY_UNIT_ESTIMATE,
            recents_shown: 5,
            lookback_days: 7,
        }
    }
}

impl Config {
    /// Resolves the effective configuration, optionally merging an
    /// explicit config file on top of the user-level one.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(file: Option<&Path>) -> Result<Self, figment::Error> {
        let mut sources = Figment::from(Serialized::defaults(Self::default()));
        if let Some(dir) = user_config_dir() {
            sources = sources.merge(Toml::file(dir.join("config.toml")));
        }
        if let Some(path) = file {
            sources = sources.merge(Toml::file(path));
        }
        sources.merge(Env::prefixed("BIRRINO_")).extract()
    }
}

fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("birrino"))
}

/// Per-user data directory (`~/.local/share/birrino` on Linux).
fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("birrino"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_user_data_dir() {
        let config = Config::default();
        assert!(config.database_path.ends_with("birrino/birrino.db"));
        assert!((config.weekly_limit - 14.0).abs() < f64::EPSILON);
        assert!((config.monthly_estimate - 60.0).abs() < f64::EPSILON);
        assert_eq!(config.recents_shown, 5);
        assert_eq!(config.lookback_days, 7);
    }

    #[test]
    fn file_and_env_overrides_win() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "birrino.toml",
                r#"
                weekly_limit = 10.0
                database_path = "custom.db"
                "#,
            )?;
            jail.set_env("BIRRINO_RECENTS_SHOWN", "2");

            let config = Config::load_from(Some(Path::new("birrino.toml")))?;
            assert!((config.weekly_limit - 10.0).abs() < f64::EPSILON);
            assert_eq!(config.database_path, PathBuf::from("custom.db"));
            assert_eq!(config.recents_shown, 2);
            // Untouched keys keep their defaults
            assert_eq!(config.lookback_days, 7);
            Ok(())
        });
    }
}
