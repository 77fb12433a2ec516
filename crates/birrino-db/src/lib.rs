//! Storage layer for the Birrino drink tracker.
//!
//! Provides persistence for the drink catalog and consumption log using
//! `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but
//! not `Sync`. A `Database` instance can be moved between threads but cannot
//! be shared across threads without external synchronization.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in ISO 8601 UTC with millisecond precision
//! (e.g., `2024-01-15T10:30:00.000Z`). The fixed width ensures lexicographic
//! ordering matches chronological ordering, so range filters can compare
//! strings directly.
//!
//! ## Stored Units
//!
//! The `units` column on `consumption` is written once at logging time and
//! never recomputed from the drink's current definition. Editing a drink
//! must not rewrite history; any code path that re-derives units from a
//! joined drink row is a bug.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use thiserror::Error;

use birrino_core::{Consumption, ConsumptionId, Drink, DrinkId};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp for record {record_id}: {timestamp}")]
    TimestampParse {
        record_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored row failed domain validation.
    #[error("invalid row {record_id}: {message}")]
    InvalidRow { record_id: String, message: String },
}

/// A consumption row joined with its drink's name, for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionExport {
    pub id: String,
    pub drink_id: String,
    pub drink_name: String,
    pub quantity: f64,
    pub units: f64,
    pub timestamp: DateTime<Utc>,
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS drinks (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                volume_ml REAL NOT NULL,
                abv REAL NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_drinks_name ON drinks(name);

            -- Consumption log: units are precomputed at logging time and
            -- immutable from then on.
            CREATE TABLE IF NOT EXISTS consumption (
                id TEXT PRIMARY KEY,
                drink_id TEXT NOT NULL,
                quantity REAL NOT NULL,
                units REAL NOT NULL,
                timestamp TEXT NOT NULL,
                FOREIGN KEY (drink_id) REFERENCES drinks(id)
            );

            CREATE INDEX IF NOT EXISTS idx_consumption_timestamp ON consumption(timestamp);
            CREATE INDEX IF NOT EXISTS idx_consumption_drink ON consumption(drink_id);

            CREATE TABLE IF NOT EXISTS favorites (
                drink_id TEXT PRIMARY KEY,
                FOREIGN KEY (drink_id) REFERENCES drinks(id) ON DELETE CASCADE
            );
            ",
        )?;
        Ok(())
    }

    // ========== Drinks ==========

    /// Inserts a drink into the catalog.
    pub fn insert_drink(&self, drink: &Drink) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO drinks (id, name, kind, volume_ml, abv) VALUES (?, ?, ?, ?, ?)",
            params![
                drink.id.as_str(),
                drink.name,
                drink.kind.to_string(),
                drink.volume_ml,
                drink.abv,
            ],
        )?;
        tracing::debug!(id = %drink.id, name = %drink.name, "drink added to catalog");
        Ok(())
    }

    /// Returns the full drink catalog, ordered by name.
    pub fn list_drinks(&self) -> Result<Vec<Drink>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, kind, volume_ml, abv FROM drinks ORDER BY name COLLATE NOCASE",
        )?;
        let rows = stmt.query_map([], row_to_drink_parts)?;
        rows.map(|row| drink_from_parts(row?)).collect()
    }

    /// Finds a drink by exact ID or case-insensitive name.
    pub fn find_drink(&self, id_or_name: &str) -> Result<Option<Drink>, DbError> {
        let parts = self
            .conn
            .query_row(
                "SELECT id, name, kind, volume_ml, abv FROM drinks
                 WHERE id = ?1 OR name = ?1 COLLATE NOCASE
                 LIMIT 1",
                params![id_or_name],
                row_to_drink_parts,
            )
            .optional()?;
        parts.map(drink_from_parts).transpose()
    }

    /// Number of drinks in the catalog.
    pub fn count_drinks(&self) -> Result<i64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM drinks", [], |row| row.get(0))?;
        Ok(count)
    }

    // ========== Consumption ==========

    /// Appends a consumption record.
    pub fn insert_consumption(&self, record: &Consumption) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO consumption (id, drink_id, quantity, units, timestamp)
             VALUES (?, ?, ?, ?, ?)",
            params![
                record.id.as_str(),
                record.drink_id.as_str(),
                record.quantity,
                record.units,
                fmt_timestamp(record.timestamp),
            ],
        )?;
        tracing::debug!(id = %record.id, units = record.units, "consumption logged");
        Ok(())
    }

    /// Returns consumption records with `start <= timestamp <= end`,
    /// inclusive on both ends, ordered ascending.
    pub fn consumptions_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Consumption>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, drink_id, quantity, units, timestamp FROM consumption
             WHERE timestamp >= ?1 AND timestamp <= ?2
             ORDER BY timestamp ASC",
        )?;
        let rows = stmt.query_map(
            params![fmt_timestamp(start), fmt_timestamp(end)],
            row_to_consumption_parts,
        )?;
        rows.map(|row| consumption_from_parts(row?)).collect()
    }

    /// Returns the most recent consumption record, if any.
    pub fn latest_consumption(&self) -> Result<Option<Consumption>, DbError> {
        let parts = self
            .conn
            .query_row(
                "SELECT id, drink_id, quantity, units, timestamp FROM consumption
                 ORDER BY timestamp DESC, id DESC LIMIT 1",
                [],
                row_to_consumption_parts,
            )
            .optional()?;
        parts.map(consumption_from_parts).transpose()
    }

    /// Deletes a consumption record by ID. Returns whether a row was removed.
    pub fn delete_consumption(&self, id: &str) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM consumption WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    /// Returns the full consumption history joined with drink names,
    /// newest first.
    pub fn export_consumptions(&self) -> Result<Vec<ConsumptionExport>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.drink_id, d.name, c.quantity, c.units, c.timestamp
             FROM consumption c
             LEFT JOIN drinks d ON d.id = c.drink_id
             ORDER BY c.timestamp DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        rows.map(|row| {
            let (id, drink_id, drink_name, quantity, units, timestamp) = row?;
            let timestamp = parse_timestamp(&id, &timestamp)?;
            Ok(ConsumptionExport {
                id,
                drink_id,
                drink_name: drink_name.unwrap_or_else(|| "Unknown".to_string()),
                quantity,
                units,
                timestamp,
            })
        })
        .collect()
    }

    // ========== Favorites and recents ==========

    /// Toggles a drink's favorite flag. Returns whether it is now a favorite.
    pub fn toggle_favorite(&self, drink_id: &str) -> Result<bool, DbError> {
        let removed = self
            .conn
            .execute("DELETE FROM favorites WHERE drink_id = ?", params![drink_id])?;
        if removed > 0 {
            return Ok(false);
        }
        self.conn.execute(
            "INSERT INTO favorites (drink_id) VALUES (?)",
            params![drink_id],
        )?;
        Ok(true)
    }

    /// Returns favorite drink IDs.
    pub fn favorite_ids(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self.conn.prepare("SELECT drink_id FROM favorites")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<_, _>>().map_err(DbError::from)
    }

    /// Returns distinct drink IDs ordered by most recent consumption.
    pub fn recent_drink_ids(&self, limit: u32) -> Result<Vec<String>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT drink_id, MAX(timestamp) AS last_drunk FROM consumption
             GROUP BY drink_id ORDER BY last_drunk DESC LIMIT ?",
        )?;
        let rows = stmt.query_map(params![limit], |row| row.get(0))?;
        rows.collect::<Result<_, _>>().map_err(DbError::from)
    }
}

fn fmt_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(record_id: &str, raw: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            record_id: record_id.to_string(),
            timestamp: raw.to_string(),
            source,
        })
}

type DrinkParts = (String, String, String, f64, f64);
type ConsumptionParts = (String, String, f64, f64, String);

fn row_to_drink_parts(row: &rusqlite::Row<'_>) -> rusqlite::Result<DrinkParts> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn drink_from_parts((id, name, kind, volume_ml, abv): DrinkParts) -> Result<Drink, DbError> {
    let kind = kind.parse().map_err(|err| DbError::InvalidRow {
        record_id: id.clone(),
        message: format!("{err}"),
    })?;
    let drink_id = DrinkId::new(id.clone()).map_err(|err| DbError::InvalidRow {
        record_id: id.clone(),
        message: err.to_string(),
    })?;
    Drink::new(drink_id, name, kind, volume_ml, abv).map_err(|err| DbError::InvalidRow {
        record_id: id,
        message: err.to_string(),
    })
}

fn row_to_consumption_parts(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConsumptionParts> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn consumption_from_parts(
    (id, drink_id, quantity, units, timestamp): ConsumptionParts,
) -> Result<Consumption, DbError> {
    let parsed_ts = parse_timestamp(&id, &timestamp)?;
    let record_id = ConsumptionId::new(id.clone()).map_err(|err| DbError::InvalidRow {
        record_id: id.clone(),
        message: err.to_string(),
    })?;
    let drink_id = DrinkId::new(drink_id).map_err(|err| DbError::InvalidRow {
        record_id: id,
        message: err.to_string(),
    })?;
    Ok(Consumption {
        id: record_id,
        drink_id,
        quantity,
        units,
        timestamp: parsed_ts,
    })
}
