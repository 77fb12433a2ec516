//! Log command: record a consumption.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use birrino_core::{Consumption, ConsumptionId, calculate_units, constants::DRINK_MAX_QUANTITY};
use birrino_db::Database;

use crate::cli::LogArgs;

pub fn run<W: Write>(writer: &mut W, db: &Database, args: &LogArgs, now: DateTime<Utc>) -> Result<()> {
    let drink = db
        .find_drink(&args.drink)?
        .with_context(|| format!("drink not found: {}", args.drink))?;

    if args.qty.is_nan() || args.qty <= 0.0 {
        bail!("quantity must be positive, got {}", args.qty);
    }
    let qty = args.qty.min(DRINK_MAX_QUANTITY);
    if qty < args.qty {
        writeln!(writer, "Quantity clamped to {DRINK_MAX_QUANTITY}")?;
    }

    let timestamp = match &args.at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("invalid timestamp: {raw}"))?
            .with_timezone(&Utc),
        None => now,
    };

    // Units are computed once here and stored; the drink's definition may
    // change later without rewriting history.
    let units = calculate_units(drink.volume_ml, drink.abv, qty);
    let record = Consumption {
        id: ConsumptionId::new(Uuid::new_v4().to_string())?,
        drink_id: drink.id.clone(),
        quantity: qty,
        units,
        timestamp,
    };
    db.insert_consumption(&record)?;

    writeln!(writer, "Logged {} x{qty}: {units:.2} units", drink.name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use insta::assert_snapshot;

    use crate::commands::drinks;

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        let mut sink = Vec::new();
        drinks::add(&mut sink, &db, "Birra media", "beer", 330.0, 5.0).unwrap();
        db
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn args(drink: &str, qty: f64, at: Option<&str>) -> LogArgs {
        LogArgs {
            drink: drink.to_string(),
            qty,
            at: at.map(str::to_string),
        }
    }

    #[test]
    fn log_stores_precomputed_units() {
        let db = setup();
        let mut output = Vec::new();
        run(&mut output, &db, &args("birra-media", 1.0, None), noon()).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @"Logged Birra media x1: 1.65 units");

        let latest = db.latest_consumption().unwrap().unwrap();
        assert!((latest.units - 1.65).abs() < f64::EPSILON);
        assert_eq!(latest.timestamp, noon());
    }

    #[test]
    fn log_clamps_quantity() {
        let db = setup();
        let mut output = Vec::new();
        run(&mut output, &db, &args("birra-media", 24.0, None), noon()).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Quantity clamped to 10"));
        assert!(output.contains("Logged Birra media x10: 16.50 units"));
    }

    #[test]
    fn log_with_explicit_timestamp() {
        let db = setup();
        let mut output = Vec::new();
        run(
            &mut output,
            &db,
            &args("birra-media", 2.0, Some("2024-01-14T21:00:00+01:00")),
            noon(),
        )
        .unwrap();

        let latest = db.latest_consumption().unwrap().unwrap();
        assert_eq!(
            latest.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 14, 20, 0, 0).unwrap()
        );
    }

    #[test]
    fn log_rejects_bad_input() {
        let db = setup();
        let mut output = Vec::new();
        assert!(run(&mut output, &db, &args("negroni", 1.0, None), noon()).is_err());
        assert!(run(&mut output, &db, &args("birra-media", 0.0, None), noon()).is_err());
        assert!(run(&mut output, &db, &args("birra-media", -2.0, None), noon()).is_err());
        assert!(
            run(&mut output, &db, &args("birra-media", 1.0, Some("yesterday")), noon()).is_err()
        );
    }
}
