//! Drink catalog commands: list and add.

use std::io::Write;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use birrino_core::{Drink, DrinkId, DrinkKind, calculate_units};
use birrino_db::Database;

/// A catalog row decorated with computed units and usage flags.
#[derive(Debug, Serialize)]
struct CatalogRow {
    id: String,
    name: String,
    kind: DrinkKind,
    volume_ml: f64,
    abv: f64,
    /// Units for a single serving, from the standard formula.
    units: f64,
    favorite: bool,
    recent: bool,
}

pub fn list<W: Write>(writer: &mut W, db: &Database, recents_shown: u32, json: bool) -> Result<()> {
    let drinks = db.list_drinks()?;
    let favorites = db.favorite_ids()?;
    let recents = db.recent_drink_ids(recents_shown)?;

    let rows: Vec<CatalogRow> = drinks
        .into_iter()
        .map(|drink| CatalogRow {
            favorite: favorites.iter().any(|id| id == drink.id.as_str()),
            recent: recents.iter().any(|id| id == drink.id.as_str()),
            units: calculate_units(drink.volume_ml, drink.abv, 1.0),
            id: drink.id.to_string(),
            name: drink.name,
            kind: drink.kind,
            volume_ml: drink.volume_ml,
            abv: drink.abv,
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *writer, &rows)?;
        writeln!(writer)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(writer, "No drinks in the catalog. Run `birrino init` to seed it.")?;
        return Ok(());
    }

    for row in rows {
        // Favorite takes precedence over the recency dot in the marker column
        let star = if row.favorite {
            "★"
        } else if row.recent {
            "·"
        } else {
            " "
        };
        let kind = row.kind.to_string();
        writeln!(
            writer,
            "{star} {:<18} {kind:<9} {:>5} ml {:>5.1}% {:>6.2} u  ({})",
            row.name, row.volume_ml, row.abv, row.units, row.id
        )?;
    }
    Ok(())
}

pub fn add<W: Write>(
    writer: &mut W,
    db: &Database,
    name: &str,
    kind: &str,
    volume_ml: f64,
    abv: f64,
) -> Result<()> {
    let kind: DrinkKind = kind
        .parse()
        .with_context(|| format!("invalid drink kind: {kind}"))?;

    let id = slugify(name);
    if id.is_empty() {
        bail!("drink name must contain at least one alphanumeric character");
    }
    if db.find_drink(&id)?.is_some() {
        bail!("drink already exists: {id}");
    }

    let drink = Drink::new(DrinkId::new(id)?, name, kind, volume_ml, abv)?;
    db.insert_drink(&drink)?;

    let units = calculate_units(drink.volume_ml, drink.abv, 1.0);
    writeln!(
        writer,
        "Added {} ({}): {units:.2} units per serving",
        drink.name, drink.id
    )?;
    Ok(())
}

/// Lowercase, alphanumeric-and-dash drink ID derived from the display name.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn slugify_names() {
        assert_eq!(slugify("Birra media"), "birra-media");
        assert_eq!(slugify("  Gin & Tonic  "), "gin-tonic");
        assert_eq!(slugify("Négroni"), "négroni");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn add_then_list() {
        let db = Database::open_in_memory().unwrap();

        let mut output = Vec::new();
        add(&mut output, &db, "Birra media", "beer", 330.0, 5.0).unwrap();
        assert_snapshot!(
            String::from_utf8(output).unwrap(),
            @"Added Birra media (birra-media): 1.65 units per serving"
        );

        db.toggle_favorite("birra-media").unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, 5, false).unwrap();
        let listing = String::from_utf8(output).unwrap();
        assert!(listing.contains("★ Birra media"));
        assert!(listing.contains("330 ml"));
    }

    #[test]
    fn add_rejects_duplicates_and_bad_input() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        add(&mut output, &db, "Spritz", "cocktail", 200.0, 8.0).unwrap();
        assert!(add(&mut output, &db, "Spritz", "cocktail", 200.0, 8.0).is_err());
        assert!(add(&mut output, &db, "Succo", "juice", 200.0, 0.0).is_err());
        assert!(add(&mut output, &db, "Vuoto", "beer", 0.0, 5.0).is_err());
        assert!(add(&mut output, &db, "Puro", "spirit", 40.0, 120.0).is_err());
    }

    #[test]
    fn recently_logged_drinks_get_a_dot() {
        use birrino_core::{Consumption, ConsumptionId};
        use chrono::Utc;

        let db = Database::open_in_memory().unwrap();
        let mut sink = Vec::new();
        add(&mut sink, &db, "Birra media", "beer", 330.0, 5.0).unwrap();
        add(&mut sink, &db, "Spritz", "cocktail", 200.0, 8.0).unwrap();

        db.insert_consumption(&Consumption {
            id: ConsumptionId::new("c-1").unwrap(),
            drink_id: DrinkId::new("spritz").unwrap(),
            quantity: 1.0,
            units: 1.6,
            timestamp: Utc::now(),
        })
        .unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, 5, false).unwrap();
        let listing = String::from_utf8(output).unwrap();
        assert!(listing.contains("· Spritz"));
        assert!(!listing.contains("· Birra media"));
    }

    #[test]
    fn list_json_includes_units_and_favorite() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        add(&mut output, &db, "Calice di vino", "wine", 175.0, 12.0).unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, 5, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert!((parsed[0]["units"].as_f64().unwrap() - 2.1).abs() < 1e-9);
        assert_eq!(parsed[0]["favorite"], serde_json::Value::Bool(false));
        assert_eq!(parsed[0]["kind"], "wine");
    }
}
