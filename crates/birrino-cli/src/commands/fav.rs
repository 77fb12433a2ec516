//! Fav command: toggle a drink's favorite flag.

use std::io::Write;

use anyhow::{Context, Result};

use birrino_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database, drink: &str) -> Result<()> {
    let drink = db
        .find_drink(drink)?
        .with_context(|| format!("drink not found: {drink}"))?;

    if db.toggle_favorite(drink.id.as_str())? {
        writeln!(writer, "★ {} added to favorites", drink.name)?;
    } else {
        writeln!(writer, "{} removed from favorites", drink.name)?;
    }
    Ok(())
}
