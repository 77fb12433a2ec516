//! Init command: seed the default drink catalog.

use std::io::Write;

use anyhow::Result;

use birrino_core::{Drink, DrinkId, DrinkKind};
use birrino_db::Database;

/// Starter catalog of common Italian bar servings.
const DEFAULT_CATALOG: &[(&str, &str, DrinkKind, f64, f64)] = &[
    ("birra-piccola", "Birra piccola", DrinkKind::Beer, 200.0, 5.0),
    ("birra-media", "Birra media", DrinkKind::Beer, 330.0, 5.0),
    ("birra-grande", "Birra grande", DrinkKind::Beer, 500.0, 5.0),
    ("calice-di-vino", "Calice di vino", DrinkKind::Wine, 125.0, 12.0),
    ("spritz", "Spritz", DrinkKind::Cocktail, 200.0, 8.0),
    ("gin-tonic", "Gin tonic", DrinkKind::Cocktail, 200.0, 10.0),
    ("amaro", "Amaro", DrinkKind::Spirit, 40.0, 30.0),
    ("grappa", "Grappa", DrinkKind::Spirit, 40.0, 40.0),
    ("analcolico", "Analcolico", DrinkKind::Other, 330.0, 0.0),
];

pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    if db.count_drinks()? > 0 {
        writeln!(writer, "Catalog already has drinks, nothing to seed.")?;
        return Ok(());
    }

    for (id, name, kind, volume_ml, abv) in DEFAULT_CATALOG {
        let drink = Drink::new(DrinkId::new(*id)?, *name, *kind, *volume_ml, *abv)?;
        db.insert_drink(&drink)?;
    }

    writeln!(writer, "Seeded {} drinks.", DEFAULT_CATALOG.len())?;
    Ok(())
}
