//! Undo command: remove a consumption record.

use std::io::Write;

use anyhow::{Context, Result, bail};

use birrino_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database, id: Option<&str>) -> Result<()> {
    let target = match id {
        Some(id) => id.to_string(),
        None => db
            .latest_consumption()?
            .context("no consumptions to undo")?
            .id
            .to_string(),
    };

    if db.delete_consumption(&target)? {
        writeln!(writer, "Removed consumption {target}")?;
        Ok(())
    } else {
        bail!("consumption not found: {target}");
    }
}
