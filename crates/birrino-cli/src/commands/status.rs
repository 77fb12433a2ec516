//! Status command: the drive timer.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

use birrino_core::{constants::DRIVE_TIMER_MAX_DISPLAY_MINS, mins_until_sober};
use birrino_db::Database;

use crate::commands::util::{format_mins, progress_bar};

/// `lookback_days` bounds how much history the timer loads. At 1 unit/hour
/// the default week of lookback covers any realistic backlog.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    lookback_days: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    let recent = db.consumptions_between(now - Duration::days(lookback_days), now)?;
    let mins = mins_until_sober(&recent, now);

    if mins == 0 {
        writeln!(writer, "You can drive now.")?;
        return Ok(());
    }

    #[allow(clippy::cast_precision_loss)]
    let bar = progress_bar(mins as f64, DRIVE_TIMER_MAX_DISPLAY_MINS as f64);
    writeln!(writer, "Time until you can drive: {}", format_mins(mins))?;
    writeln!(writer, "[{bar}] {mins} / {DRIVE_TIMER_MAX_DISPLAY_MINS} min")?;
    writeln!(writer, "Estimate based on 1 unit/hour.")?;
    Ok(())
}
