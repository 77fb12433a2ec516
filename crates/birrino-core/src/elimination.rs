//! Linear alcohol elimination model backing the drive timer.
//!
//! Each drink's remaining units decay independently at a constant rate
//! ([`ELIMINATION_RATE_UNITS_PER_HOUR`]) and contributions are summed.
//! This is deliberately NOT a saturating/Michaelis-Menten model: the
//! original tracker used linear superposition with ceiling rounding and
//! the countdown must match it exactly.
//!
//! Both functions are stateless. Callers refresh a displayed countdown by
//! recomputing against the current clock (once a minute in practice)
//! rather than decrementing a cached value, which avoids drift.

use chrono::{DateTime, Utc};

use crate::constants::ELIMINATION_RATE_UNITS_PER_HOUR;
use crate::consumption::ConsumedUnits;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Units still in the body at `now` for a single drink.
///
/// Decays linearly from `units` at drink time, floors at exactly 0 and is
/// never negative. A `now` earlier than `drank_at` yields a negative
/// elapsed time and therefore more than `units`; the accepted domain is
/// `now >= drank_at`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn remaining_units(units: f64, drank_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed_hours = (now - drank_at).num_milliseconds() as f64 / MS_PER_HOUR;
    (units - elapsed_hours * ELIMINATION_RATE_UNITS_PER_HOUR).max(0.0)
}

/// Minutes until all listed drinks are fully eliminated.
///
/// Returns 0 for an empty list. Otherwise sums each event's remaining
/// units at `now` and converts to whole minutes, rounding up.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn mins_until_sober<E: ConsumedUnits>(events: &[E], now: DateTime<Utc>) -> i64 {
    let total: f64 = events
        .iter()
        .map(|event| remaining_units(event.units(), event.timestamp(), now))
        .sum();
    (total * 60.0).ceil() as i64
}
