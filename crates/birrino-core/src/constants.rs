//! Application-wide constants.

/// Weekly alcohol unit limit according to health guidelines.
///
/// Based on Italian National Health Service recommendations.
pub const WEEKLY_UNIT_LIMIT: f64 = 14.0;

/// Monthly alcohol unit estimate (approximately 14 × 4.3 weeks).
pub const MONTHLY_UNIT_ESTIMATE: f64 = 60.0;

/// Maximum minutes to display on the drive timer progress bar (4 hours).
pub const DRIVE_TIMER_MAX_DISPLAY_MINS: i64 = 240;

/// Standard alcohol elimination rate in units per hour.
///
/// This is a general estimate; individual rates vary.
pub const ELIMINATION_RATE_UNITS_PER_HOUR: f64 = 1.0;

/// Maximum quantity of drinks that can be logged at once.
pub const DRINK_MAX_QUANTITY: f64 = 10.0;
