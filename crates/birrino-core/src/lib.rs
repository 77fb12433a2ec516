//! Core domain logic for the Birrino drink tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Unit calculation: converting a drink's volume and strength into alcohol units
//! - Elimination: estimating remaining units and the time until sober
//! - Periods: computing trailing reporting windows (evening, day, week, month, year)
//!
//! Everything here is pure: no clock reads, no I/O, no ambient timezone.
//! Callers inject "now" (and its timezone) explicitly.

pub mod constants;
pub mod consumption;
pub mod drink;
pub mod elimination;
pub mod period;
pub mod types;
pub mod units;

pub use consumption::{Consumption, ConsumedUnits};
pub use drink::{Drink, DrinkKind, UnknownDrinkKind};
pub use elimination::{mins_until_sober, remaining_units};
pub use period::{Period, TimeWindow, date_range, sum_units_in};
pub use types::{ConsumptionId, DrinkId, ValidationError};
pub use units::calculate_units;
