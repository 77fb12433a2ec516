//! Alcohol unit calculation.
//!
//! One unit is 10 ml (about 8 g) of pure ethanol. The formula below is the
//! simplified regulatory approximation used by the original tracker:
//! `(volume_ml × abv × qty) / 1000`. Stored unit values were produced with
//! exactly this constant, so a density-accurate variant must not be
//! substituted for it.

/// Calculates alcohol units from a serving volume, ABV percentage and count.
///
/// Any zero factor yields 0. The accepted domain is finite, non-negative
/// inputs; negative or NaN values are not rejected and flow through IEEE
/// arithmetic unchanged. Validation belongs to the catalog edge, not here.
#[must_use]
pub fn calculate_units(volume_ml: f64, abv: f64, qty: f64) -> f64 {
    (volume_ml * abv * qty) / 1000.0
}
