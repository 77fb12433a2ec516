//! Drink catalog entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{DrinkId, ValidationError};

/// Broad category for a drink, used for grouping in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrinkKind {
    Beer,
    Wine,
    Spirit,
    Cocktail,
    Other,
}

impl fmt::Display for DrinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beer => "beer",
            Self::Wine => "wine",
            Self::Spirit => "spirit",
            Self::Cocktail => "cocktail",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl FromStr for DrinkKind {
    type Err = UnknownDrinkKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beer" => Ok(Self::Beer),
            "wine" => Ok(Self::Wine),
            "spirit" | "liquor" => Ok(Self::Spirit),
            "cocktail" => Ok(Self::Cocktail),
            "other" => Ok(Self::Other),
            _ => Err(UnknownDrinkKind(s.to_string())),
        }
    }
}

impl Serialize for DrinkKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DrinkKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown drink kind strings.
#[derive(Debug, Clone)]
pub struct UnknownDrinkKind(String);

impl fmt::Display for UnknownDrinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown drink kind: {}", self.0)
    }
}

impl std::error::Error for UnknownDrinkKind {}

/// The static profile of a beverage type.
///
/// `volume_ml` and `abv` define the serving; the unit count for a logged
/// consumption is computed from them once at logging time and stored, so
/// editing a drink's definition never rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drink {
    /// Unique identifier for this drink.
    pub id: DrinkId,
    /// Display name (e.g., "Birra media").
    pub name: String,
    /// Category for grouping.
    pub kind: DrinkKind,
    /// Serving volume in milliliters.
    pub volume_ml: f64,
    /// Alcohol by volume, as a percentage (e.g., 5.0 for 5%).
    pub abv: f64,
}

impl Drink {
    /// Creates a drink after validating its serving profile.
    ///
    /// `volume_ml` must be positive and `abv` must be in `[0, 100)`.
    /// An ABV of 0 is legal: it describes a non-alcoholic drink that
    /// yields zero units.
    pub fn new(
        id: DrinkId,
        name: impl Into<String>,
        kind: DrinkKind,
        volume_ml: f64,
        abv: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "drink name" });
        }
        if volume_ml.is_nan() || volume_ml <= 0.0 {
            return Err(ValidationError::NonPositiveVolume { value: volume_ml });
        }
        if !(0.0..100.0).contains(&abv) {
            return Err(ValidationError::AbvOutOfRange { value: abv });
        }
        Ok(Self {
            id,
            name,
            kind,
            volume_ml,
            abv,
        })
    }
}
