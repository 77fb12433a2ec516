//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The serving volume was zero or negative.
    #[error("volume must be positive, got {value} ml")]
    NonPositiveVolume { value: f64 },

    /// The ABV percentage was out of range.
    #[error("abv must be in [0, 100), got {value}")]
    AbvOutOfRange { value: f64 },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated drink identifier.
    ///
    /// Drink IDs must be non-empty strings. Uniqueness is enforced at the
    /// database level.
    DrinkId, "drink ID"
);

define_string_id!(
    /// A validated consumption record identifier.
    ConsumptionId, "consumption ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drink_id_rejects_empty() {
        assert!(DrinkId::new("").is_err());
        assert!(DrinkId::new("peroni-33").is_ok());
    }

    #[test]
    fn consumption_id_rejects_empty() {
        assert!(ConsumptionId::new("").is_err());
        assert!(ConsumptionId::new("c-1").is_ok());
    }

    #[test]
    fn drink_id_serde_roundtrip() {
        let id = DrinkId::new("negroni").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"negroni\"");
        let parsed: DrinkId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn drink_id_serde_rejects_empty() {
        let result: Result<DrinkId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn drink_id_as_ref() {
        let id = DrinkId::new("spritz").unwrap();
        let s: &str = id.as_ref();
        assert_eq!(s, "spritz");
    }
}
