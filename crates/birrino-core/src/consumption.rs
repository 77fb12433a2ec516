//! Logged drinking events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ConsumptionId, DrinkId};

/// An immutable record of a logged drink.
///
/// `units` is computed once via [`crate::calculate_units`] when the event is
/// logged and stored redundantly. Aggregation and the sober timer only ever
/// read this stored value; they never recompute it from the drink, so past
/// records stay stable when a drink's definition changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumption {
    /// Unique identifier for this record.
    pub id: ConsumptionId,
    /// The drink that was consumed.
    pub drink_id: DrinkId,
    /// Number of servings.
    pub quantity: f64,
    /// Alcohol units at logging time.
    pub units: f64,
    /// When the drink was consumed.
    pub timestamp: DateTime<Utc>,
}

/// A source of consumed alcohol units at a point in time.
///
/// This trait lets the elimination model and window summation work with
/// different record representations (core [`Consumption`], database rows,
/// test fixtures) without copying into an intermediate type.
pub trait ConsumedUnits {
    /// Stored alcohol units for this event.
    fn units(&self) -> f64;

    /// When the event occurred.
    fn timestamp(&self) -> DateTime<Utc>;
}

impl ConsumedUnits for Consumption {
    fn units(&self) -> f64 {
        self.units
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl ConsumedUnits for (f64, DateTime<Utc>) {
    fn units(&self) -> f64 {
        self.0
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumption_serde_roundtrip() {
        let record = Consumption {
            id: ConsumptionId::new("c-1").unwrap(),
            drink_id: DrinkId::new("peroni").unwrap(),
            quantity: 2.0,
            units: 3.3,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: Consumption = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.drink_id, record.drink_id);
        assert!((parsed.units - record.units).abs() < f64::EPSILON);
    }

    #[test]
    fn consumption_rejects_empty_ids() {
        let json = r#"{
            "id": "",
            "drink_id": "peroni",
            "quantity": 1.0,
            "units": 1.65,
            "timestamp": "2024-01-01T00:00:00Z"
        }"#;
        let result: Result<Consumption, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
