//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, positive
//! daily rates, bounded price filters) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided daily rate is zero, negative or not a finite number.
    #[error("daily rate must be a positive amount, got {0}")]
    NonPositiveRate(f64),
    /// Provided price filter is outside of the supported range.
    #[error("maximum daily price must be within 0..=1000, got {0}")]
    PriceOutOfRange(u32),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(VehicleId, "Unique identifier for a rentable vehicle.");
id_newtype!(VehicleSpecId, "Unique identifier for a vehicle specification.");

/// Daily rental rate of a vehicle.
///
/// The backend stores rates as decimals and may serialize them either as a
/// JSON number or as a decimal string, so both are accepted on input.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, PartialOrd)]
pub struct DailyRate(f64);

impl DailyRate {
    /// Creates a rate ensuring it is a positive, finite amount.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveRate(value))
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for DailyRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for DailyRate {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for DailyRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        let value = match Repr::deserialize(deserializer)? {
            Repr::Number(value) => value,
            Repr::Text(text) => text.trim().parse::<f64>().map_err(de::Error::custom)?,
        };

        DailyRate::new(value).map_err(de::Error::custom)
    }
}

/// Upper bound on the daily rate used by the price filter.
///
/// The ceiling value means "no upper bound" and is not sent to the backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub struct MaxDailyPrice(u32);

impl MaxDailyPrice {
    /// Highest selectable price, displayed as "$1000+".
    pub const CEILING: u32 = 1000;

    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if value <= Self::CEILING {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::PriceOutOfRange(value))
        }
    }

    pub const fn ceiling() -> Self {
        Self(Self::CEILING)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns `true` when the filter does not constrain the price at all.
    pub const fn is_ceiling(self) -> bool {
        self.0 == Self::CEILING
    }
}

impl Default for MaxDailyPrice {
    fn default() -> Self {
        Self::ceiling()
    }
}

impl Display for MaxDailyPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for MaxDailyPrice {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MaxDailyPrice> for u32 {
    fn from(value: MaxDailyPrice) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_id_rejects_non_positive_values() {
        assert_eq!(VehicleId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(VehicleId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(VehicleId::new(7).map(VehicleId::get), Ok(7));
    }

    #[test]
    fn vehicle_id_deserialization_is_validated() {
        let id: VehicleId = serde_json::from_str("12").expect("valid id");
        assert_eq!(id.get(), 12);
        assert!(serde_json::from_str::<VehicleId>("0").is_err());
    }

    #[test]
    fn daily_rate_accepts_numbers_and_decimal_strings() {
        let from_number: DailyRate = serde_json::from_str("45").expect("number rate");
        let from_text: DailyRate = serde_json::from_str("\"49.99\"").expect("string rate");

        assert_eq!(from_number.get(), 45.0);
        assert_eq!(from_text.get(), 49.99);
    }

    #[test]
    fn daily_rate_rejects_non_positive_and_garbage() {
        assert!(DailyRate::new(0.0).is_err());
        assert!(DailyRate::new(f64::NAN).is_err());
        assert!(serde_json::from_str::<DailyRate>("-5").is_err());
        assert!(serde_json::from_str::<DailyRate>("\"cheap\"").is_err());
    }

    #[test]
    fn daily_rate_displays_two_decimals() {
        let rate = DailyRate::new(45.5).expect("valid rate");
        assert_eq!(rate.to_string(), "45.50");
    }

    #[test]
    fn max_daily_price_is_bounded() {
        assert!(MaxDailyPrice::new(0).is_ok());
        assert!(MaxDailyPrice::new(1000).is_ok());
        assert_eq!(
            MaxDailyPrice::new(1001),
            Err(TypeConstraintError::PriceOutOfRange(1001))
        );
        assert!(MaxDailyPrice::default().is_ceiling());
    }
}
