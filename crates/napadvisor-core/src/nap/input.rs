//! Nap input record and the policies that admit raw values into it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ValidationError;

/// Accepted hours of the day.
pub const HOUR_RANGE: RangeInclusive<i64> = 0..=23;
/// Accepted tiredness ratings.
pub const TIREDNESS_RANGE: RangeInclusive<i64> = 1..=10;
/// Accepted ages in years.
pub const AGE_RANGE: RangeInclusive<i64> = 0..=120;

/// The three values a recommendation is computed from.
///
/// Fields are private: a `NapInput` can only be built through [`NapInput::new`]
/// or [`NapInput::clamped`], so every instance is inside the rule tables' domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NapInput {
    current_hour: u8,
    tiredness_level: u8,
    age: u32,
}

impl NapInput {
    /// Build an input, rejecting any value outside its range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] for the first field found out of range.
    pub fn new(current_hour: i64, tiredness_level: i64, age: i64) -> Result<Self, ValidationError> {
        check("current_hour", current_hour, &HOUR_RANGE)?;
        check("tiredness_level", tiredness_level, &TIREDNESS_RANGE)?;
        check("age", age, &AGE_RANGE)?;
        Ok(Self::from_checked(current_hour, tiredness_level, age))
    }

    /// Build an input, saturating each value into its range.
    pub fn clamped(current_hour: i64, tiredness_level: i64, age: i64) -> Self {
        let current_hour = clamp("current_hour", current_hour, &HOUR_RANGE);
        let tiredness_level = clamp("tiredness_level", tiredness_level, &TIREDNESS_RANGE);
        let age = clamp("age", age, &AGE_RANGE);
        Self::from_checked(current_hour, tiredness_level, age)
    }

    fn from_checked(current_hour: i64, tiredness_level: i64, age: i64) -> Self {
        Self {
            current_hour: current_hour as u8,
            tiredness_level: tiredness_level as u8,
            age: age as u32,
        }
    }

    pub fn current_hour(&self) -> u8 {
        self.current_hour
    }

    pub fn tiredness_level(&self) -> u8 {
        self.tiredness_level
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}

fn check(
    field: &'static str,
    value: i64,
    range: &RangeInclusive<i64>,
) -> Result<(), ValidationError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn clamp(field: &'static str, value: i64, range: &RangeInclusive<i64>) -> i64 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        tracing::warn!(field, value, clamped, "input out of range, clamping");
    }
    clamped
}

/// How out-of-range raw values are treated when building a [`NapInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Reject with a validation error.
    #[default]
    Strict,
    /// Saturate into range and log a warning.
    Clamp,
}

impl InputPolicy {
    /// Admit raw values under this policy.
    ///
    /// # Errors
    ///
    /// Only [`InputPolicy::Strict`] can fail, see [`NapInput::new`].
    pub fn admit(
        self,
        current_hour: i64,
        tiredness_level: i64,
        age: i64,
    ) -> Result<NapInput, ValidationError> {
        match self {
            InputPolicy::Strict => NapInput::new(current_hour, tiredness_level, age),
            InputPolicy::Clamp => Ok(NapInput::clamped(current_hour, tiredness_level, age)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputPolicy::Strict => "strict",
            InputPolicy::Clamp => "clamp",
        }
    }
}

impl fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(InputPolicy::Strict),
            "clamp" => Ok(InputPolicy::Clamp),
            _ => Err(ValidationError::UnknownPolicy(s.to_string())),
        }
    }
}
