//! Nap recommendation module.
//!
//! Given the hour of day, a 1-10 tiredness rating and an age, decides whether
//! a nap is advisable and how long it should be.

mod engine;
mod input;
mod labels;
pub mod rules;

pub use engine::{
    evaluate, recommend, DurationRange, NapEvaluation, NapRecommendation, RangeAdjustment,
};
pub use input::{InputPolicy, NapInput, AGE_RANGE, HOUR_RANGE, TIREDNESS_RANGE};
pub use labels::{format_hour, TirednessLabel};
pub use rules::{AgeBand, NapWindow, AGE_BANDS, NAP_WINDOWS};
