//! # Nap Advisor Core Library
//!
//! This library provides the decision logic for Nap Advisor: given the hour of
//! day, a 1-10 tiredness rating and an age, it decides whether a nap is
//! advisable and recommends a duration range. The `napadvisor` CLI is a thin
//! presentation layer over the same library.
//!
//! ## Architecture
//!
//! - **Recommendation Engine**: a pure function driven by two ordered rule
//!   tables (age bands and hour windows) followed by a fixed cascade of range
//!   adjustments
//! - **Input policy**: out-of-range values are rejected or clamped before they
//!   reach the engine
//! - **Storage**: TOML-based configuration for defaults and output preferences
//!
//! ## Key Components
//!
//! - [`recommend`] / [`evaluate`]: Recommendation engine
//! - [`NapInput`], [`InputPolicy`]: Validated input construction
//! - [`Config`]: Application configuration management

pub mod error;
pub mod nap;
pub mod storage;

pub use error::{ConfigError, CoreError, ValidationError};
pub use nap::{
    evaluate, format_hour, recommend, InputPolicy, NapEvaluation, NapInput, NapRecommendation,
    RangeAdjustment, TirednessLabel,
};
pub use storage::Config;
