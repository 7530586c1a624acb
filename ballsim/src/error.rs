//! Error types for scenario construction and runs.
//!
//! Every fallible operation in the library returns `SimResult<T>`. All of
//! these are configuration errors caught before the first step: a run that
//! starts always completes. Numerical blow-up of the penalty model is a
//! simulated outcome and is reported through the conservation samples, never
//! through this enum.

use thiserror::Error;

/// Unified error type for the engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A body has a non-positive or non-finite property
    #[error("invalid body {index}: {reason}")]
    InvalidBody { index: usize, reason: String },

    /// Boundary extents are inverted or non-finite
    #[error("invalid boundary: left={left}, right={right}, bottom={bottom}, top={top}")]
    InvalidBoundary {
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
    },

    /// A numerical parameter is out of range
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Sample times are empty, start before zero, or do not strictly increase
    #[error("invalid sample times for {model} model at step {step}: {reason}")]
    InvalidSampleTimes {
        model: &'static str,
        step: usize,
        reason: String,
    },

    /// Scenario file has the wrong shape
    #[error("invalid scenario: {0}")]
    Config(String),
}

/// Convenience alias for `Result<T, SimError>`
pub type SimResult<T> = Result<T, SimError>;
