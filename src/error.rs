// error.rs - Configuration errors
//
// The simulation itself never fails. Only configuration coming in from the
// page or the headless driver can be rejected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config text was not valid JSON for [`crate::Config`]
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A duration, rate or radius that must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// A probability or count-like value that must not be negative
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}
