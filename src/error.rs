//! Construction-time configuration errors.

use thiserror::Error;

/// Rejected propagator configuration.
///
/// These are the only failure conditions of the crate: everything else
/// (step rejection, degenerate error scales) is ordinary control flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The error tolerance must be finite and strictly positive.
    #[error("error tolerance must be strictly positive and finite, got {0}")]
    InvalidTolerance(f64),
    /// The named tableau preset does not exist.
    #[error("unknown tableau preset `{0}`")]
    UnknownTableau(String),
}
