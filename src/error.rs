// src/error.rs

use thiserror::Error;

use crate::types::VehicleVariant;

/// Fatal session-initialization failures. There is no degraded parameter
/// set to fall back to, so callers must abort before running any cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unsupported car: {0}")]
    UnsupportedVariant(VehicleVariant),

    #[error("unknown vehicle variant name: {0:?}")]
    UnknownVariantName(String),
}
