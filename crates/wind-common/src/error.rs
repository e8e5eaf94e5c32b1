//! Error types for the windtrail pipeline.

use thiserror::Error;

/// Result type alias using FlowError.
pub type FlowResult<T> = Result<T, FlowError>;

/// Primary error type for the field/animation pipeline.
#[derive(Debug, Error)]
pub enum FlowError {
    // === Data Errors ===
    /// No usable observations at all. Reported distinctly from
    /// `InsufficientData` so the caller can show "no data for this hour"
    /// rather than a generic failure.
    #[error("no usable wind observations")]
    NoData,

    /// Fewer usable observations than the interpolation needs. No partial
    /// field is ever produced in this case.
    #[error("insufficient observations: found {found}, need at least {required}")]
    InsufficientData { found: usize, required: usize },

    // === Rendering Errors ===
    #[error("surface error: {0}")]
    SurfaceError(String),
}
