//! Error module containing growth prediction error types.

mod growth_error;

pub use growth_error::GrowthError;

/// Result type for growth prediction operations.
pub type Result<T> = std::result::Result<T, GrowthError>;
