//! Error types for the object cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the object cache.
///
/// Reads never fail: an absent or expired key is `None`, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Cache was built without a storage driver
    #[error("No driver provided")]
    MissingDriver,

    /// Duration descriptor named a unit that has no conventional length
    #[error("Unknown time unit: {0}")]
    UnknownTimeUnit(String),

    /// TTL could not be normalized to a whole number of seconds
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    /// Configuration could not be read
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the object cache.
pub type Result<T> = std::result::Result<T, CacheError>;
