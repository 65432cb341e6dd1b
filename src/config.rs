//! Configuration Module
//!
//! Cache construction settings, loaded from JSON or environment variables.

use std::env;

use serde::Deserialize;

use crate::cache::Ttl;
use crate::error::{CacheError, Result};

/// Environment variable holding the default TTL, e.g. `900` or `15 minutes`
pub const DEFAULT_TTL_ENV: &str = "OBJECT_CACHE_DEFAULT_TTL";

/// Cache configuration parameters.
///
/// Deserializes from `{ "defaultTtl": 900 }` or `{ "defaultTtl": [15, "minutes"] }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Overrides the built-in 15 minute default TTL when set
    #[serde(default)]
    pub default_ttl: Option<Ttl>,
}

impl CacheConfig {
    /// Creates a config overriding the default TTL.
    pub fn with_default_ttl(ttl: Ttl) -> Self {
        Self {
            default_ttl: Some(ttl),
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `OBJECT_CACHE_DEFAULT_TTL` - Default TTL (default: unset, 15 minutes applies)
    pub fn from_env() -> Self {
        Self {
            default_ttl: env::var(DEFAULT_TTL_ENV)
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Parses a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CacheError::InvalidConfig(e.to_string()))
    }
}
