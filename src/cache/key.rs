//! Key Strategy Module
//!
//! Maps caller keys to the keys a driver stores under.

use std::fmt;

// == Key Maker ==
/// Transforms a caller key into the driver's storage key.
pub trait KeyMaker: fmt::Debug + Send + Sync {
    fn make_key(&self, key: &str) -> String;
}

/// Stores keys as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityKey;

impl KeyMaker for IdentityKey {
    fn make_key(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Namespaces every key with a fixed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedKey {
    prefix: String,
}

impl PrefixedKey {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl KeyMaker for PrefixedKey {
    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}
