//! Storage Driver Module
//!
//! The capability set a storage backend must provide to sit behind
//! [`ObjectCache`](crate::ObjectCache).

use std::collections::HashMap;

use crate::error::Result;

// == Storage Driver ==
/// Key/value storage with expiry semantics.
///
/// TTLs arrive already normalized to whole seconds. Reads take `&mut self`
/// because an expired entry is removed when it is read.
pub trait StorageDriver<V> {
    /// Returns the live value for `key`, or `None` if it is absent or expired.
    fn get(&mut self, key: &str) -> Option<V>;

    /// Looks up every key independently.
    ///
    /// The result holds exactly the requested keys; missing or expired keys
    /// map to `None`.
    fn get_multiple(&mut self, keys: &[&str]) -> HashMap<String, Option<V>> {
        keys.iter()
            .map(|key| (key.to_string(), self.get(key)))
            .collect()
    }

    /// Stores `value` under `key`, expiring `ttl` seconds from now.
    ///
    /// A TTL of zero or less stores an entry that is already expired.
    fn set(&mut self, key: &str, value: V, ttl: i64) -> Result<()>;

    /// Stores every pair with the same TTL. Each pair is an independent `set`.
    fn set_multiple(&mut self, pairs: HashMap<String, V>, ttl: i64) -> Result<()> {
        for (key, value) in pairs {
            self.set(&key, value, ttl)?;
        }
        Ok(())
    }
}
