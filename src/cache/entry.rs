//! Cache Entry Module
//!
//! Defines the stored representation of a value together with its expiry.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;

// == Store Object ==
/// A value held by a driver together with its absolute expiry.
///
/// Implementations are immutable once built; the driver replaces them on
/// every write instead of mutating them.
pub trait StoreObject<V>: fmt::Debug + Send + Sync {
    /// The stored value
    fn value(&self) -> &V;

    /// Expiration timestamp (Unix seconds)
    fn expiry(&self) -> i64;

    /// Returns true while `now` is strictly before the expiry.
    ///
    /// `now == expiry` counts as expired.
    fn is_valid_at(&self, now: i64) -> bool {
        now < self.expiry()
    }

    /// Allows callers to recover the concrete entry type.
    fn as_any(&self) -> &dyn Any;
}

/// Builds the stored representation of `(value, expiry)` for a driver.
pub type EntryFactory<V> = Arc<dyn Fn(V, i64) -> Box<dyn StoreObject<V>> + Send + Sync>;

// == Cache Entry ==
/// Default stored representation: the value and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix seconds)
    pub expiry: i64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring at `expiry`.
    pub fn new(value: V, expiry: i64) -> Self {
        Self { value, expiry }
    }
}

impl<V> StoreObject<V> for CacheEntry<V>
where
    V: fmt::Debug + Send + Sync + 'static,
{
    fn value(&self) -> &V {
        &self.value
    }

    fn expiry(&self) -> i64 {
        self.expiry
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Factory producing plain [`CacheEntry`] values.
pub fn default_entry_factory<V>() -> EntryFactory<V>
where
    V: fmt::Debug + Send + Sync + 'static,
{
    Arc::new(|value: V, expiry: i64| -> Box<dyn StoreObject<V>> {
        Box::new(CacheEntry::new(value, expiry))
    })
}

// == Utility Functions ==
/// Returns current Unix timestamp truncated to whole seconds.
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}
