//! Object Store Driver Module
//!
//! In-memory storage driver: a HashMap of entries with expiry timestamps
//! and lazy eviction on read.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::entry::{current_timestamp, default_entry_factory, EntryFactory};
use crate::cache::{CacheStats, IdentityKey, KeyMaker, StorageDriver, StoreObject};
use crate::error::Result;

// == Object Store Driver ==
/// In-memory driver with per-entry expiry.
///
/// Expired entries stay in the map until a read touches them or the store
/// is purged; nothing sweeps them in the background.
pub struct ObjectStoreDriver<V, K = IdentityKey> {
    /// Storage key -> entry
    entries: HashMap<String, Box<dyn StoreObject<V>>>,
    /// Builds the entry stored by each `set`
    entry_factory: EntryFactory<V>,
    /// Caller key -> storage key
    key_maker: K,
    /// Fixed "current time" (Unix seconds); wall clock when None
    time: Option<i64>,
    /// Read statistics
    stats: CacheStats,
}

impl<V> ObjectStoreDriver<V, IdentityKey>
where
    V: fmt::Debug + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty driver storing keys as given.
    pub fn new() -> Self {
        Self::with_key_maker(IdentityKey)
    }
}

impl<V> Default for ObjectStoreDriver<V, IdentityKey>
where
    V: fmt::Debug + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K> ObjectStoreDriver<V, K>
where
    V: fmt::Debug + Send + Sync + 'static,
    K: KeyMaker,
{
    /// Creates an empty driver that maps keys through `key_maker`.
    pub fn with_key_maker(key_maker: K) -> Self {
        Self {
            entries: HashMap::new(),
            entry_factory: default_entry_factory(),
            key_maker,
            time: None,
            stats: CacheStats::new(),
        }
    }

    // == Make Key ==
    /// Returns the storage key for a caller key.
    pub fn make_key(&self, key: &str) -> String {
        self.key_maker.make_key(key)
    }

    // == Entry Factory ==
    /// Swaps the constructor used for entries stored from now on.
    ///
    /// Entries already in the map keep their representation.
    pub fn set_store_object_class<F>(&mut self, factory: F)
    where
        F: Fn(V, i64) -> Box<dyn StoreObject<V>> + Send + Sync + 'static,
    {
        self.entry_factory = Arc::new(factory);
        debug!("Entry factory replaced");
    }

    // == Time ==
    /// Current time in Unix seconds: the override if set, else the wall clock.
    pub fn time(&self) -> i64 {
        self.time.unwrap_or_else(current_timestamp)
    }

    /// Pins (or with `None`, releases) the time used for expiry checks.
    pub fn set_time(&mut self, time: Option<i64>) {
        self.time = time;
    }

    // == Purge ==
    /// Removes every entry unconditionally.
    pub fn purge(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        info!("Store purged: removed {} entries", removed);
    }

    // == Inspection ==
    /// Returns the raw stored entry for a caller key without checking expiry.
    pub fn entry(&self, key: &str) -> Option<&dyn StoreObject<V>> {
        self.entries.get(&self.make_key(key)).map(|entry| entry.as_ref())
    }

    /// True if an entry, live or expired, is stored for the caller key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&self.make_key(key))
    }

    /// Returns the number of stored entries, expired-but-unread included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns current read statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}

impl<V, K> StorageDriver<V> for ObjectStoreDriver<V, K>
where
    V: Clone + fmt::Debug + Send + Sync + 'static,
    K: KeyMaker,
{
    // == Get ==
    /// Returns the value if present and unexpired.
    ///
    /// An expired entry is removed from the map before returning `None`.
    fn get(&mut self, key: &str) -> Option<V> {
        let now = self.time();
        let stored_key = self.make_key(key);

        let live = match self.entries.get(&stored_key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) if entry.is_valid_at(now) => Some(entry.value().clone()),
            Some(_) => None,
        };

        match live {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.entries.remove(&stored_key);
                self.stats.record_expiration();
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                debug!("Evicted expired entry: {}", stored_key);
                None
            }
        }
    }

    // == Set ==
    /// Stores a new entry expiring at `time() + ttl`, replacing any previous one.
    fn set(&mut self, key: &str, value: V, ttl: i64) -> Result<()> {
        let expiry = self.time().saturating_add(ttl);
        let entry = (self.entry_factory)(value, expiry);
        let stored_key = self.make_key(key);

        self.entries.insert(stored_key, entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }
}

impl<V, K: fmt::Debug> fmt::Debug for ObjectStoreDriver<V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStoreDriver")
            .field("entries", &self.entries.len())
            .field("key_maker", &self.key_maker)
            .field("time", &self.time)
            .field("stats", &self.stats)
            .finish()
    }
}
