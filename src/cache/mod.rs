//! Cache Module
//!
//! Storage drivers, entry representation and TTL normalization.

mod driver;
mod entry;
mod key;
mod stats;
mod store;
mod ttl;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use driver::StorageDriver;
pub use entry::{current_timestamp, default_entry_factory, CacheEntry, EntryFactory, StoreObject};
pub use key::{IdentityKey, KeyMaker, PrefixedKey};
pub use stats::CacheStats;
pub use store::ObjectStoreDriver;
pub use ttl::{TimeUnit, Ttl};

// == Public Constants ==
/// TTL applied when neither the caller nor the config supplies one
pub const DEFAULT_TTL: Ttl = Ttl::Duration(15.0, TimeUnit::Minutes);
