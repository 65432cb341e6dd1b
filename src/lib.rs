//! Object Cache - an in-process key/value cache with per-entry TTL
//!
//! A thin facade over a pluggable storage driver. Expired entries are
//! removed lazily, when a read touches them.

pub mod cache;
pub mod config;
pub mod error;
pub mod object_cache;
pub mod shared;

pub use cache::{ObjectStoreDriver, StorageDriver, TimeUnit, Ttl};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use object_cache::{ObjectCache, ObjectCacheBuilder};
pub use shared::SharedCache;
