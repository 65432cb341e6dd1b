//! Object Cache Module
//!
//! Public cache facade: owns the default TTL policy and delegates storage
//! to a single driver built at construction time.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::cache::{ObjectStoreDriver, StorageDriver, Ttl, DEFAULT_TTL};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Object Cache ==
/// Key/value cache with per-entry TTL over a pluggable [`StorageDriver`].
pub struct ObjectCache<V, D = ObjectStoreDriver<V>> {
    /// Exclusively owned storage backend
    driver: D,
    /// TTL used when a write does not name one
    default_ttl: Ttl,
    _value: PhantomData<fn() -> V>,
}

impl<V, D> ObjectCache<V, D>
where
    D: StorageDriver<V>,
{
    // == Constructors ==
    /// Builds the driver with `driver` and uses the built-in default TTL.
    pub fn new<F>(driver: F) -> Self
    where
        F: FnOnce() -> D,
    {
        Self::with_config(driver, CacheConfig::default())
    }

    /// Builds the driver with `driver`, taking the default TTL from `config`
    /// when it defines one.
    pub fn with_config<F>(driver: F, config: CacheConfig) -> Self
    where
        F: FnOnce() -> D,
    {
        let default_ttl = config.default_ttl.unwrap_or(DEFAULT_TTL);
        debug!("Object cache created with default TTL {}", default_ttl);

        Self {
            driver: driver(),
            default_ttl,
            _value: PhantomData,
        }
    }

    /// Starts a builder; `build` fails if no driver was supplied.
    pub fn builder() -> ObjectCacheBuilder<V, D> {
        ObjectCacheBuilder::new()
    }

    // == Accessors ==
    /// TTL applied by `set` and `set_multiple`.
    pub fn default_ttl(&self) -> Ttl {
        self.default_ttl
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    // == Reads ==
    /// Returns the live value for `key`. May evict an expired entry.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.driver.get(key)
    }

    /// Returns a map covering exactly `keys`; absent or expired keys are `None`.
    pub fn get_multiple(&mut self, keys: &[&str]) -> HashMap<String, Option<V>> {
        self.driver.get_multiple(keys)
    }

    // == Writes ==
    /// Stores `value` with the default TTL.
    pub fn set(&mut self, key: &str, value: V) -> Result<()> {
        self.set_with_ttl(key, value, self.default_ttl)
    }

    /// Stores `value` with an explicit TTL, normalized to seconds first.
    pub fn set_with_ttl(&mut self, key: &str, value: V, ttl: Ttl) -> Result<()> {
        let ttl = ttl.as_seconds()?;
        self.driver.set(key, value, ttl)
    }

    /// Stores every pair with the default TTL.
    pub fn set_multiple(&mut self, pairs: HashMap<String, V>) -> Result<()> {
        self.set_multiple_with_ttl(pairs, self.default_ttl)
    }

    /// Stores every pair with an explicit TTL, normalized to seconds first.
    pub fn set_multiple_with_ttl(&mut self, pairs: HashMap<String, V>, ttl: Ttl) -> Result<()> {
        let ttl = ttl.as_seconds()?;
        self.driver.set_multiple(pairs, ttl)
    }
}

impl<V, D: fmt::Debug> fmt::Debug for ObjectCache<V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCache")
            .field("driver", &self.driver)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

// == Builder ==
/// Step-wise construction of an [`ObjectCache`].
pub struct ObjectCacheBuilder<V, D> {
    driver: Option<Box<dyn FnOnce() -> D>>,
    config: CacheConfig,
    _value: PhantomData<fn() -> V>,
}

impl<V, D> ObjectCacheBuilder<V, D>
where
    D: StorageDriver<V>,
{
    fn new() -> Self {
        Self {
            driver: None,
            config: CacheConfig::default(),
            _value: PhantomData,
        }
    }

    /// Sets the factory that builds the cache's driver.
    pub fn driver<F>(mut self, driver: F) -> Self
    where
        F: FnOnce() -> D + 'static,
    {
        self.driver = Some(Box::new(driver));
        self
    }

    pub fn config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the cache, failing with [`CacheError::MissingDriver`] if no
    /// driver factory was supplied.
    pub fn build(self) -> Result<ObjectCache<V, D>> {
        let driver = self.driver.ok_or(CacheError::MissingDriver)?;
        Ok(ObjectCache::with_config(driver, self.config))
    }
}
