//! Shared Cache
//!
//! Lock-guarded handle for using one [`ObjectCache`] from many tasks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cache::{ObjectStoreDriver, StorageDriver, Ttl};
use crate::error::Result;
use crate::object_cache::ObjectCache;

/// Cloneable handle to a cache behind an async RwLock.
///
/// Reads take the write lock too, since a read can evict an expired entry.
pub struct SharedCache<V, D = ObjectStoreDriver<V>> {
    inner: Arc<RwLock<ObjectCache<V, D>>>,
}

impl<V, D> Clone for SharedCache<V, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, D> SharedCache<V, D>
where
    D: StorageDriver<V>,
{
    /// Wraps a cache for shared access.
    pub fn new(cache: ObjectCache<V, D>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    pub async fn get_multiple(&self, keys: &[&str]) -> HashMap<String, Option<V>> {
        self.inner.write().await.get_multiple(keys)
    }

    pub async fn set(&self, key: &str, value: V) -> Result<()> {
        self.inner.write().await.set(key, value)
    }

    pub async fn set_with_ttl(&self, key: &str, value: V, ttl: Ttl) -> Result<()> {
        self.inner.write().await.set_with_ttl(key, value, ttl)
    }

    pub async fn set_multiple(&self, pairs: HashMap<String, V>) -> Result<()> {
        self.inner.write().await.set_multiple(pairs)
    }

    pub async fn set_multiple_with_ttl(&self, pairs: HashMap<String, V>, ttl: Ttl) -> Result<()> {
        self.inner.write().await.set_multiple_with_ttl(pairs, ttl)
    }

    /// Read access for inspection that cannot mutate, e.g. driver stats.
    pub async fn read(&self) -> RwLockReadGuard<'_, ObjectCache<V, D>> {
        self.inner.read().await
    }

    /// Exclusive access, e.g. to purge or pin the driver's clock.
    pub async fn write(&self) -> RwLockWriteGuard<'_, ObjectCache<V, D>> {
        self.inner.write().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TimeUnit;

    fn shared_cache() -> SharedCache<String> {
        SharedCache::new(ObjectCache::new(ObjectStoreDriver::new))
    }

    #[tokio::test]
    async fn test_shared_set_and_get() {
        let cache = shared_cache();

        cache.set("key", "value".to_string()).await.unwrap();
        assert_eq!(cache.get("key").await, Some("value".to_string()));
        assert_eq!(cache.get("missing").await, None);
    }

    #[tokio::test]
    async fn test_shared_expired_read_evicts() {
        let cache = shared_cache();

        cache
            .set_with_ttl("key", "value".to_string(), Ttl::Duration(0.0, TimeUnit::Seconds))
            .await
            .unwrap();
        assert!(cache.read().await.driver().contains_key("key"));

        assert_eq!(cache.get("key").await, None);
        assert!(!cache.read().await.driver().contains_key("key"));
    }

    #[tokio::test]
    async fn test_shared_clones_see_same_entries() {
        let cache = shared_cache();
        let writer = cache.clone();

        let handle = tokio::spawn(async move {
            let pairs = HashMap::from([
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ]);
            writer.set_multiple(pairs).await.unwrap();
        });
        handle.await.unwrap();

        let values = cache.get_multiple(&["a", "b"]).await;
        assert_eq!(values["a"], Some("1".to_string()));
        assert_eq!(values["b"], Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_shared_purge_through_write_guard() {
        let cache = shared_cache();
        cache.set("key", "value".to_string()).await.unwrap();

        cache.write().await.driver_mut().purge();

        assert_eq!(cache.get("key").await, None);
        assert_eq!(cache.read().await.driver().stats().total_entries, 0);
    }
}
