//! In-memory TTL cache with cache-first-with-refresh reads.
//!
//! Read-mostly data (task lists, wallets, categories) is served from
//! this map within a short staleness window; every write invalidates the
//! owning user's key prefix so the next read hits storage again.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::debug;

use crate::domain::errors::ServiceError;

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Instant,
}

/// Injectable cache service. Cloning shares the underlying map.
///
/// There is no stale-while-revalidate and no single-flight: two
/// concurrent misses on the same key both invoke their producer. The
/// duplicate fetch is accepted; last write wins.
#[derive(Clone, Default)]
pub struct Cache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a live entry for `key`, dropping it if expired.
    /// A stored value of a different type is treated as a miss.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => entry
                .value
                .clone()
                .downcast::<T>()
                .ok()
                .map(|value| (*value).clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put<T>(&self, key: &str, value: T, ttl: Duration)
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: Arc::new(value),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Cache-first-with-refresh: serve a live entry, otherwise run the
    /// producer and store its result for `ttl`. Producer errors
    /// propagate unchanged and nothing is stored.
    ///
    /// The map lock is never held across the producer await.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, ServiceError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        if let Some(hit) = self.get::<T>(key) {
            debug!("cache hit: {}", key);
            return Ok(hit);
        }
        debug!("cache miss: {}", key);
        let value = producer().await?;
        self.put(key, value.clone(), ttl);
        Ok(value)
    }

    /// Drop every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        debug!(
            "cache invalidate '{}': {} entries dropped",
            prefix,
            before - entries.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_producer(
        calls: Arc<AtomicUsize>,
        value: &'static str,
    ) -> impl FnOnce() -> std::future::Ready<Result<String, ServiceError>> {
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(value.to_string()))
        }
    }

    #[tokio::test]
    async fn test_second_fetch_within_ttl_skips_producer() {
        let cache = Cache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let ttl = Duration::from_secs(60);

        let first = cache
            .fetch("tasks:u1:list", ttl, counting_producer(calls.clone(), "a"))
            .await
            .unwrap();
        let second = cache
            .fetch("tasks:u1:list", ttl, counting_producer(calls.clone(), "b"))
            .await
            .unwrap();

        assert_eq!(first, "a");
        assert_eq!(second, "a");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_after_expiry_reinvokes_producer() {
        let cache = Cache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let ttl = Duration::from_millis(20);

        cache
            .fetch("tasks:u1:list", ttl, counting_producer(calls.clone(), "a"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        let refreshed = cache
            .fetch("tasks:u1:list", ttl, counting_producer(calls.clone(), "b"))
            .await
            .unwrap();

        assert_eq!(refreshed, "b");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_prefix_forces_refetch() {
        let cache = Cache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let ttl = Duration::from_secs(60);

        cache
            .fetch("tasks:u1:list", ttl, counting_producer(calls.clone(), "a"))
            .await
            .unwrap();
        cache
            .fetch("tasks:u2:list", ttl, counting_producer(calls.clone(), "c"))
            .await
            .unwrap();

        cache.invalidate_prefix("tasks:u1:");

        let refetched = cache
            .fetch("tasks:u1:list", ttl, counting_producer(calls.clone(), "b"))
            .await
            .unwrap();
        assert_eq!(refetched, "b");

        // The other user's entry survived.
        let other: String = cache.get("tasks:u2:list").unwrap();
        assert_eq!(other, "c");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_producer_error_is_not_cached() {
        let cache = Cache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let ttl = Duration::from_secs(60);

        let failing = {
            let calls = calls.clone();
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Err::<String, _>(ServiceError::Validation(
                    "boom".to_string(),
                )))
            }
        };
        let result = cache.fetch("tasks:u1:list", ttl, failing).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));

        // The failure left no entry behind.
        let ok = cache
            .fetch("tasks:u1:list", ttl, counting_producer(calls.clone(), "a"))
            .await
            .unwrap();
        assert_eq!(ok, "a");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_type_mismatch_is_a_miss() {
        let cache = Cache::new();
        cache.put("key", 42_u32, Duration::from_secs(60));
        assert_eq!(cache.get::<String>("key"), None);
        assert_eq!(cache.get::<u32>("key"), Some(42));
    }
}
