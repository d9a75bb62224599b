//! Caching layer for window fetches.
//!
//! Every search issues one store query for a `[from, to]` date window, and
//! many concurrent searches share the same window. Caching the materialized
//! window keeps repeat queries off the backing store. Date-window keys have
//! naturally low cardinality, so no bucketing is needed.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::domain::Enrollment;
use crate::store::{EnrollmentStore, StoreError};

/// Cache key: inclusive date window bounds.
type WindowKey = (NaiveDate, NaiveDate);

/// Cached window entry.
type WindowEntry = Arc<Vec<Arc<Enrollment>>>;

/// Configuration for the window cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached windows.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Enrollment store with window caching.
///
/// Wraps any `EnrollmentStore` and caches successful window fetches.
/// Failures are never cached.
pub struct CachedStore<S> {
    inner: S,
    windows: MokaCache<WindowKey, WindowEntry>,
}

impl<S> CachedStore<S> {
    /// Create a new cached store around `inner`.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let windows = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, windows }
    }

    /// Access the underlying store for operations that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached windows (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.windows.entry_count()
    }

    /// Drop all cached windows, e.g. after a schedule data reload.
    pub fn invalidate_all(&self) {
        self.windows.invalidate_all();
    }
}

impl<S: EnrollmentStore + Sync> EnrollmentStore for CachedStore<S> {
    async fn enrollments_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Arc<Enrollment>>, StoreError> {
        let key = (from, to);

        if let Some(hit) = self.windows.get(&key).await {
            return Ok(hit.as_ref().clone());
        }

        let fetched = self.inner.enrollments_between(from, to).await?;
        self.windows.insert(key, Arc::new(fetched.clone())).await;

        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store double that counts fetches and can be told to fail.
    #[derive(Default)]
    struct CountingStore {
        fetches: AtomicUsize,
        fail: bool,
    }

    impl CountingStore {
        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl EnrollmentStore for CountingStore {
        async fn enrollments_between(
            &self,
            _from: NaiveDate,
            _to: NaiveDate,
        ) -> Result<Vec<Arc<Enrollment>>, StoreError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Backend("down".into()));
            }
            Ok(Vec::new())
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[tokio::test]
    async fn repeat_window_hits_the_cache() {
        let store = CachedStore::new(CountingStore::default(), &CacheConfig::default());

        store.enrollments_between(date(1), date(4)).await.unwrap();
        store.enrollments_between(date(1), date(4)).await.unwrap();

        assert_eq!(store.inner().fetch_count(), 1);
    }

    #[tokio::test]
    async fn different_windows_fetch_separately() {
        let store = CachedStore::new(CountingStore::default(), &CacheConfig::default());

        store.enrollments_between(date(1), date(4)).await.unwrap();
        store.enrollments_between(date(2), date(5)).await.unwrap();

        assert_eq!(store.inner().fetch_count(), 2);
    }

    #[tokio::test]
    async fn invalidation_forces_a_refetch() {
        let store = CachedStore::new(CountingStore::default(), &CacheConfig::default());

        store.enrollments_between(date(1), date(4)).await.unwrap();
        store.invalidate_all();
        // moka applies invalidation lazily; sync before re-reading
        store.windows.run_pending_tasks().await;
        store.enrollments_between(date(1), date(4)).await.unwrap();

        assert_eq!(store.inner().fetch_count(), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let store = CachedStore::new(
            CountingStore {
                fetches: AtomicUsize::new(0),
                fail: true,
            },
            &CacheConfig::default(),
        );

        assert!(store.enrollments_between(date(1), date(4)).await.is_err());
        assert!(store.enrollments_between(date(1), date(4)).await.is_err());

        assert_eq!(store.inner().fetch_count(), 2);
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 1000);
    }
}
