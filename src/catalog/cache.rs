use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

struct Entry<T> {
    value: T,
    stored_at: Instant,
    generation: u64,
}

/// Single-slot TTL cache with single-flight refresh.
///
/// At most one refresh runs at a time. While it runs, callers holding an
/// expired entry get that entry back immediately; callers with no entry at
/// all, or asking for a forced refresh, wait for the running refresh and
/// share its result.
pub struct TtlCache<T> {
    slot: RwLock<Option<Entry<T>>>,
    refresh_lock: Mutex<()>,
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> TtlCache<T> {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Current value regardless of age.
    pub async fn peek(&self) -> Option<T> {
        self.slot.read().await.as_ref().map(|e| e.value.clone())
    }

    async fn lookup(&self, ttl: Duration) -> (Option<T>, bool, u64) {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some(entry) => (
                Some(entry.value.clone()),
                entry.stored_at.elapsed() < ttl,
                entry.generation,
            ),
            None => (None, false, 0),
        }
    }

    /// Return the cached value if younger than `ttl`, otherwise run `refresh`.
    pub async fn get_or_refresh<F, Fut>(&self, ttl: Duration, force: bool, refresh: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let (current, fresh, observed) = self.lookup(ttl).await;

        if !force && fresh {
            if let Some(value) = current {
                return value;
            }
        }

        let _guard = match (force, current) {
            (false, Some(stale)) => match self.refresh_lock.try_lock() {
                Ok(guard) => guard,
                Err(_) => return stale,
            },
            _ => self.refresh_lock.lock().await,
        };

        // Someone else refreshed while we waited for the lock
        {
            let slot = self.slot.read().await;
            if let Some(entry) = slot.as_ref() {
                if entry.generation != observed {
                    return entry.value.clone();
                }
            }
        }

        let value = refresh().await;

        let mut slot = self.slot.write().await;
        *slot = Some(Entry {
            value: value.clone(),
            stored_at: Instant::now(),
            generation: observed + 1,
        });

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::oneshot;

    const LONG: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_fresh_value_is_reused() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_refresh(LONG, false, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    "catalog"
                })
                .await;
            assert_eq!(value, "catalog");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_value_is_refreshed() {
        let cache = TtlCache::new();

        assert_eq!(cache.get_or_refresh(Duration::ZERO, false, || async { 1 }).await, 1);
        assert_eq!(cache.get_or_refresh(Duration::ZERO, false, || async { 2 }).await, 2);
        assert_eq!(cache.peek().await, Some(2));
    }

    #[tokio::test]
    async fn test_force_refresh_ignores_ttl() {
        let cache = TtlCache::new();

        assert_eq!(cache.get_or_refresh(LONG, false, || async { 1 }).await, 1);
        assert_eq!(cache.get_or_refresh(LONG, true, || async { 2 }).await, 2);
        assert_eq!(cache.get_or_refresh(LONG, false, || async { 3 }).await, 2);
    }

    #[tokio::test]
    async fn test_cold_callers_share_one_refresh() {
        let cache = Arc::new(TtlCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_refresh(LONG, false, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        "loaded"
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), "loaded");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_value_served_during_refresh() {
        let cache = Arc::new(TtlCache::new());
        cache.get_or_refresh(Duration::ZERO, false, || async { "v1" }).await;

        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let refresher = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .get_or_refresh(Duration::ZERO, false, || async move {
                        let _ = started_tx.send(());
                        let _ = release_rx.await;
                        "v2"
                    })
                    .await
            })
        };

        started_rx.await.unwrap();

        // The refresh is in flight: an expired read returns the old value at once
        let stale = cache
            .get_or_refresh(Duration::ZERO, false, || async { "unexpected" })
            .await;
        assert_eq!(stale, "v1");

        release_tx.send(()).unwrap();
        assert_eq!(refresher.await.unwrap(), "v2");
        assert_eq!(cache.peek().await, Some("v2"));
    }
}
