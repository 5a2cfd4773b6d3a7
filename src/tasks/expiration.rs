//! Expiration Watcher Task
//!
//! One task per stored entry. It waits for either the entry's lifetime to
//! complete or the entry's cancel signal to fire, and removes the entry only
//! in the first case.

use std::fmt::Debug;
use std::hash::Hash;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::{Lifetime, SharedStore};

/// How a watcher finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WatchOutcome {
    /// Lifetime completed and the entry was removed
    Expired,
    /// Lifetime completed but the entry had already been replaced or read
    Superseded,
    /// Cancel signal fired first; nothing was touched
    Cancelled,
}

/// Spawns the expiration watcher for the entry of `generation` under `key`.
///
/// The watcher holds no lock while waiting. When the lifetime completes it
/// takes the store lock and asks the store to remove the entry; the store
/// refuses if the entry has been replaced or its cancel signal has fired.
/// Cancellation is checked first when both conditions are ready.
///
/// The returned handle may be dropped; the task runs to completion on its own.
pub(crate) fn spawn_expiration_watcher<K, V>(
    store: SharedStore<K, V>,
    lifetime: Lifetime,
    cancel: CancellationToken,
    key: K,
    generation: u64,
) -> JoinHandle<WatchOutcome>
where
    K: Eq + Hash + Debug + Send + 'static,
    V: Send + 'static,
{
    tokio::spawn(async move {
        let outcome = tokio::select! {
            biased;

            _ = cancel.cancelled() => WatchOutcome::Cancelled,
            _ = lifetime.done() => {
                if store.lock().await.expire(&key, generation) {
                    WatchOutcome::Expired
                } else {
                    WatchOutcome::Superseded
                }
            }
        };

        debug!(
            "watcher for {:?} (generation {}) finished: {:?}",
            key, generation, outcome
        );
        outcome
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Mutex;

    use crate::cache::CacheStore;

    fn shared() -> SharedStore<&'static str, &'static str> {
        Arc::new(Mutex::new(CacheStore::new()))
    }

    async fn install(
        store: &SharedStore<&'static str, &'static str>,
        key: &'static str,
        value: &'static str,
    ) -> (CancellationToken, u64) {
        store.lock().await.install(key, value)
    }

    #[tokio::test]
    async fn test_watcher_expires_entry() {
        let store = shared();
        let (cancel, generation) = install(&store, "key", "value").await;
        let lifetime = Lifetime::background();

        let handle =
            spawn_expiration_watcher(store.clone(), lifetime.clone(), cancel, "key", generation);
        lifetime.cancel();

        assert_eq!(handle.await.unwrap(), WatchOutcome::Expired);
        assert!(store.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_watcher_cancelled_by_replacement() {
        let store = shared();
        let (cancel, generation) = install(&store, "key", "v1").await;

        let handle = spawn_expiration_watcher(
            store.clone(),
            Lifetime::background(),
            cancel,
            "key",
            generation,
        );
        install(&store, "key", "v2").await;

        assert_eq!(handle.await.unwrap(), WatchOutcome::Cancelled);
        assert_eq!(store.lock().await.take("key").unwrap(), "v2");
    }

    #[tokio::test]
    async fn test_watcher_cancelled_by_consumption() {
        let store = shared();
        let (cancel, generation) = install(&store, "key", "value").await;

        let handle = spawn_expiration_watcher(
            store.clone(),
            Lifetime::with_timeout(Duration::from_secs(60)),
            cancel,
            "key",
            generation,
        );
        assert_eq!(store.lock().await.take("key").unwrap(), "value");

        assert_eq!(handle.await.unwrap(), WatchOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_watcher_with_elapsed_lifetime_runs_promptly() {
        let store = shared();
        let (cancel, generation) = install(&store, "key", "value").await;
        let lifetime = Lifetime::background();
        lifetime.cancel();

        let handle = spawn_expiration_watcher(store.clone(), lifetime, cancel, "key", generation);

        let outcome = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("watcher should not hang")
            .unwrap();
        assert_eq!(outcome, WatchOutcome::Expired);
    }

    #[tokio::test]
    async fn test_watcher_racing_replacement_never_removes_new_entry() {
        let store = shared();
        let (cancel, generation) = install(&store, "key", "v1").await;
        let lifetime = Lifetime::background();

        // Hold the lock so the watcher sees its lifetime complete but
        // cannot act until the replacement is installed.
        let mut guard = store.lock().await;
        lifetime.cancel();
        let handle =
            spawn_expiration_watcher(store.clone(), lifetime, cancel, "key", generation);
        tokio::time::sleep(Duration::from_millis(10)).await;
        guard.install("key", "v2");
        drop(guard);

        let outcome = handle.await.unwrap();
        assert!(matches!(
            outcome,
            WatchOutcome::Superseded | WatchOutcome::Cancelled
        ));
        assert_eq!(store.lock().await.take("key").unwrap(), "v2");
    }
}
