//! Cache Store Module
//!
//! The key-to-entry mapping and the shared handle through which callers
//! reach it. All mutation happens under one lock; each entry's watcher is
//! spawned while that lock is held.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::{CacheEntry, Lifetime};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_expiration_watcher;

/// Store handle shared between [`EntryStore`] and its watchers.
pub(crate) type SharedStore<K, V> = Arc<Mutex<CacheStore<K, V>>>;

// == Cache Store ==
/// Key-to-entry mapping. Not synchronized on its own; see [`EntryStore`].
#[derive(Debug)]
pub(crate) struct CacheStore<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    next_generation: u64,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Debug,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_generation: 0,
        }
    }

    // == Install ==
    /// Stores `value` under `key`, retiring any entry already there.
    ///
    /// Returns the new entry's cancel signal and generation, which the
    /// caller hands to the watcher it spawns.
    pub fn install(&mut self, key: K, value: V) -> (CancellationToken, u64) {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);

        let entry = CacheEntry::new(value, generation);
        let cancel = entry.cancel.clone();

        if let Some(previous) = self.entries.insert(key, entry) {
            debug!(
                "replaced entry generation {} with {}",
                previous.generation, generation
            );
            previous.retire();
        }

        (cancel, generation)
    }

    // == Take ==
    /// Removes and returns the value under `key`, stopping its watcher.
    pub fn take<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        match self.entries.remove(key) {
            Some(entry) => {
                debug!("consumed key {:?} (generation {})", key, entry.generation);
                Ok(entry.retire())
            }
            None => Err(CacheError::NotFound(format!("{:?}", key))),
        }
    }

    // == Expire ==
    /// Removes `key` only if it still holds the entry of `generation` and
    /// that entry has not been retired.
    ///
    /// Returns true if an entry was removed.
    pub fn expire(&mut self, key: &K, generation: u64) -> bool {
        let current = match self.entries.get(key) {
            Some(entry) => entry.generation == generation && !entry.cancel.is_cancelled(),
            None => false,
        };

        if current {
            if let Some(entry) = self.entries.remove(key) {
                entry.retire();
            }
        }

        current
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for CacheStore<K, V>
where
    K: Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

// == Entry Store ==
/// Concurrent one-shot store.
///
/// A value lives until its [`Lifetime`] completes or until it is read,
/// whichever comes first. Cloning the handle shares the same mapping.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use one_shot_cache::cache::{EntryStore, Lifetime};
///
/// # async fn demo() {
/// let store = EntryStore::new();
/// store.set(Lifetime::with_timeout(Duration::from_secs(1)), "key".to_string(), 1).await;
///
/// assert_eq!(store.get("key").await.unwrap(), 1);
/// assert!(store.get("key").await.is_err());
/// # }
/// ```
#[derive(Debug)]
pub struct EntryStore<K, V> {
    inner: SharedStore<K, V>,
}

impl<K, V> Clone for EntryStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> EntryStore<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Send + 'static,
{
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheStore::new())),
        }
    }

    // == Set ==
    /// Stores `value` under `key` until `lifetime` completes or the key is read.
    ///
    /// An entry already under `key` is cancelled before the new one becomes
    /// visible, so its watcher can never remove the replacement.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn set(&self, lifetime: Lifetime, key: K, value: V) {
        let mut store = self.inner.lock().await;
        let (cancel, generation) = store.install(key.clone(), value);

        // Spawned under the lock: the watcher cannot act before the install
        // is complete.
        spawn_expiration_watcher(Arc::clone(&self.inner), lifetime, cancel, key, generation);
    }

    // == Get ==
    /// Removes and returns the value under `key`.
    ///
    /// Returns [`CacheError::NotFound`] if the key was never set, has already
    /// been read, or has expired.
    pub async fn get<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.inner.lock().await.take(key)
    }

    // == Length ==
    /// Returns the number of live entries.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

impl<K, V> Default for EntryStore<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
