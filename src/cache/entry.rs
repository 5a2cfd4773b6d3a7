//! Cache Entry Module
//!
//! Defines a stored value together with the cancel signal of its
//! expiration watcher.

use tokio_util::sync::CancellationToken;

// == Cache Entry ==
/// A single stored value and the signal that stops its watcher.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Triggered when the entry is replaced or consumed
    pub cancel: CancellationToken,
    /// Distinguishes successive entries installed under the same key
    pub generation: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry with a fresh, untriggered cancel signal.
    pub fn new(value: V, generation: u64) -> Self {
        Self {
            value,
            cancel: CancellationToken::new(),
            generation,
        }
    }

    // == Retire ==
    /// Triggers the cancel signal and hands back the value.
    ///
    /// Must be called while the store lock is held so the watcher observes
    /// the cancellation before it can retake the lock.
    pub fn retire(self) -> V {
        self.cancel.cancel();
        self.value
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value", 7);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.generation, 7);
        assert!(!entry.cancel.is_cancelled());
    }

    #[test]
    fn test_retire_triggers_cancel() {
        let entry = CacheEntry::new(42, 1);
        let watcher_signal = entry.cancel.clone();

        assert_eq!(entry.retire(), 42);
        assert!(watcher_signal.is_cancelled());
    }
}
