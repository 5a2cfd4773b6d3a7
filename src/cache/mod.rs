//! Cache Module
//!
//! Provides the one-shot, lifetime-bound entry store.
//!
//! Entries can only be stored through [`EntryStore::set`], which starts the
//! watcher for each one. The underlying map is not reachable from outside:
//!
//! ```compile_fail
//! use one_shot_cache::cache::CacheStore;
//! ```

mod entry;
mod lifetime;
mod store;


// Re-export public types
pub use lifetime::Lifetime;
pub use store::EntryStore;

// Entries may only be installed through `EntryStore`, which starts their watcher
pub(crate) use entry::CacheEntry;
pub(crate) use store::{CacheStore, SharedStore};
