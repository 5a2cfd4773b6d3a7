//! Lifetime Module
//!
//! A caller-owned, cancellable deadline that governs how long a stored entry
//! may live. The store never starts or extends a lifetime, it only waits for
//! it to complete.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

// == Lifetime ==
/// Cancellable deadline handed to [`EntryStore::set`](crate::cache::EntryStore::set).
///
/// A lifetime completes when its deadline passes or when it is cancelled,
/// whichever happens first. Both are treated the same by the expiration
/// watcher. Clones share the same cancellation state.
#[derive(Debug, Clone)]
pub struct Lifetime {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Lifetime {
    // == Constructors ==
    /// A lifetime with no deadline. It only completes when cancelled.
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// A lifetime that completes `timeout` from now.
    ///
    /// A timeout too large to represent as an instant yields a lifetime
    /// with no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::background(),
        }
    }

    /// A lifetime that completes at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Derives a lifetime that completes `timeout` from now, or earlier if
    /// this one completes first. Cancelling the child leaves the parent alive.
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let deadline = match (self.deadline, Instant::now().checked_add(timeout)) {
            (Some(parent), Some(own)) => Some(parent.min(own)),
            (parent, own) => parent.or(own),
        };
        Self {
            token: self.token.child_token(),
            deadline,
        }
    }

    // == Cancel ==
    /// Completes the lifetime early. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    // == Accessors ==
    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true once the lifetime has been cancelled or its deadline has passed.
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    // == Done ==
    /// Resolves when the lifetime completes. Resolves immediately if it
    /// already has.
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = sleep_until(deadline) => {}
                }
            }
            None => self.token.cancelled().await,
        }
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::background()
    }
}
