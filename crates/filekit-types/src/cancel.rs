//! Cancellation primitives for long-running file operations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Trait for operation cancellation
pub trait Cancellable {
    /// Cancel the operation
    fn cancel(&self);

    /// Check if the operation is cancelled
    fn is_cancelled(&self) -> bool;
}

/// An externally settable cancellation flag.
///
/// Clones share the same flag. Transfer and comparison loops poll the token
/// at chunk boundaries only; an operation never suspends mid-chunk, so a
/// cancellation takes effect before the next chunk starts.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Every clone of this token observes the cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether the flag has been set.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Cancellable for CancelToken {
    fn cancel(&self) {
        CancelToken::cancel(self);
    }

    fn is_cancelled(&self) -> bool {
        CancelToken::is_cancelled(self)
    }
}
