//! Concurrency Guard
//!
//! One mutual-exclusion lock per store instance.
//!
//! ## Rules
//! - Every operation that reads or mutates store state runs inside `with`
//! - The lock is held for the operation's full body, including multi-segment transfers
//! - No reentrancy: a closure passed to `with` must not call back into the same store
//! - The guarded state never escapes the closure, so no caller holds a raw handle
//!   to the backing memory

use parking_lot::Mutex;

/// Exclusive guard around a store's mutable state
pub struct Guard<T> {
    state: Mutex<T>,
}

impl<T> Guard<T> {
    /// Wrap the given state
    pub fn new(state: T) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Run `f` with exclusive access to the state
    ///
    /// Blocks until the lock is available. The lock is released when `f`
    /// returns, on both success and error paths.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut state = self.state.lock();
        f(&mut state)
    }

    /// Consume the guard and return the state (shutdown path)
    pub fn into_inner(self) -> T {
        self.state.into_inner()
    }
}
