//! Scoped locking
//!
//! The plain `parking_lot` guard acquires on construction and releases at
//! scope exit on every path, which covers most locking in the workspace.
//! [`UniqueLock`] adds the manual release the protocol loops occasionally
//! need: drop the lock in the middle of a scope, with any later `unlock`
//! call doing nothing.

use parking_lot::{Mutex, MutexGuard};
use std::ops::{Deref, DerefMut};

/// A guard held for exactly one scope.
pub type ScopedLock<'a, T> = MutexGuard<'a, T>;

/// A mutex guard with a manual, idempotent unlock.
///
/// Behaves like a plain guard until [`unlock`](Self::unlock) is called;
/// after that the lock is released and further `unlock` calls are no-ops.
/// Accessing the protected data after unlocking is a caller bug and
/// panics.
pub struct UniqueLock<'a, T: ?Sized> {
    guard: Option<MutexGuard<'a, T>>,
}

impl<'a, T: ?Sized> UniqueLock<'a, T> {
    /// Acquire `mutex`, holding it until scope exit or [`unlock`](Self::unlock).
    pub fn new(mutex: &'a Mutex<T>) -> Self {
        UniqueLock {
            guard: Some(mutex.lock()),
        }
    }

    /// Release the lock now. Every call after the first does nothing.
    pub fn unlock(&mut self) {
        drop(self.guard.take());
    }

    /// Whether the lock is still held.
    pub fn owns_lock(&self) -> bool {
        self.guard.is_some()
    }
}

impl<T: ?Sized> Deref for UniqueLock<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.guard {
            Some(guard) => &**guard,
            None => panic!("mutex accessed after unlock()"),
        }
    }
}

impl<T: ?Sized> DerefMut for UniqueLock<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.guard {
            Some(guard) => &mut **guard,
            None => panic!("mutex accessed after unlock()"),
        }
    }
}
