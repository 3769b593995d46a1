//! Condition variables and events
//!
//! `Condition` adapts `parking_lot::Condvar` to the workspace's tick-based
//! time types; `Event` bundles it with its own mutex for the common
//! wait/notify pattern used by the timer and the protocol worker threads.

use crate::time::{Duration, TimePoint};
use parking_lot::{Condvar, Mutex, MutexGuard};

/// A condition variable speaking monotonic tick time.
///
/// Timed waits are backed by the monotonic clock, so they are immune to
/// wall-clock jumps. Spurious wakeups are permitted on every wait form;
/// callers loop on their predicate.
pub struct Condition {
    cv: Condvar,
}

impl Condition {
    /// Create a new condition variable.
    pub const fn new() -> Self {
        Condition { cv: Condvar::new() }
    }

    /// Release the lock, suspend until notified, reacquire before returning.
    pub fn wait<T>(&self, guard: &mut MutexGuard<'_, T>) {
        self.cv.wait(guard);
    }

    /// As [`wait`](Self::wait), with a relative timeout.
    ///
    /// Returns `false` iff the timeout elapsed with no notification.
    /// Non-positive durations are treated as an immediate timeout check.
    pub fn wait_for<T>(&self, guard: &mut MutexGuard<'_, T>, rel_time: Duration) -> bool {
        !self.cv.wait_for(guard, rel_time.to_std()).timed_out()
    }

    /// As [`wait`](Self::wait), with an absolute deadline.
    ///
    /// Returns `false` without suspending if `deadline` is already past;
    /// otherwise waits against the deadline mapped onto the underlying
    /// `Instant` timeline, so the wait is unaffected by how long the caller
    /// held the lock before getting here.
    pub fn wait_until<T>(&self, guard: &mut MutexGuard<'_, T>, deadline: TimePoint) -> bool {
        if TimePoint::now() >= deadline {
            return false;
        }
        !self.cv.wait_until(guard, deadline.as_instant()).timed_out()
    }

    /// Wake one waiter. May be called without holding the lock.
    pub fn notify_one(&self) {
        self.cv.notify_one();
    }

    /// Wake all waiters. May be called without holding the lock.
    pub fn notify_all(&self) {
        self.cv.notify_all();
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::new()
    }
}

/// A mutex + condition pair.
///
/// Waiters either bring their own guard (`wait*`, after calling [`lock`])
/// or use the `lock_wait*` forms that acquire and release around a single
/// wait. The predicate being waited on must be read under the same lock.
pub struct Event {
    lock: Mutex<()>,
    cond: Condition,
}

impl Event {
    /// Create a new event.
    pub const fn new() -> Self {
        Event {
            lock: Mutex::new(()),
            cond: Condition::new(),
        }
    }

    /// Acquire the event's mutex.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock()
    }

    /// Wait on the event with a caller-held guard.
    pub fn wait(&self, guard: &mut MutexGuard<'_, ()>) {
        self.cond.wait(guard);
    }

    /// Timed wait with a caller-held guard; `false` iff it timed out.
    pub fn wait_for(&self, guard: &mut MutexGuard<'_, ()>, rel_time: Duration) -> bool {
        self.cond.wait_for(guard, rel_time)
    }

    /// Deadline wait with a caller-held guard; `false` iff it timed out.
    pub fn wait_until(&self, guard: &mut MutexGuard<'_, ()>, deadline: TimePoint) -> bool {
        self.cond.wait_until(guard, deadline)
    }

    /// Acquire the lock and wait until notified.
    pub fn lock_wait(&self) {
        let mut guard = self.lock.lock();
        self.cond.wait(&mut guard);
    }

    /// Acquire the lock and wait with a relative timeout.
    pub fn lock_wait_for(&self, rel_time: Duration) -> bool {
        let mut guard = self.lock.lock();
        self.cond.wait_for(&mut guard, rel_time)
    }

    /// Acquire the lock and wait until a deadline.
    pub fn lock_wait_until(&self, deadline: TimePoint) -> bool {
        let mut guard = self.lock.lock();
        self.cond.wait_until(&mut guard, deadline)
    }

    /// Wake one waiter.
    pub fn notify_one(&self) {
        self.cond.notify_one();
    }

    /// Wake all waiters.
    pub fn notify_all(&self) {
        self.cond.notify_all();
    }

    /// The process-wide default event.
    ///
    /// Const-constructed, so it carries no initialization-order hazard.
    pub fn global() -> &'static Event {
        static GLOBAL: Event = Event::new();
        &GLOBAL
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}
