//! SRT Timing and Synchronization
//!
//! This crate provides the monotonic clock, tick-based time arithmetic, and
//! synchronization primitives (condition variables, events, interruptible
//! timers) the SRT runtime is built on.
//!
//! Locking uses [`parking_lot`]: `Mutex::lock` returns an RAII guard that
//! releases on every exit path (the [`ScopedLock`] form) and `try_lock`
//! never blocks. [`UniqueLock`] layers a manual `unlock()` on top of the
//! guard, safe to call repeatedly. The types are re-exported here so the
//! whole workspace agrees on one lock implementation.

pub mod event;
pub mod lock;
pub mod time;
pub mod timer;

pub use event::{Condition, Event};
pub use lock::{ScopedLock, UniqueLock};
pub use parking_lot::{Condvar, Mutex, MutexGuard, RwLock};
pub use time::{
    count_microseconds, count_milliseconds, count_seconds, cpu_frequency, format_time,
    format_time_sys, microseconds_from, milliseconds_from, seconds_from, Duration, TimePoint,
};
pub use timer::{SleepResult, Timer};
