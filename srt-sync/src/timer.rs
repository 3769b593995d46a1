//! Interruptible timer
//!
//! The packet pacer sleeps on a `Timer` between sends. The sleep can be cut
//! short from another thread (`interrupt`), e.g. when new data arrives or
//! the connection closes, and nudged (`tick`) without moving the deadline.

use crate::event::Condition;
use crate::time::{milliseconds_from, Duration, TimePoint};
use parking_lot::Mutex;
use tracing::trace;

/// How a call to [`Timer::sleep_until`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepResult {
    /// The deadline was reached.
    DeadlineReached,
    /// Another thread called [`Timer::interrupt`] before the deadline.
    Interrupted,
}

struct SleepState {
    sched: TimePoint,
    interrupted: bool,
}

/// An interruptible deadline sleeper.
pub struct Timer {
    state: Mutex<SleepState>,
    cond: Condition,
}

impl Timer {
    /// Create a new timer with no deadline scheduled.
    pub const fn new() -> Self {
        Timer {
            state: Mutex::new(SleepState {
                sched: TimePoint::zero(),
                interrupted: false,
            }),
            cond: Condition::new(),
        }
    }

    // Timers below the threshold are spun out rather than slept, since the
    // OS cannot be trusted to wake us with sub-millisecond precision.
    fn busy_wait_threshold() -> Duration {
        if cfg!(windows) {
            milliseconds_from(10)
        } else {
            milliseconds_from(1)
        }
    }

    /// Suspend the calling thread until `deadline`, or until another thread
    /// calls [`interrupt`](Self::interrupt).
    ///
    /// The final stretch before the deadline is a busy loop, giving the
    /// pacer sub-millisecond accuracy at the cost of one briefly spinning
    /// core. Spurious wakeups are absorbed internally.
    pub fn sleep_until(&self, deadline: TimePoint) -> SleepResult {
        {
            let mut st = self.state.lock();
            st.sched = deadline;
            st.interrupted = false;
        }

        let threshold = Self::busy_wait_threshold();
        let mut cur = TimePoint::now();

        let sched = loop {
            let mut st = self.state.lock();
            if st.interrupted {
                return SleepResult::Interrupted;
            }
            if cur >= st.sched {
                break st.sched;
            }
            let remaining = st.sched - cur;
            if remaining <= threshold + threshold {
                break st.sched;
            }
            // leave the threshold to the busy loop below
            self.cond.wait_for(&mut st, remaining - threshold);
            drop(st);
            cur = TimePoint::now();
        };

        while cur < sched {
            std::hint::spin_loop();
            cur = TimePoint::now();
        }
        SleepResult::DeadlineReached
    }

    /// Sleep for a relative duration; see [`sleep_until`](Self::sleep_until).
    pub fn sleep_for(&self, rel_time: Duration) -> SleepResult {
        self.sleep_until(TimePoint::now() + rel_time)
    }

    /// Cut the current sleep short.
    ///
    /// Rewrites the scheduled deadline to now and wakes every waiter; an
    /// in-progress `sleep_until` returns [`SleepResult::Interrupted`].
    pub fn interrupt(&self) {
        let mut st = self.state.lock();
        st.sched = TimePoint::now();
        st.interrupted = true;
        trace!("timer interrupted");
        self.cond.notify_all();
    }

    /// Wake one waiter without changing the deadline.
    pub fn tick(&self) {
        self.cond.notify_one();
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
