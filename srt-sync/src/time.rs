//! Monotonic time source for SRT
//!
//! The protocol measures everything (pacing, RTT, timeouts) on a monotonic
//! microsecond clock. This module provides the tick-count time point and
//! duration types the rest of the workspace builds on, plus the conversion
//! and formatting helpers.

use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::sync::OnceLock;
use std::time::{Duration as StdDuration, Instant};

/// Anchor of the process monotonic clock, captured once on first use.
static CLOCK_ANCHOR: OnceLock<Instant> = OnceLock::new();

fn anchor() -> Instant {
    *CLOCK_ANCHOR.get_or_init(Instant::now)
}

/// Ticks per microsecond of the tick source.
///
/// The tick source is `std::time::Instant` (CLOCK_MONOTONIC and friends)
/// normalized to microseconds, so the frequency is a constant. Conversions
/// below still multiply/divide by it, keeping the arithmetic uniform should
/// the tick source ever change resolution.
#[inline]
pub const fn cpu_frequency() -> i64 {
    1
}

/// A point on the process monotonic clock, as a 64-bit tick count.
///
/// Tick 0 is reserved for the null time point (`TimePoint::zero()`), used
/// for "not yet scheduled" timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint(u64);

impl TimePoint {
    /// Read the current time from the monotonic source.
    #[inline]
    pub fn now() -> Self {
        // +1 keeps tick 0 reserved for the null time point
        TimePoint(anchor().elapsed().as_micros() as u64 * cpu_frequency() as u64 + 1)
    }

    /// The null time point.
    #[inline]
    pub const fn zero() -> Self {
        TimePoint(0)
    }

    /// Whether this is the null time point.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Construct a time point from microseconds since the clock epoch.
    #[inline]
    pub fn from_micros(us: u64) -> Self {
        TimePoint(us * cpu_frequency() as u64)
    }

    /// Microseconds since the clock epoch.
    #[inline]
    pub fn us_since_epoch(&self) -> u64 {
        self.0 / cpu_frequency() as u64
    }

    /// Map onto the underlying `Instant` timeline, for handing absolute
    /// deadlines to the platform wait primitives.
    pub fn as_instant(&self) -> Instant {
        anchor() + StdDuration::from_micros(self.us_since_epoch())
    }
}

/// A signed tick count between two time points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    /// The zero-length duration.
    #[inline]
    pub const fn zero() -> Self {
        Duration(0)
    }

    /// Raw tick count.
    #[inline]
    pub fn count(&self) -> i64 {
        self.0
    }

    /// Convert to `std::time::Duration`, clamping negative values to zero.
    pub fn to_std(self) -> StdDuration {
        if self.0 <= 0 {
            StdDuration::ZERO
        } else {
            StdDuration::from_micros(count_microseconds(self) as u64)
        }
    }
}

/// Whole microseconds in `d`, truncating.
#[inline]
pub fn count_microseconds(d: Duration) -> i64 {
    d.0 / cpu_frequency()
}

/// Whole milliseconds in `d`, truncating.
#[inline]
pub fn count_milliseconds(d: Duration) -> i64 {
    d.0 / cpu_frequency() / 1000
}

/// Whole seconds in `d`, truncating.
#[inline]
pub fn count_seconds(d: Duration) -> i64 {
    d.0 / cpu_frequency() / 1_000_000
}

/// A duration of `us` microseconds.
#[inline]
pub fn microseconds_from(us: i64) -> Duration {
    Duration(us * cpu_frequency())
}

/// A duration of `ms` milliseconds.
///
/// Multiplies before converting so low-frequency tick sources keep full
/// precision.
#[inline]
pub fn milliseconds_from(ms: i64) -> Duration {
    Duration((ms * 1000) * cpu_frequency())
}

/// A duration of `s` seconds.
#[inline]
pub fn seconds_from(s: i64) -> Duration {
    Duration((s * 1_000_000) * cpu_frequency())
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0 + rhs.0)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl Add<Duration> for TimePoint {
    type Output = TimePoint;

    fn add(self, d: Duration) -> TimePoint {
        TimePoint((self.0 as i64 + d.0).max(0) as u64)
    }
}

impl AddAssign<Duration> for TimePoint {
    fn add_assign(&mut self, d: Duration) {
        *self = *self + d;
    }
}

impl Sub<Duration> for TimePoint {
    type Output = TimePoint;

    fn sub(self, d: Duration) -> TimePoint {
        TimePoint((self.0 as i64 - d.0).max(0) as u64)
    }
}

impl SubAssign<Duration> for TimePoint {
    fn sub_assign(&mut self, d: Duration) {
        *self = *self - d;
    }
}

impl Sub for TimePoint {
    type Output = Duration;

    fn sub(self, other: TimePoint) -> Duration {
        Duration(self.0 as i64 - other.0 as i64)
    }
}

/// Render a monotonic time point as `[{D}D ]HH:MM:SS.uuuuuu [STD]`.
///
/// The null time point renders as `00:00:00.000000` with no suffix.
pub fn format_time(tp: TimePoint) -> String {
    if tp.is_zero() {
        return "00:00:00.000000".to_string();
    }

    let total_us = tp.us_since_epoch();
    let us = total_us % 1_000_000;
    let total_sec = total_us / 1_000_000;

    let days = total_sec / (60 * 60 * 24);
    let hours = total_sec / (60 * 60) % 24;
    let minutes = total_sec / 60 % 60;
    let seconds = total_sec % 60;

    if days > 0 {
        format!("{days}D {hours:02}:{minutes:02}:{seconds:02}.{us:06} [STD]")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{us:06} [STD]")
    }
}

/// Render a monotonic time point anchored to the local wall clock, as
/// `HH:MM:SS.uuuuuu [SYS]`.
///
/// Samples both clocks once per call; the microsecond suffix comes from the
/// monotonic value so log lines from the two formats line up.
pub fn format_time_sys(tp: TimePoint) -> String {
    let now_tp = TimePoint::now();
    let delta_us = count_microseconds(tp - now_tp);
    let wall = chrono::Local::now() + chrono::Duration::microseconds(delta_us);
    format!(
        "{}.{:06} [SYS]",
        wall.format("%H:%M:%S"),
        tp.us_since_epoch() % 1_000_000
    )
}
