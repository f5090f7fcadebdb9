//! Engine time model.
//!
//! # Design
//!
//! Time is a monotonic millisecond counter, `Timestamp`.  The engine never
//! reads a clock itself: the driver passes `now` into every `tick`, which
//! keeps the engine testable with synthetic timestamps.  The counter's
//! origin is arbitrary (process start, a test's `t0`, …); only differences
//! are meaningful.
//!
//! Drivers that run at a fixed cadence can use `FrameClock` to produce the
//! timestamps.

use std::fmt;

// ── Timestamp ────────────────────────────────────────────────────────────────

/// A monotonic timestamp in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Return the timestamp `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, or `0` if `earlier`
    /// is in the future (clock went backwards).
    #[inline]
    pub fn saturating_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: u64) -> Timestamp {
        self.offset(rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Fixed-cadence timestamp source for drivers.
///
/// `FrameClock` is cheap to copy and intentionally holds no heap data.
#[derive(Copy, Clone, Debug)]
pub struct FrameClock {
    /// Timestamp of frame 0.
    pub start: Timestamp,
    /// Milliseconds between consecutive frames.
    pub frame_interval_ms: u64,
    /// Frames advanced so far.
    pub frame: u64,
}

impl FrameClock {
    pub fn new(start: Timestamp, frame_interval_ms: u64) -> Self {
        Self {
            start,
            frame_interval_ms,
            frame: 0,
        }
    }

    /// Timestamp of the current frame.
    #[inline]
    pub fn now(&self) -> Timestamp {
        self.start
            .offset(self.frame.saturating_mul(self.frame_interval_ms))
    }

    /// Advance one frame and return the new current timestamp.
    #[inline]
    pub fn advance(&mut self) -> Timestamp {
        self.frame += 1;
        self.now()
    }

    /// Simulated milliseconds since frame 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.now().saturating_since(self.start)
    }

    /// How many frames span `ms` milliseconds? (rounds up)
    #[inline]
    pub fn frames_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.frame_interval_ms.max(1))
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_ms() / 1_000;
        write!(f, "frame {} ({:02}:{:02})", self.frame, secs / 60, secs % 60)
    }
}
