//! Timestamp source injected into the book.
//!
//! Trade and order timestamps come from a [`Clock`] owned by the book instance rather
//! than ambient global time, so a book can be driven deterministically in tests.

use std::fmt;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Source of non-decreasing timestamps in nanoseconds.
pub trait Clock: Send + fmt::Debug {
    fn now(&mut self) -> u64;
}

/// Wall-clock anchored at construction and advanced by a monotonic [`Instant`], so
/// readings never go backwards even if the system clock is adjusted.
#[derive(Debug)]
pub struct WallClock {
    origin_nanos: u64,
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        let origin_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self {
            origin_nanos,
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&mut self) -> u64 {
        self.origin_nanos
            .saturating_add(self.origin.elapsed().as_nanos() as u64)
    }
}

/// Deterministic clock: returns `start`, then advances by `step` on every reading.
#[derive(Clone, Debug)]
pub struct StepClock {
    next: u64,
    step: u64,
}

impl StepClock {
    pub fn new(start: u64, step: u64) -> Self {
        Self { next: start, step }
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Clock for StepClock {
    fn now(&mut self) -> u64 {
        let t = self.next;
        self.next = self.next.saturating_add(self.step);
        t
    }
}
