//! Repeating interval timer on a logical clock
//!
//! The timer never reads wall-clock time. The host advances it by a number
//! of milliseconds and gets back how many times it fired, which keeps ticks
//! deterministic and strictly sequential.

use crate::error::{Result, TextLoopError};

/// A repeating timer that fires once every `interval_ms`
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    interval_ms: u64,
    /// Milliseconds accumulated since the last fire
    elapsed_ms: u64,
    armed: bool,
    fired: u64,
}

impl IntervalTimer {
    /// Create a disarmed timer
    pub fn new(interval_ms: u64) -> Result<Self> {
        if interval_ms == 0 {
            return Err(TextLoopError::InvalidInterval(interval_ms));
        }
        Ok(Self {
            interval_ms,
            elapsed_ms: 0,
            armed: false,
            fired: 0,
        })
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Arm the timer; the first fire happens one full interval from now
    pub fn start(&mut self) {
        self.armed = true;
        self.elapsed_ms = 0;
    }

    /// Disarm the timer. Pending time is discarded.
    pub fn stop(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Total number of fires since creation
    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    /// Milliseconds until the next fire, `None` while disarmed
    pub fn remaining_ms(&self) -> Option<u64> {
        self.armed.then(|| self.interval_ms - self.elapsed_ms)
    }

    /// Advance the clock and return how many times the timer fired
    pub fn advance(&mut self, dt_ms: u64) -> u64 {
        if !self.armed {
            return 0;
        }

        let total = self.elapsed_ms.saturating_add(dt_ms);
        let fires = total / self.interval_ms;
        self.elapsed_ms = total % self.interval_ms;
        self.fired = self.fired.saturating_add(fires);
        fires
    }
}
