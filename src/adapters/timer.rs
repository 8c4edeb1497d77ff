//! # Timed wait sequence.
//!
//! Converts a `WaitFor::Delay` into a steppable sequence that accumulates
//! the host's per-tick delta on every advance and exhausts exactly once when
//! the threshold is crossed.
//!
//! Scaled and unscaled time accumulate in parallel; which one is checked
//! against the threshold depends on the phase driving the advance
//! ([`Phase::uses_unscaled_time`](crate::Phase::uses_unscaled_time)), so a
//! two-second wait means two real seconds in the editor phase and two game
//! seconds everywhere else.

use std::time::Duration;

use crate::core::StepCx;
use crate::sequence::{Sequence, StepResult, Yield};

/// Sequence that waits for a duration of phase time.
pub struct TimedWait {
    target: Duration,
    scaled: Duration,
    unscaled: Duration,
}

impl TimedWait {
    /// Creates a wait for the given duration.
    pub fn new(target: Duration) -> Self {
        Self {
            target,
            scaled: Duration::ZERO,
            unscaled: Duration::ZERO,
        }
    }

    /// Time accumulated so far on the scaled path.
    pub fn elapsed(&self) -> Duration {
        self.scaled
    }

    /// Time accumulated so far on the unscaled path.
    pub fn elapsed_unscaled(&self) -> Duration {
        self.unscaled
    }
}

impl Sequence for TimedWait {
    fn resume(&mut self, cx: &mut StepCx<'_>) -> StepResult {
        let tick = cx.tick();
        self.scaled += tick.delta;
        self.unscaled += tick.unscaled;

        let elapsed = if cx.phase().uses_unscaled_time() {
            self.unscaled
        } else {
            self.scaled
        };

        if elapsed >= self.target {
            Ok(None)
        } else {
            Ok(Some(Yield::Pass))
        }
    }
}
