//! # Suspension descriptors.
//!
//! [`WaitFor`] is the host-facing vocabulary of waits a sequence may yield.
//! The adapter ([`adapt`](crate::adapters::adapt)) converts each descriptor
//! into something the scheduler can drive uniformly:
//!
//! - time waits become an internally-steppable sequence,
//! - probe waits become a sequence polling a finished-yet condition,
//! - tick-boundary waits cannot be stepped internally and instead delegate
//!   one resumption to the scheduler's cycle queues.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Host tick boundary a task can delegate one resumption to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePoint {
    /// End of the dispatch call currently in flight.
    EndOfTick,
    /// Start of the next `PerFixedTick` dispatch.
    FixedTick,
}

impl CyclePoint {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            CyclePoint::EndOfTick => "end_of_tick",
            CyclePoint::FixedTick => "fixed_tick",
        }
    }
}

/// Finished-yet probe for an external asynchronous operation.
///
/// The polling task re-evaluates the probe once per advance. Pausing the
/// polling task suspends the re-evaluation only; the underlying operation
/// keeps running.
pub trait Probe {
    /// Returns true once the external operation has finished.
    fn is_finished(&mut self) -> bool;
}

/// Closure-backed probe.
pub struct PollFn<F>(F);

impl<F> PollFn<F>
where
    F: FnMut() -> bool,
{
    /// Wraps a closure returning true once the operation has finished.
    pub fn new(f: F) -> Self {
        PollFn(f)
    }
}

impl<F> Probe for PollFn<F>
where
    F: FnMut() -> bool,
{
    fn is_finished(&mut self) -> bool {
        (self.0)()
    }
}

/// A spawned tokio task is an external operation; `is_finished` is a
/// non-blocking poll of its handle.
impl<T> Probe for JoinHandle<T> {
    fn is_finished(&mut self) -> bool {
        JoinHandle::is_finished(self)
    }
}

/// A wait descriptor yielded by a sequence.
pub enum WaitFor {
    /// Wait until the given amount of phase time has elapsed. Zero waits are
    /// inert (treated as a nil yield).
    Delay(Duration),
    /// Wait until the end of the dispatch call currently in flight.
    EndOfTick,
    /// Wait until the next `PerFixedTick` dispatch begins.
    NextFixedTick,
    /// Wait until the probed external operation reports finished.
    Operation(Box<dyn Probe>),
}

impl WaitFor {
    /// Builds a delay from fractional seconds. Non-finite or non-positive
    /// inputs produce an inert zero delay.
    pub fn secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            WaitFor::Delay(Duration::from_secs_f64(secs))
        } else {
            WaitFor::Delay(Duration::ZERO)
        }
    }

    /// Wraps any probe into an operation wait.
    pub fn operation(probe: impl Probe + 'static) -> Self {
        WaitFor::Operation(Box::new(probe))
    }
}
