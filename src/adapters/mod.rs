//! # Suspension primitive adapter.
//!
//! Converts host wait descriptors ([`WaitFor`]) into something the step
//! executor can drive uniformly:
//!
//! ```text
//! WaitFor::Delay(d)      ─► Adapted::Seq(TimedWait)   (steppable)
//! WaitFor::Operation(p)  ─► Adapted::Seq(OpWait)      (steppable)
//! WaitFor::EndOfTick     ─► Adapted::Defer(EndOfTick) (one-shot delegation)
//! WaitFor::NextFixedTick ─► Adapted::Defer(FixedTick) (one-shot delegation)
//! zero delay             ─► Adapted::Inert            (treated as nil yield)
//! ```
//!
//! Tick-boundary waits cannot be expressed as an internally-steppable
//! sequence; the scheduler marks the task as awaiting an external cycle and
//! resumes it from its cycle queues instead.

mod probe;
mod timer;
mod wait;

pub use probe::OpWait;
pub use timer::TimedWait;
pub use wait::{CyclePoint, PollFn, Probe, WaitFor};

use crate::sequence::{seq_ref, SeqRef};

/// Result of adapting one wait descriptor.
pub(crate) enum Adapted {
    /// Drive this sequence as a nested child.
    Seq(SeqRef),
    /// Delegate one resumption to the given tick boundary.
    Defer(CyclePoint),
    /// Nothing usable; treat the yield as nil.
    Inert,
}

/// Converts a wait descriptor per the table above.
pub(crate) fn adapt(wait: WaitFor) -> Adapted {
    match wait {
        WaitFor::Delay(d) if d.is_zero() => Adapted::Inert,
        WaitFor::Delay(d) => Adapted::Seq(seq_ref(TimedWait::new(d))),
        WaitFor::EndOfTick => Adapted::Defer(CyclePoint::EndOfTick),
        WaitFor::NextFixedTick => Adapted::Defer(CyclePoint::FixedTick),
        WaitFor::Operation(probe) => Adapted::Seq(seq_ref(OpWait::new(probe))),
    }
}
