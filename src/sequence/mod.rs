//! # Resumable sequences and the yield contract.
//!
//! A [`Sequence`] is the opaque steppable work source every task wraps: the
//! scheduler repeatedly asks it to produce the next [`Yield`] or signal
//! exhaustion, and never looks inside. Sequences are explicit state machines;
//! the executor can pause between any two yields without unwinding a stack.
//!
//! ## Yield contract
//! What a sequence yields decides what the step executor does next:
//!
//! | yield                  | effect                                              |
//! |------------------------|-----------------------------------------------------|
//! | [`Yield::Pass`]        | one step, no effect                                 |
//! | [`Yield::Task`]        | nest a fresh task as the child                      |
//! | [`Yield::Adopt`]       | nest an already-scheduled task as the child         |
//! | [`Yield::Seq`]         | wrap a raw sequence in a child sharing this phase   |
//! | [`Yield::Wait`]        | suspend via the wait adapter                        |
//! | [`Yield::Value`]       | attempt typed capture (fire-and-forget tasks skip)  |
//! | [`Yield::Directive`]   | mutate task metadata, transparent to stepping       |
//!
//! Exhaustion is `Ok(None)`; faults are `Err(TaskError)` and propagate to the
//! dispatch caller after the task is purged.

mod iter;
mod step_fn;

pub use iter::IterSeq;
pub use step_fn::StepFn;

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::adapters::WaitFor;
use crate::core::{Phase, StepCx};
use crate::error::TaskError;
use crate::tasks::{TaskId, TaskSpec};

/// Outcome of one sequence advance: `Ok(Some(_))` yielded, `Ok(None)`
/// exhausted, `Err(_)` faulted.
pub type StepResult = Result<Option<Yield>, TaskError>;

/// A resumable unit of work driven one step at a time.
///
/// # Example
/// ```
/// use tickflow::{Sequence, StepCx, StepResult, Yield};
///
/// /// Counts down, yielding once per step.
/// struct Countdown(u32);
///
/// impl Sequence for Countdown {
///     fn resume(&mut self, _cx: &mut StepCx<'_>) -> StepResult {
///         if self.0 == 0 {
///             return Ok(None);
///         }
///         self.0 -= 1;
///         Ok(Some(Yield::Pass))
///     }
/// }
/// ```
pub trait Sequence {
    /// Produces the next yield, or `Ok(None)` when exhausted.
    ///
    /// `cx` exposes the current tick, the driving phase, and the scheduler
    /// (so a step may start or stop sibling tasks).
    fn resume(&mut self, cx: &mut StepCx<'_>) -> StepResult;
}

/// Shared handle to a sequence; its pointer identity is the deduplication key
/// in the scheduler's identity registry.
pub type SeqRef = Rc<RefCell<dyn Sequence>>;

/// Wraps a concrete sequence into a shared [`SeqRef`] handle.
pub fn seq_ref(seq: impl Sequence + 'static) -> SeqRef {
    Rc::new(RefCell::new(seq))
}

/// A single value produced by a sequence advance.
pub enum Yield {
    /// No effect; the step simply completes.
    Pass,
    /// A fresh, unstarted task to adopt as the nested child.
    Task(TaskSpec),
    /// An already-scheduled task to adopt as the nested child. If it has
    /// already completed, stepping skips ahead instead.
    Adopt(TaskId),
    /// A raw sequence; it is wrapped in a child task sharing this task's
    /// phase and nested.
    Seq(SeqRef),
    /// A suspension descriptor routed through the wait adapter.
    Wait(WaitFor),
    /// A plain value, offered to the task's typed result channel.
    Value(Box<dyn Any>),
    /// A control directive applied to this task's metadata, then stepping
    /// continues without consuming a pace iteration.
    Directive(Directive),
}

impl Yield {
    /// Boxes a plain value for typed capture.
    ///
    /// # Example
    /// ```
    /// use tickflow::Yield;
    ///
    /// let y = Yield::value(42i32);
    /// assert!(matches!(y, Yield::Value(_)));
    /// ```
    pub fn value<T: 'static>(value: T) -> Self {
        Yield::Value(Box::new(value))
    }
}

/// Metadata mutation applied to the yielding task itself.
///
/// Directives are transparent to stepping: the executor applies the effect
/// and immediately advances the sequence again without spending one of the
/// task's paced iterations.
pub enum Directive {
    /// Copy the phase of the named task (ignored if it no longer exists).
    MirrorPhase(TaskId),
    /// Copy the return policy of the named task (ignored if it no longer
    /// exists).
    MirrorPolicy(TaskId),
    /// Replace this task's tag.
    Retag(String),
    /// Replace this task's steps-per-tick pace (clamped as usual).
    SetPace(u32),
    /// Move this task to the given phase.
    SetPhase(Phase),
}
