//! # Step context.
//!
//! [`StepCx`] is what a [`Sequence`](crate::Sequence) sees while being
//! advanced: the current tick's timing, the phase driving the dispatch, its
//! own task id, and mutable access to the scheduler for starting or stopping
//! sibling tasks mid-step.
//!
//! ## Rules
//! - A step runs inside a dispatch pass; it must not call
//!   [`Scheduler::advance`](crate::Scheduler::advance) or
//!   [`Scheduler::advance_tag`](crate::Scheduler::advance_tag) reentrantly.
//! - Stopping your own task from inside a step is allowed; the executor
//!   discards the in-flight yield and makes no further progress on it.

use crate::core::{Phase, Scheduler, Tick};
use crate::tasks::TaskId;

/// Context handed to every sequence advance.
pub struct StepCx<'a> {
    pub(crate) sched: &'a mut Scheduler,
    pub(crate) tick: Tick,
    pub(crate) phase: Phase,
    pub(crate) task: TaskId,
}

impl StepCx<'_> {
    /// Timing of the tick currently being dispatched.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Phase driving this dispatch. For nested tasks this is the phase the
    /// topmost parent is registered under.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Id of the task being advanced.
    #[inline]
    pub fn task(&self) -> TaskId {
        self.task
    }

    /// Scheduler access for starting or stopping other tasks mid-step.
    #[inline]
    pub fn scheduler(&mut self) -> &mut Scheduler {
        self.sched
    }
}
