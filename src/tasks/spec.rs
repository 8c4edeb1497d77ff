//! # Task specification.
//!
//! Defines [`TaskSpec`], the configuration bundle a caller hands to
//! [`Scheduler::start`](crate::Scheduler::start): the sequence plus phase,
//! return policy, tag, pace, result channel, and completion callback.
//!
//! A spec can be created:
//! - **Explicitly** with [`TaskSpec::new`] plus `with_*` builders
//! - **From config** with [`TaskSpec::with_defaults`] (inherit defaults)
//!
//! ## Rules
//! - A spec is `Unstarted`: building one has no registry side effects.
//! - The two completion callbacks (void / with-value) are mutually
//!   exclusive; setting one replaces the other.
//!
//! ## Example
//! ```rust
//! use tickflow::{IterSeq, Phase, ReturnPolicy, TaskSpec, Yield};
//!
//! let mut spec = TaskSpec::wrap(IterSeq::of(vec![Yield::value(1i32)]))
//!     .with_phase(Phase::PerFixedTick)
//!     .with_tag("enemy")
//!     .with_policy(ReturnPolicy::FirstThenStop);
//! let slot = spec.capture::<i32>();
//! # let _ = (spec, slot);
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::config::SchedulerConfig;
use crate::core::Phase;
use crate::policies::{Pace, ReturnPolicy};
use crate::sequence::{seq_ref, SeqRef, Sequence};
use crate::tasks::task::{CaptureSink, CompleteHook};
use crate::tasks::Status;

/// Typed handle to a task's captured result.
///
/// Cloning is cheap; every clone views the same slot. The slot fills when a
/// yielded value matches the task's result type under its
/// [`ReturnPolicy`](crate::ReturnPolicy).
pub struct ReturnSlot<R> {
    inner: Rc<RefCell<Option<R>>>,
}

impl<R> Clone for ReturnSlot<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R> ReturnSlot<R> {
    fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(None)),
        }
    }

    pub(crate) fn set(&self, value: R) {
        *self.inner.borrow_mut() = Some(value);
    }

    /// Removes and returns the captured value, if any.
    pub fn take(&self) -> Option<R> {
        self.inner.borrow_mut().take()
    }

    /// Returns true while no value has been captured (or after `take`).
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_none()
    }
}

impl<R: Clone> ReturnSlot<R> {
    /// Returns a copy of the captured value, leaving it in place.
    pub fn get(&self) -> Option<R> {
        self.inner.borrow().clone()
    }
}

/// Specification for a task: one sequence plus scheduling metadata.
pub struct TaskSpec {
    pub(crate) seq: SeqRef,
    pub(crate) phase: Phase,
    pub(crate) policy: ReturnPolicy,
    pub(crate) tag: Arc<str>,
    pub(crate) pace: Pace,
    pub(crate) capture: Option<CaptureSink>,
    pub(crate) on_complete: Option<CompleteHook>,
}

impl TaskSpec {
    /// Creates a spec from a shared sequence handle.
    ///
    /// Defaults: `Phase::PerFrame`, `ReturnPolicy::FirstThenStop`, untagged,
    /// pace 1, no result channel, no completion callback.
    pub fn new(seq: SeqRef) -> Self {
        Self {
            seq,
            phase: Phase::PerFrame,
            policy: ReturnPolicy::default(),
            tag: Arc::from(""),
            pace: Pace::default(),
            capture: None,
            on_complete: None,
        }
    }

    /// Convenience: wraps a concrete sequence, then builds a spec.
    pub fn wrap(seq: impl Sequence + 'static) -> Self {
        Self::new(seq_ref(seq))
    }

    /// Creates a spec inheriting phase, policy, and pace from the scheduler
    /// configuration.
    pub fn with_defaults(seq: SeqRef, cfg: &SchedulerConfig) -> Self {
        Self {
            phase: cfg.default_phase,
            policy: cfg.default_policy,
            pace: cfg.default_pace(),
            ..Self::new(seq)
        }
    }

    /// Returns a new spec with the given phase.
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Returns a new spec with the given return policy.
    pub fn with_policy(mut self, policy: ReturnPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns a new spec with the given tag (empty = untagged).
    pub fn with_tag(mut self, tag: impl Into<Arc<str>>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Returns a new spec with the given steps-per-tick pace (clamped).
    pub fn with_pace(mut self, pace: impl Into<Pace>) -> Self {
        self.pace = pace.into();
        self
    }

    /// Sets the parameterless completion callback, replacing any previous
    /// callback.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Opens a typed result channel and returns its slot.
    ///
    /// Yielded values are offered to the channel via a checked downcast to
    /// `R`; non-matching values are silently ignored. Without a channel the
    /// task is fire-and-forget and plain yields have no effect.
    pub fn capture<R: 'static>(&mut self) -> ReturnSlot<R> {
        let slot = ReturnSlot::new();
        let sink = slot.clone();
        self.capture = Some(Box::new(move |value: Box<dyn Any>| {
            match value.downcast::<R>() {
                Ok(v) => {
                    sink.set(*v);
                    true
                }
                Err(_) => false,
            }
        }));
        slot
    }

    /// Opens a typed result channel and registers a completion callback that
    /// receives whatever the channel holds at termination. Replaces any
    /// previously set callback.
    pub fn capture_then<R: 'static>(
        &mut self,
        f: impl FnOnce(Option<R>) + 'static,
    ) -> ReturnSlot<R> {
        let slot = self.capture::<R>();
        let view = slot.clone();
        self.on_complete = Some(Box::new(move || f(view.take())));
        slot
    }

    /// Returns a shared handle to the wrapped sequence.
    pub fn sequence(&self) -> SeqRef {
        self.seq.clone()
    }

    /// A spec is the `Unstarted` form of a task; it transitions to
    /// [`Status::Running`](crate::Status::Running) when handed to
    /// [`Scheduler::start`](crate::Scheduler::start).
    pub fn status(&self) -> Status {
        Status::Unstarted
    }

    /// Returns the configured phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the configured return policy.
    pub fn policy(&self) -> ReturnPolicy {
        self.policy
    }

    /// Returns the configured tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the configured pace.
    pub fn pace(&self) -> Pace {
        self.pace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::IterSeq;

    fn empty() -> TaskSpec {
        TaskSpec::wrap(IterSeq::of(Vec::new()))
    }

    #[test]
    fn test_defaults() {
        let spec = empty();
        assert_eq!(spec.status(), Status::Unstarted);
        assert_eq!(spec.phase(), Phase::PerFrame);
        assert_eq!(spec.policy(), ReturnPolicy::FirstThenStop);
        assert_eq!(spec.tag(), "");
        assert_eq!(spec.pace().get(), 1);
        assert!(spec.capture.is_none());
        assert!(spec.on_complete.is_none());
    }

    #[test]
    fn test_with_defaults_inherits_config() {
        let mut cfg = SchedulerConfig::default();
        cfg.default_phase = Phase::GuiTick;
        cfg.default_policy = ReturnPolicy::LastContinuously;
        cfg.default_steps = 4;

        let spec = TaskSpec::with_defaults(seq_ref(IterSeq::of(Vec::new())), &cfg);
        assert_eq!(spec.phase(), Phase::GuiTick);
        assert_eq!(spec.policy(), ReturnPolicy::LastContinuously);
        assert_eq!(spec.pace().get(), 4);
    }

    #[test]
    fn test_capture_sink_downcasts() {
        let mut spec = empty();
        let slot = spec.capture::<i32>();
        let mut sink = spec.capture.take().unwrap();

        assert!(!sink(Box::new("nope")));
        assert!(slot.is_empty());
        assert!(sink(Box::new(5i32)));
        assert_eq!(slot.get(), Some(5));
    }

    #[test]
    fn test_capture_then_feeds_callback() {
        let got: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
        let seen = got.clone();

        let mut spec = empty();
        let _slot = spec.capture_then::<i32>(move |v| *seen.borrow_mut() = v);
        let mut sink = spec.capture.take().unwrap();
        assert!(sink(Box::new(9i32)));

        (spec.on_complete.take().unwrap())();
        assert_eq!(*got.borrow(), Some(9));
    }

    #[test]
    fn test_slot_take_clears() {
        let mut spec = empty();
        let slot = spec.capture::<u8>();
        let mut sink = spec.capture.take().unwrap();
        sink(Box::new(1u8));
        assert_eq!(slot.take(), Some(1));
        assert!(slot.is_empty());
        assert_eq!(slot.take(), None);
    }
}
