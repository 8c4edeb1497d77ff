//! # Task record and status state machine.
//!
//! [`Task`] is the scheduler-internal record binding one sequence to its
//! scheduling metadata. Callers never hold a `Task` directly; they hold a
//! [`TaskId`] and go through [`Scheduler`](crate::Scheduler) operations.
//!
//! ## Status machine
//! ```text
//! Unstarted ──start──► Running ◄──unpause── Paused
//!                        │  └───pause──────►  │
//!                        └──────stop──────► Complete (terminal)
//!                                             ▲
//!                        Paused ──forced stop─┘
//! ```
//!
//! ## Rules
//! - `Complete` is terminal; a completed task is purged from every registry
//!   and its id dangles (all operations on it return `false`).
//! - A nested task is excluded from the phase registries; only its parent
//!   drives it.

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::adapters::CyclePoint;
use crate::core::Phase;
use crate::policies::{Pace, ReturnPolicy};
use crate::sequence::SeqRef;

/// Opaque handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

impl TaskId {
    #[cfg(test)]
    pub(crate) fn test(n: u64) -> Self {
        TaskId(n)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// Identity key of a sequence handle: the `Rc` allocation address.
///
/// Valid for dedup lookups because every registered task keeps its sequence
/// `Rc` alive for as long as the entry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SeqKey(*const ());

impl SeqKey {
    pub(crate) fn of(seq: &SeqRef) -> Self {
        SeqKey(Rc::as_ptr(seq) as *const ())
    }
}

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Created but not yet handed to a scheduler; this is what a
    /// [`TaskSpec`](crate::TaskSpec) reports.
    Unstarted,
    /// Eligible for dispatch.
    Running,
    /// Retains all progress but is skipped by dispatch.
    Paused,
    /// Terminal; the task no longer exists in any registry.
    Complete,
}

/// Erased capture hook; returns `true` when the offered value matched the
/// task's result type and was written to the slot.
pub(crate) type CaptureSink = Box<dyn FnMut(Box<dyn Any>) -> bool>;

/// Completion callback, invoked exactly once when the task terminates.
pub(crate) type CompleteHook = Box<dyn FnOnce()>;

/// Scheduler-internal record for one live task.
pub(crate) struct Task {
    /// The wrapped sequence; identity is the dedup key. Immutable.
    pub(crate) seq: SeqRef,
    pub(crate) status: Status,
    pub(crate) phase: Phase,
    pub(crate) policy: ReturnPolicy,
    pub(crate) tag: Arc<str>,
    pub(crate) pace: Pace,
    /// Advances already performed during the current dispatch call.
    pub(crate) steps_done: u32,
    /// At most one nested child, owned exclusively while nesting is active.
    pub(crate) child: Option<TaskId>,
    /// True while owned as someone's child; such tasks are excluded from the
    /// phase registries and driven only by their parent.
    pub(crate) nested: bool,
    /// Set while one resumption is delegated to an external tick boundary;
    /// normal dispatch skips the task until the delegation resolves.
    pub(crate) deferred: Option<CyclePoint>,
    pub(crate) capture: Option<CaptureSink>,
    /// True once the result channel holds a value.
    pub(crate) captured: bool,
    pub(crate) on_complete: Option<CompleteHook>,
}

impl Task {
    /// Running → Paused. Returns `false` for any other status.
    pub(crate) fn pause(&mut self) -> bool {
        if self.status == Status::Running {
            self.status = Status::Paused;
            true
        } else {
            false
        }
    }

    /// Paused → Running. Returns `false` for any other status.
    pub(crate) fn unpause(&mut self) -> bool {
        if self.status == Status::Paused {
            self.status = Status::Running;
            true
        } else {
            false
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// True when normal dispatch may advance this task.
    pub(crate) fn dispatchable(&self) -> bool {
        self.status == Status::Running && self.deferred.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{seq_ref, IterSeq};

    fn record() -> Task {
        Task {
            seq: seq_ref(IterSeq::of(Vec::new())),
            status: Status::Running,
            phase: Phase::PerFrame,
            policy: ReturnPolicy::FirstThenStop,
            tag: Arc::from(""),
            pace: Pace::default(),
            steps_done: 0,
            child: None,
            nested: false,
            deferred: None,
            capture: None,
            captured: false,
            on_complete: None,
        }
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut t = record();
        assert!(t.pause());
        assert_eq!(t.status, Status::Paused);
        assert!(!t.pause());
    }

    #[test]
    fn test_unpause_only_from_paused() {
        let mut t = record();
        assert!(!t.unpause());
        t.pause();
        assert!(t.unpause());
        assert_eq!(t.status, Status::Running);
    }

    #[test]
    fn test_deferred_blocks_dispatch() {
        let mut t = record();
        assert!(t.dispatchable());
        t.deferred = Some(CyclePoint::EndOfTick);
        assert!(!t.dispatchable());
    }

    #[test]
    fn test_seq_key_tracks_identity() {
        let a = seq_ref(IterSeq::of(Vec::new()));
        let b = seq_ref(IterSeq::of(Vec::new()));
        assert_eq!(SeqKey::of(&a), SeqKey::of(&a.clone()));
        assert_ne!(SeqKey::of(&a), SeqKey::of(&b));
    }
}
