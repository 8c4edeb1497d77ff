//! # Lifecycle events emitted by the scheduler.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Lifecycle events**: task flow (started, paused, resumed, completed, faulted)
//! - **Composition events**: nesting and phase movement
//! - **Delegation events**: external tick-boundary waits
//!
//! The [`Event`] struct carries additional metadata such as the task id,
//! phase, tag, and a free-form reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically, so observers can restore exact emission order.
//!
//! ## Example
//! ```rust
//! use tickflow::{Event, EventKind, Phase};
//!
//! let ev = Event::new(EventKind::TaskPaused)
//!     .with_phase(Phase::PerFrame)
//!     .with_tag("enemy");
//!
//! assert_eq!(ev.kind, EventKind::TaskPaused);
//! assert_eq!(ev.tag.as_deref(), Some("enemy"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::core::Phase;
use crate::tasks::TaskId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of scheduler events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Task lifecycle ===
    /// Task entered the registries and became `Running`.
    ///
    /// Sets: `task`, `phase`, `tag`, `at`, `seq`.
    TaskStarted,

    /// Task reached `Complete` (exhaustion, capture-stop, or explicit stop).
    ///
    /// Sets: `task`, `tag`, `at`, `seq`.
    TaskCompleted,

    /// Task's sequence faulted; the task was completed and purged.
    ///
    /// Sets: `task`, `tag`, `reason` (fault label), `at`, `seq`.
    TaskFaulted,

    /// Running task was paused.
    ///
    /// Sets: `task`, `tag`, `at`, `seq`.
    TaskPaused,

    /// Paused task resumed running.
    ///
    /// Sets: `task`, `tag`, `at`, `seq`.
    TaskResumed,

    // === Composition ===
    /// Task was adopted as another task's nested child.
    ///
    /// Sets: `task` (the child), `reason` (parent id), `at`, `seq`.
    TaskNested,

    /// Completed child was detached from its parent.
    ///
    /// Sets: `task` (the child), `reason` (parent id), `at`, `seq`.
    TaskDetached,

    /// Active task was moved to a different phase registry.
    ///
    /// Sets: `task`, `phase` (the new phase), `at`, `seq`.
    PhaseMoved,

    // === External-cycle delegation ===
    /// Task handed one resumption to an external tick boundary.
    ///
    /// Sets: `task`, `reason` (boundary label), `at`, `seq`.
    CycleDeferred,

    /// Deferred task's delegation resolved at its boundary.
    ///
    /// Sets: `task`, `reason` (boundary label), `at`, `seq`.
    CycleResumed,

    // === Capture ===
    /// A plain yield matched the task's result type and was captured.
    ///
    /// Sets: `task`, `tag`, `at`, `seq`.
    ValueCaptured,

    // === Observer health ===
    /// An observer panicked while processing an event.
    ///
    /// Sets: `reason` (observer name and panic info), `at`, `seq`.
    ObserverPanicked,
}

/// Scheduler event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Task the event concerns, if applicable.
    pub task: Option<TaskId>,
    /// Phase attached to the event, if applicable.
    pub phase: Option<Phase>,
    /// Tag of the task, if it carries one.
    pub tag: Option<Arc<str>>,
    /// Human-readable detail (fault labels, boundary names, panic info).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next global sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            phase: None,
            tag: None,
            reason: None,
        }
    }

    /// Attaches the task id.
    #[inline]
    pub fn with_task(mut self, task: TaskId) -> Self {
        self.task = Some(task);
        self
    }

    /// Attaches a phase.
    #[inline]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Attaches a tag. Empty tags are dropped (untagged tasks stay untagged
    /// in the event stream too).
    #[inline]
    pub fn with_tag(mut self, tag: impl Into<Arc<str>>) -> Self {
        let tag = tag.into();
        if !tag.is_empty() {
            self.tag = Some(tag);
        }
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
