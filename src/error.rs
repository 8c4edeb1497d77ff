//! Error types used by the tickflow scheduler and sequence bodies.
//!
//! This module defines two main error enums:
//!
//! - [`SchedulerError`] — errors surfaced by the dispatch loop itself.
//! - [`TaskError`] — faults raised by individual sequence advances.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging,
//! plus [`TaskError::is_fatal`] for classifying faults.
//!
//! ## Rules
//! - A fault during a sequence advance completes and purges the faulting task
//!   *first*, then propagates as [`SchedulerError::Faulted`] to whoever called
//!   `advance` / `advance_tag`. The scheduler never swallows faults.
//! - Invalid operands (stopping an unknown task, pausing a non-running task)
//!   are **not** errors; those operations return `false` instead.

use thiserror::Error;

use crate::tasks::TaskId;

/// # Faults raised by sequence bodies.
///
/// Returned from [`Sequence::resume`](crate::Sequence::resume) when the
/// wrapped work hits an unrecoverable condition. The scheduler performs no
/// retries; a faulting task transitions to `Complete` without a captured
/// result and the fault propagates to the dispatch caller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Ordinary failure of the underlying work.
    #[error("sequence failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Non-recoverable failure; the sequence must not be resumed again.
    #[error("fatal sequence error: {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },
}

impl TaskError {
    /// Convenience constructor for [`TaskError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Convenience constructor for [`TaskError::Fatal`].
    pub fn fatal(error: impl Into<String>) -> Self {
        TaskError::Fatal {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use tickflow::TaskError;
    ///
    /// let err = TaskError::fail("boom");
    /// assert_eq!(err.as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Fatal { .. } => "task_fatal",
        }
    }

    /// Returns a human-readable message with details about the fault.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Fatal { error } => format!("fatal: {error}"),
        }
    }

    /// Returns `true` for [`TaskError::Fatal`].
    pub fn is_fatal(&self) -> bool {
        matches!(self, TaskError::Fatal { .. })
    }
}

/// # Errors surfaced by the dispatch loop.
///
/// Produced by [`Scheduler::advance`](crate::Scheduler::advance) and
/// [`Scheduler::advance_tag`](crate::Scheduler::advance_tag) when a task
/// faults mid-dispatch. The faulting task has already been completed and
/// removed from every registry by the time this error is returned, so the
/// scheduler stays consistent even if the caller ignores the error.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// A task's sequence faulted while being advanced.
    #[error("task {task} faulted during advance")]
    Faulted {
        /// The task that faulted (already purged from the scheduler).
        task: TaskId,
        /// The underlying fault.
        #[source]
        source: TaskError,
    },
}

impl SchedulerError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SchedulerError::Faulted { .. } => "scheduler_task_faulted",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SchedulerError::Faulted { task, source } => {
                format!("task {task} faulted: {}", source.as_message())
            }
        }
    }
}
