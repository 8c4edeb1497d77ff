//! # LogWriter — simple event printer
//!
//! A minimal observer that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [started] task=task-1 phase=per_frame tag="enemy"
//! [paused] task=task-1 tag="enemy"
//! [cycle-deferred] task=task-2 boundary=end_of_tick
//! [completed] task=task-1 tag="enemy"
//! [faulted] task=task-3 err="error: socket closed"
//! ```

use crate::events::{Event, EventKind, Observe};

/// Event writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Constructs a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn task_of(e: &Event) -> String {
        e.task.map(|t| t.to_string()).unwrap_or_else(|| "?".into())
    }
}

impl Observe for LogWriter {
    fn on_event(&self, e: &Event) {
        let task = Self::task_of(e);
        match e.kind {
            EventKind::TaskStarted => {
                println!(
                    "[started] task={task} phase={} tag={:?}",
                    e.phase.map(|p| p.as_label()).unwrap_or("?"),
                    e.tag.as_deref().unwrap_or(""),
                );
            }
            EventKind::TaskCompleted => {
                println!("[completed] task={task} tag={:?}", e.tag.as_deref().unwrap_or(""));
            }
            EventKind::TaskFaulted => {
                println!("[faulted] task={task} err={:?}", e.reason.as_deref().unwrap_or("?"));
            }
            EventKind::TaskPaused => {
                println!("[paused] task={task} tag={:?}", e.tag.as_deref().unwrap_or(""));
            }
            EventKind::TaskResumed => {
                println!("[resumed] task={task} tag={:?}", e.tag.as_deref().unwrap_or(""));
            }
            EventKind::TaskNested => {
                println!("[nested] task={task} parent={:?}", e.reason.as_deref().unwrap_or("?"));
            }
            EventKind::TaskDetached => {
                println!("[detached] task={task} parent={:?}", e.reason.as_deref().unwrap_or("?"));
            }
            EventKind::PhaseMoved => {
                println!(
                    "[phase-moved] task={task} phase={}",
                    e.phase.map(|p| p.as_label()).unwrap_or("?"),
                );
            }
            EventKind::CycleDeferred => {
                println!(
                    "[cycle-deferred] task={task} boundary={}",
                    e.reason.as_deref().unwrap_or("?"),
                );
            }
            EventKind::CycleResumed => {
                println!(
                    "[cycle-resumed] task={task} boundary={}",
                    e.reason.as_deref().unwrap_or("?"),
                );
            }
            EventKind::ValueCaptured => {
                println!("[captured] task={task} tag={:?}", e.tag.as_deref().unwrap_or(""));
            }
            EventKind::ObserverPanicked => {
                println!(
                    "[observer-panicked] info={}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
