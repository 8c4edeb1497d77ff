//! # Scheduler: registries, lifecycle operations, and dispatch.
//!
//! The [`Scheduler`] owns every registry and is the single entry point for
//! task control. It has no loop of its own; the host drives it:
//!
//! ```text
//! host tick loop                         Scheduler
//! ──────────────                         ─────────
//! frame start      ──advance(PerFrame)──►  dispatch phase list, in order
//! physics step     ──advance(PerFixedTick)─► resume fixed-tick delegations,
//!                                            then dispatch
//! frame end        ──advance(LateFrame)──►  ...
//!                                          └─ each advance call ends by
//!                                             resuming end-of-tick
//!                                             delegations queued during it
//! ```
//!
//! ## Rules
//! - Everything is synchronous and single-threaded; "suspension" means a
//!   task returned control between steps, never a blocked thread.
//! - Within one phase, tasks advance in registration order; mid-dispatch
//!   starts and stops never corrupt the pass in flight (snapshot iteration).
//! - Starting a sequence that is already registered returns the existing
//!   task untouched.
//! - A fault during an advance completes and purges the faulting task, then
//!   propagates; tasks later in that pass wait for the next tick.

use std::rc::Rc;
use std::sync::Arc;

use crate::adapters::CyclePoint;
use crate::config::SchedulerConfig;
use crate::core::registry::Registry;
use crate::core::{Phase, Tick};
use crate::error::SchedulerError;
use crate::events::{Event, EventKind, Observe, ObserverSet};
use crate::sequence::SeqRef;
use crate::tasks::{SeqKey, Status, Task, TaskId, TaskSpec};

/// Builder for a [`Scheduler`] with observers attached.
pub struct SchedulerBuilder {
    cfg: SchedulerConfig,
    observers: ObserverSet,
}

impl SchedulerBuilder {
    /// Adds one observer to the end of the delivery order.
    pub fn with_observer(mut self, observer: Rc<dyn Observe>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Adds several observers, preserving order.
    pub fn with_observers(mut self, observers: Vec<Rc<dyn Observe>>) -> Self {
        for obs in observers {
            self.observers.push(obs);
        }
        self
    }

    /// Finishes the build.
    pub fn build(self) -> Scheduler {
        Scheduler {
            cfg: self.cfg,
            reg: Registry::new(),
            observers: self.observers,
            cycle_queue: Vec::new(),
            next_id: 1,
        }
    }
}

/// Cooperative task scheduler driven by host tick phases.
pub struct Scheduler {
    pub(crate) cfg: SchedulerConfig,
    pub(crate) reg: Registry,
    pub(crate) observers: ObserverSet,
    /// Tasks awaiting a one-shot tick-boundary resumption.
    pub(crate) cycle_queue: Vec<(TaskId, CyclePoint)>,
    next_id: u64,
}

impl Scheduler {
    /// Creates a scheduler with no observers.
    pub fn new(cfg: SchedulerConfig) -> Self {
        Self::builder(cfg).build()
    }

    /// Starts building a scheduler with observers.
    pub fn builder(cfg: SchedulerConfig) -> SchedulerBuilder {
        SchedulerBuilder {
            cfg,
            observers: ObserverSet::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.cfg
    }

    // ---------------------------
    // Lifecycle
    // ---------------------------

    /// Starts a task from a spec: inserts it into the identity registry and
    /// the phase registry matching its phase, `Running`.
    ///
    /// Deduplicates by sequence identity: if the spec's sequence is already
    /// registered, the existing task is returned and the spec is dropped.
    pub fn start(&mut self, spec: TaskSpec) -> TaskId {
        if let Some(existing) = self.reg.lookup(SeqKey::of(&spec.seq)) {
            return existing;
        }
        self.insert_task(spec, false)
    }

    /// Starts a bare sequence under the configured defaults.
    pub fn spawn(&mut self, seq: SeqRef) -> TaskId {
        let spec = TaskSpec::with_defaults(seq, &self.cfg);
        self.start(spec)
    }

    /// Stops a task: cascades into its nested child first, completes it, and
    /// purges it from every registry. With `invoke_callback`, the completion
    /// callback runs with whatever the result channel holds.
    ///
    /// Returns `false` if the task is not currently registered.
    pub fn stop(&mut self, id: TaskId, invoke_callback: bool) -> bool {
        self.finish_with(id, invoke_callback, None)
    }

    /// Stops whichever task wraps the given sequence (stop-by-handle).
    pub fn stop_seq(&mut self, seq: &SeqRef, invoke_callback: bool) -> bool {
        match self.reg.lookup(SeqKey::of(seq)) {
            Some(id) => self.stop(id, invoke_callback),
            None => false,
        }
    }

    /// Pauses a `Running` task. Returns `false` for any other status or for
    /// an unknown id.
    pub fn pause(&mut self, id: TaskId) -> bool {
        let Some(cell) = self.reg.get(id) else {
            return false;
        };
        let (ok, tag) = {
            let mut t = cell.borrow_mut();
            (t.pause(), t.tag.clone())
        };
        if ok {
            self.emit(Event::new(EventKind::TaskPaused).with_task(id).with_tag(tag));
        }
        ok
    }

    /// Unpauses a `Paused` task. No-op (`false`) on any non-paused task.
    pub fn unpause(&mut self, id: TaskId) -> bool {
        let Some(cell) = self.reg.get(id) else {
            return false;
        };
        let (ok, tag) = {
            let mut t = cell.borrow_mut();
            (t.unpause(), t.tag.clone())
        };
        if ok {
            self.emit(Event::new(EventKind::TaskResumed).with_task(id).with_tag(tag));
        }
        ok
    }

    /// Flips between `Running` and `Paused` based on the current status.
    pub fn toggle_pause(&mut self, id: TaskId) -> bool {
        match self.status(id) {
            Some(Status::Running) => self.pause(id),
            Some(Status::Paused) => self.unpause(id),
            _ => false,
        }
    }

    /// Drives the pause flag to an explicit target state.
    pub fn set_paused(&mut self, id: TaskId, paused: bool) -> bool {
        if paused {
            self.pause(id)
        } else {
            self.unpause(id)
        }
    }

    /// Reassigns a task's phase. Non-nested tasks physically move between
    /// phase registries; nested tasks only update the field (their parent
    /// keeps driving them).
    pub fn set_phase(&mut self, id: TaskId, phase: Phase) -> bool {
        let Some(cell) = self.reg.get(id) else {
            return false;
        };
        let (old, nested) = {
            let t = cell.borrow();
            (t.phase, t.nested)
        };
        if old == phase {
            return true;
        }
        cell.borrow_mut().phase = phase;
        if !nested {
            self.reg.move_phase(id, old, phase);
        }
        self.emit(Event::new(EventKind::PhaseMoved).with_task(id).with_phase(phase));
        true
    }

    // ---------------------------
    // Dispatch
    // ---------------------------

    /// Advances every task registered under `phase`, in registration order.
    ///
    /// Call once per host tick of that phase. Fixed-tick delegations resolve
    /// at the start of a `PerFixedTick` call; end-of-tick delegations queued
    /// during this call resolve before it returns.
    pub fn advance(&mut self, phase: Phase, tick: Tick) -> Result<(), SchedulerError> {
        if phase == Phase::PerFixedTick {
            self.drain_cycle(CyclePoint::FixedTick, tick, Some(phase))?;
        }
        for id in self.reg.snapshot_phase(phase) {
            let Some(cell) = self.reg.get(id) else {
                continue; // removed mid-pass
            };
            if cell.borrow().nested {
                continue; // adopted mid-pass; its parent drives it now
            }
            self.step_task(id, tick, phase, false)?;
        }
        self.drain_cycle(CyclePoint::EndOfTick, tick, Some(phase))
    }

    /// Advances every task whose tag equals `tag`, regardless of phase, in
    /// identity-registry order. Nested tasks stay with their parent.
    ///
    /// End-of-tick delegations queued during this call resolve before it
    /// returns, each under its task's own phase.
    pub fn advance_tag(&mut self, tag: &str, tick: Tick) -> Result<(), SchedulerError> {
        for id in self.reg.snapshot_all() {
            let Some(cell) = self.reg.get(id) else {
                continue;
            };
            let (matched, phase) = {
                let t = cell.borrow();
                (&*t.tag == tag && !t.nested, t.phase)
            };
            if matched {
                self.step_task(id, tick, phase, false)?;
            }
        }
        self.drain_cycle(CyclePoint::EndOfTick, tick, None)
    }

    // ---------------------------
    // Bulk tag control
    // ---------------------------

    /// Pauses every running task tagged `tag`. Empty string selects untagged
    /// tasks. Returns how many tasks changed state.
    pub fn pause_tag(&mut self, tag: &str) -> usize {
        self.for_tag(tag, |sched, id| sched.pause(id))
    }

    /// Unpauses every paused task tagged `tag`.
    pub fn unpause_tag(&mut self, tag: &str) -> usize {
        self.for_tag(tag, |sched, id| sched.unpause(id))
    }

    /// Toggles the pause state of every task tagged `tag`.
    pub fn toggle_pause_tag(&mut self, tag: &str) -> usize {
        self.for_tag(tag, |sched, id| sched.toggle_pause(id))
    }

    /// Drives every task tagged `tag` to an explicit pause state.
    pub fn set_paused_tag(&mut self, tag: &str, paused: bool) -> usize {
        self.for_tag(tag, move |sched, id| sched.set_paused(id, paused))
    }

    /// Stops every task tagged `tag`. Returns how many tasks were stopped.
    pub fn stop_tag(&mut self, tag: &str, invoke_callback: bool) -> usize {
        self.for_tag(tag, move |sched, id| sched.stop(id, invoke_callback))
    }

    fn for_tag(&mut self, tag: &str, mut op: impl FnMut(&mut Self, TaskId) -> bool) -> usize {
        let mut touched = 0;
        for id in self.reg.snapshot_all() {
            let Some(cell) = self.reg.get(id) else {
                continue; // stopped by an earlier cascade
            };
            if &*cell.borrow().tag != tag {
                continue;
            }
            if op(self, id) {
                touched += 1;
            }
        }
        touched
    }

    // ---------------------------
    // Introspection
    // ---------------------------

    /// Current status, or `None` for ids no longer registered.
    pub fn status(&self, id: TaskId) -> Option<Status> {
        self.reg.get(id).map(|cell| cell.borrow().status)
    }

    /// Whether the id refers to a live task.
    pub fn contains(&self, id: TaskId) -> bool {
        self.reg.contains(id)
    }

    /// The live task wrapping this sequence, if any.
    pub fn task_for(&self, seq: &SeqRef) -> Option<TaskId> {
        self.reg.lookup(SeqKey::of(seq))
    }

    /// Number of live tasks (nested children included).
    pub fn len(&self) -> usize {
        self.reg.len()
    }

    /// Whether no tasks are live.
    pub fn is_empty(&self) -> bool {
        self.reg.is_empty()
    }

    /// Every live task id in registration order.
    pub fn list(&self) -> Vec<TaskId> {
        self.reg.snapshot_all()
    }

    /// Live task ids carrying the given tag, in registration order.
    pub fn tagged(&self, tag: &str) -> Vec<TaskId> {
        self.reg
            .snapshot_all()
            .into_iter()
            .filter(|id| {
                self.reg
                    .get(*id)
                    .map(|cell| &*cell.borrow().tag == tag)
                    .unwrap_or(false)
            })
            .collect()
    }

    // ---------------------------
    // Internals shared with the step executor
    // ---------------------------

    /// Registers a task from a spec. `nested` children skip the phase lists.
    pub(crate) fn insert_task(&mut self, spec: TaskSpec, nested: bool) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let task = Task {
            seq: spec.seq,
            status: Status::Running,
            phase: spec.phase,
            policy: spec.policy,
            tag: spec.tag,
            pace: spec.pace,
            steps_done: 0,
            child: None,
            nested,
            deferred: None,
            capture: spec.capture,
            captured: false,
            on_complete: spec.on_complete,
        };
        let (phase, tag) = (task.phase, task.tag.clone());
        self.reg
            .insert(id, Rc::new(std::cell::RefCell::new(task)), !nested);

        self.emit(
            Event::new(EventKind::TaskStarted)
                .with_task(id)
                .with_phase(phase)
                .with_tag(tag),
        );
        id
    }

    /// Completes and purges a task: cascades into the nested child first,
    /// removes every registry entry, then (optionally) runs the completion
    /// callback. `fault` switches the emitted event to `TaskFaulted`.
    pub(crate) fn finish_with(
        &mut self,
        id: TaskId,
        invoke_callback: bool,
        fault: Option<&crate::error::TaskError>,
    ) -> bool {
        let Some(cell) = self.reg.remove(id) else {
            return false;
        };
        self.cycle_queue.retain(|(t, _)| *t != id);

        let (child, tag, callback): (Option<TaskId>, Arc<str>, _) = {
            let mut t = cell.borrow_mut();
            t.status = Status::Complete;
            (t.child.take(), t.tag.clone(), t.on_complete.take())
        };
        if let Some(cid) = child {
            self.finish_with(cid, invoke_callback, None);
        }

        let event = match fault {
            Some(err) => Event::new(EventKind::TaskFaulted)
                .with_task(id)
                .with_tag(tag)
                .with_reason(err.as_label()),
            None => Event::new(EventKind::TaskCompleted).with_task(id).with_tag(tag),
        };
        self.emit(event);

        if invoke_callback {
            if let Some(f) = callback {
                f();
            }
        }
        true
    }

    pub(crate) fn emit(&self, event: Event) {
        self.observers.emit(&event);
    }
}
