//! # Step executor.
//!
//! One dispatch of one task: drives its nested child first, then resumes its
//! sequence up to `pace` times, classifying every yield:
//!
//! ```text
//!            ┌────────────── step_task(id) ───────────────┐
//!            │ child alive? ──► step child; parent blocked │
//!            │ child done?  ──► detach, fall through       │
//!            │                                             │
//!            │ resume(seq) ──► Pass      consume iteration │
//!            │                 Value     offer to capture  │
//!            │                 Task/Seq  nest child        │
//!            │                 Adopt     nest existing     │
//!            │                 Wait      adapt / defer     │
//!            │                 Directive apply, re-resume  │
//!            │                 Ok(None)  complete task     │
//!            │                 Err(e)    purge, propagate  │
//!            └─────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Directives, boundary deferrals, and skip-ahead over dead adoptees are
//!   transparent: they never consume one of the task's paced iterations.
//! - A task that stops itself mid-step has its in-flight yield discarded.
//! - Child completion detaches within the same tick, so the parent resumes
//!   without losing a tick to the handoff.

use std::sync::Arc;

use crate::adapters::{adapt, Adapted, CyclePoint};
use crate::core::{Phase, Scheduler, StepCx, Tick};
use crate::error::SchedulerError;
use crate::events::{Event, EventKind};
use crate::policies::Pace;
use crate::sequence::{Directive, Yield};
use crate::tasks::{SeqKey, TaskId, TaskSpec};

impl Scheduler {
    /// Dispatches one task for one tick.
    ///
    /// `resume` keeps the paced-iteration cursor from the suspended pass
    /// (external-cycle resumption); a fresh dispatch resets it.
    pub(crate) fn step_task(
        &mut self,
        id: TaskId,
        tick: Tick,
        phase: Phase,
        resume: bool,
    ) -> Result<(), SchedulerError> {
        if !resume {
            let Some(cell) = self.reg.get(id) else {
                return Ok(());
            };
            cell.borrow_mut().steps_done = 0;
        }

        loop {
            let Some(cell) = self.reg.get(id) else {
                return Ok(());
            };
            let (dispatchable, steps_done, pace, child) = {
                let t = cell.borrow();
                (t.dispatchable(), t.steps_done, t.pace.get(), t.child)
            };
            if !dispatchable || steps_done >= pace {
                return Ok(());
            }

            // Nested child first; the parent stays blocked behind it.
            if let Some(cid) = child {
                if self.reg.contains(cid) {
                    self.step_task(cid, tick, phase, false)?;
                }
                if self.reg.contains(cid) {
                    return Ok(());
                }
                let Some(cell) = self.reg.get(id) else {
                    return Ok(());
                };
                cell.borrow_mut().child = None;
                self.emit(
                    Event::new(EventKind::TaskDetached)
                        .with_task(cid)
                        .with_reason(id.to_string()),
                );
                continue; // same-tick fall-through into the parent's own step
            }

            // Advance the sequence until something consumes the iteration.
            'advance: loop {
                let Some(cell) = self.reg.get(id) else {
                    return Ok(());
                };
                let seq = cell.borrow().seq.clone();
                let outcome = {
                    let mut cx = StepCx {
                        sched: &mut *self,
                        tick,
                        phase,
                        task: id,
                    };
                    seq.borrow_mut().resume(&mut cx)
                };
                if !self.reg.contains(id) {
                    return Ok(()); // stopped itself mid-step
                }

                match outcome {
                    Err(err) => {
                        self.finish_with(id, false, Some(&err));
                        return Err(SchedulerError::Faulted {
                            task: id,
                            source: err,
                        });
                    }
                    Ok(None) => {
                        self.finish_with(id, true, None);
                        return Ok(());
                    }
                    Ok(Some(Yield::Pass)) => break 'advance,
                    Ok(Some(Yield::Value(value))) => {
                        if self.capture_value(id, value) {
                            return Ok(()); // capture terminated the task
                        }
                        break 'advance;
                    }
                    Ok(Some(Yield::Task(spec))) => {
                        self.nest_spec(id, spec);
                        break 'advance;
                    }
                    Ok(Some(Yield::Adopt(cid))) => {
                        if !self.reg.contains(cid) || self.closes_cycle(id, cid) {
                            continue 'advance; // dead, self, or ancestor: skip ahead
                        }
                        self.adopt(id, cid);
                        break 'advance;
                    }
                    Ok(Some(Yield::Seq(seq))) => {
                        match self.reg.lookup(SeqKey::of(&seq)) {
                            Some(existing) if self.closes_cycle(id, existing) => {
                                continue 'advance
                            }
                            Some(existing) => self.adopt(id, existing),
                            None => {
                                let spec = TaskSpec::new(seq).with_phase(self.phase_of(id, phase));
                                self.nest_spec(id, spec);
                            }
                        }
                        break 'advance;
                    }
                    Ok(Some(Yield::Wait(wait))) => match adapt(wait) {
                        Adapted::Inert => break 'advance,
                        Adapted::Seq(seq) => {
                            let spec = TaskSpec::new(seq).with_phase(self.phase_of(id, phase));
                            self.nest_spec(id, spec);
                            break 'advance;
                        }
                        Adapted::Defer(point) => {
                            if let Some(cell) = self.reg.get(id) {
                                cell.borrow_mut().deferred = Some(point);
                            }
                            self.cycle_queue.push((id, point));
                            self.emit(
                                Event::new(EventKind::CycleDeferred)
                                    .with_task(id)
                                    .with_reason(point.as_label()),
                            );
                            return Ok(()); // no iteration consumed
                        }
                    },
                    Ok(Some(Yield::Directive(directive))) => {
                        self.apply_directive(id, directive);
                        continue 'advance;
                    }
                }
            }

            if let Some(cell) = self.reg.get(id) {
                cell.borrow_mut().steps_done += 1;
            }
        }
    }

    /// Resumes every task whose delegation is due at `point`, once each.
    ///
    /// `phase` is the phase driving the dispatch in flight; tag-driven
    /// callers pass `None` and each task resumes under its own phase.
    /// Paused tasks have the delegation cleared but skip the forced step;
    /// they continue from normal dispatch after unpausing.
    pub(crate) fn drain_cycle(
        &mut self,
        point: CyclePoint,
        tick: Tick,
        phase: Option<Phase>,
    ) -> Result<(), SchedulerError> {
        let mut due = Vec::new();
        self.cycle_queue.retain(|(id, p)| {
            if *p == point {
                due.push(*id);
                false
            } else {
                true
            }
        });

        for id in due {
            let Some(cell) = self.reg.get(id) else {
                continue;
            };
            let (running, own_phase) = {
                let mut t = cell.borrow_mut();
                t.deferred = None;
                (t.is_running(), t.phase)
            };
            self.emit(
                Event::new(EventKind::CycleResumed)
                    .with_task(id)
                    .with_reason(point.as_label()),
            );
            if running {
                self.step_task(id, tick, phase.unwrap_or(own_phase), true)?;
            }
        }
        Ok(())
    }

    /// Offers a yielded value to the task's result channel.
    ///
    /// Returns `true` when the capture terminated the task. Fire-and-forget
    /// tasks (no channel) and already-satisfied non-overwriting channels
    /// ignore the value.
    pub(crate) fn capture_value(&mut self, id: TaskId, value: Box<dyn std::any::Any>) -> bool {
        let Some(cell) = self.reg.get(id) else {
            return true;
        };
        let (stops, tag) = {
            let mut t = cell.borrow_mut();
            if t.captured && !t.policy.overwrites() {
                return false;
            }
            let Some(sink) = t.capture.as_mut() else {
                return false;
            };
            if !sink(value) {
                return false; // type mismatch; the yield still consumed a step
            }
            t.captured = true;
            (t.policy.stops_on_capture(), t.tag.clone())
        };
        self.emit(Event::new(EventKind::ValueCaptured).with_task(id).with_tag(tag));
        if stops {
            self.finish_with(id, true, None);
            return true;
        }
        false
    }

    /// Whether making `adoptee` the nested child of `adopter` would close a
    /// drive cycle: the adopter sits somewhere on the adoptee's child chain
    /// (the adoptee itself included). Such adoptions are skipped ahead, the
    /// same way a dead adoptee is.
    pub(crate) fn closes_cycle(&self, adopter: TaskId, adoptee: TaskId) -> bool {
        let mut cursor = Some(adoptee);
        while let Some(cur) = cursor {
            if cur == adopter {
                return true;
            }
            cursor = self.reg.get(cur).and_then(|cell| cell.borrow().child);
        }
        false
    }

    /// Nests a fresh spec under `parent`, deduplicating by sequence identity:
    /// a spec wrapping an already-registered sequence adopts the live task
    /// (unless that would close a drive cycle).
    pub(crate) fn nest_spec(&mut self, parent: TaskId, spec: TaskSpec) {
        match self.reg.lookup(SeqKey::of(&spec.seq)) {
            Some(existing) if self.closes_cycle(parent, existing) => {}
            Some(existing) => self.adopt(parent, existing),
            None => {
                let cid = self.insert_task(spec, true);
                self.link(parent, cid);
            }
        }
    }

    /// Adopts an already-scheduled task as `parent`'s nested child, pulling
    /// it out of its phase registry. Adopting a task that is already nested
    /// elsewhere transfers ownership: the previous parent's child link is
    /// cleared so exactly one parent drives the child.
    pub(crate) fn adopt(&mut self, parent: TaskId, cid: TaskId) {
        let Some(cell) = self.reg.get(cid) else {
            return;
        };
        let (was_nested, phase) = {
            let mut t = cell.borrow_mut();
            let was = t.nested;
            t.nested = true;
            (was, t.phase)
        };
        if was_nested {
            let prev = self.reg.snapshot_all().into_iter().find(|pid| {
                *pid != parent
                    && self
                        .reg
                        .get(*pid)
                        .map(|c| c.borrow().child == Some(cid))
                        .unwrap_or(false)
            });
            if let Some(pid) = prev {
                if let Some(pcell) = self.reg.get(pid) {
                    pcell.borrow_mut().child = None;
                }
                self.emit(
                    Event::new(EventKind::TaskDetached)
                        .with_task(cid)
                        .with_reason(pid.to_string()),
                );
            }
        } else {
            self.reg.detach_phase(cid, phase);
        }
        self.link(parent, cid);
    }

    fn link(&mut self, parent: TaskId, cid: TaskId) {
        if let Some(cell) = self.reg.get(parent) {
            cell.borrow_mut().child = Some(cid);
        }
        self.emit(
            Event::new(EventKind::TaskNested)
                .with_task(cid)
                .with_reason(parent.to_string()),
        );
    }

    fn apply_directive(&mut self, id: TaskId, directive: Directive) {
        match directive {
            Directive::MirrorPhase(other) => {
                let Some(phase) = self.reg.get(other).map(|c| c.borrow().phase) else {
                    return;
                };
                self.set_phase(id, phase);
            }
            Directive::MirrorPolicy(other) => {
                let Some(policy) = self.reg.get(other).map(|c| c.borrow().policy) else {
                    return;
                };
                if let Some(cell) = self.reg.get(id) {
                    cell.borrow_mut().policy = policy;
                }
            }
            Directive::Retag(tag) => {
                if let Some(cell) = self.reg.get(id) {
                    cell.borrow_mut().tag = Arc::from(tag.as_str());
                }
            }
            Directive::SetPace(steps) => {
                if let Some(cell) = self.reg.get(id) {
                    cell.borrow_mut().pace = Pace::new(steps);
                }
            }
            Directive::SetPhase(phase) => {
                self.set_phase(id, phase);
            }
        }
    }

    /// Phase to register child tasks under: the parent's own phase, falling
    /// back to the dispatching phase.
    fn phase_of(&self, id: TaskId, fallback: Phase) -> Phase {
        self.reg
            .get(id)
            .map(|cell| cell.borrow().phase)
            .unwrap_or(fallback)
    }
}
