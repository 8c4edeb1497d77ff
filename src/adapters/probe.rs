//! # Operation wait sequence.
//!
//! Converts a `WaitFor::Operation` into a steppable sequence that re-checks
//! the probe once per advance and exhausts on the first advance that finds
//! the operation finished.

use crate::adapters::Probe;
use crate::core::StepCx;
use crate::sequence::{Sequence, StepResult, Yield};

/// Sequence that polls an external operation until it reports finished.
pub struct OpWait {
    probe: Box<dyn Probe>,
}

impl OpWait {
    /// Wraps an already-boxed probe.
    pub fn new(probe: Box<dyn Probe>) -> Self {
        Self { probe }
    }
}

impl Sequence for OpWait {
    fn resume(&mut self, _cx: &mut StepCx<'_>) -> StepResult {
        if self.probe.is_finished() {
            Ok(None)
        } else {
            Ok(Some(Yield::Pass))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::adapters::PollFn;
    use crate::core::{Phase, Tick};
    use crate::{Scheduler, SchedulerConfig, TaskSpec, WaitFor, Yield};

    #[test]
    fn test_parent_resumes_when_probe_finishes() {
        let done = Rc::new(Cell::new(false));
        let probe_done = done.clone();

        let mut sched = Scheduler::new(SchedulerConfig::default());
        let seq = crate::seq_ref(crate::IterSeq::of(vec![
            Yield::Wait(WaitFor::operation(PollFn::new(move || probe_done.get()))),
            Yield::value(99i64),
        ]));
        let mut spec = TaskSpec::new(seq);
        let slot = spec.capture::<i64>();
        sched.start(spec);

        let tick = Tick::uniform(Duration::from_millis(16));
        sched.advance(Phase::PerFrame, tick).unwrap(); // adopt polling child
        sched.advance(Phase::PerFrame, tick).unwrap(); // probe: not finished
        assert!(slot.is_empty());

        done.set(true);
        sched.advance(Phase::PerFrame, tick).unwrap();
        assert_eq!(slot.get(), Some(99));
    }

    #[test]
    fn test_pausing_parent_suspends_polling_only() {
        let polls = Rc::new(Cell::new(0u32));
        let counter = polls.clone();

        let mut sched = Scheduler::new(SchedulerConfig::default());
        let seq = crate::seq_ref(crate::IterSeq::of(vec![Yield::Wait(WaitFor::operation(
            PollFn::new(move || {
                counter.set(counter.get() + 1);
                false
            }),
        ))]));
        let id = sched.start(TaskSpec::new(seq));

        let tick = Tick::uniform(Duration::from_millis(16));
        sched.advance(Phase::PerFrame, tick).unwrap(); // adopt
        sched.advance(Phase::PerFrame, tick).unwrap(); // poll #1
        assert_eq!(polls.get(), 1);

        assert!(sched.pause(id));
        sched.advance(Phase::PerFrame, tick).unwrap();
        sched.advance(Phase::PerFrame, tick).unwrap();
        assert_eq!(polls.get(), 1, "paused task must not re-poll");

        assert!(sched.unpause(id));
        sched.advance(Phase::PerFrame, tick).unwrap();
        assert_eq!(polls.get(), 2);
    }
}
