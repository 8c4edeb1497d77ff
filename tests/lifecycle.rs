//! End-to-end scenarios through the public surface only.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tickflow::{
    seq_ref, Event, EventKind, IterSeq, Observe, Phase, ReturnPolicy, Scheduler, SchedulerConfig,
    StepCx, StepFn, TaskSpec, Tick, WaitFor, Yield,
};

fn frame() -> Tick {
    Tick::uniform(Duration::from_millis(16))
}

fn passes(n: u32) -> Vec<Yield> {
    (0..n).map(|_| Yield::Pass).collect()
}

#[derive(Default)]
struct Recorder {
    kinds: RefCell<Vec<EventKind>>,
}

impl Observe for Recorder {
    fn on_event(&self, event: &Event) {
        self.kinds.borrow_mut().push(event.kind);
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}

#[test]
fn test_observer_sees_full_lifecycle_in_order() {
    let rec = Rc::new(Recorder::default());
    let mut sched = Scheduler::builder(SchedulerConfig::default())
        .with_observer(rec.clone())
        .build();

    let mut spec = TaskSpec::wrap(IterSeq::of(vec![Yield::Pass, Yield::value(1u8)]));
    let _slot = spec.capture::<u8>();
    let id = sched.start(spec);
    sched.pause(id);
    sched.unpause(id);
    sched.advance(Phase::PerFrame, frame()).unwrap();
    sched.advance(Phase::PerFrame, frame()).unwrap();

    assert_eq!(
        *rec.kinds.borrow(),
        vec![
            EventKind::TaskStarted,
            EventKind::TaskPaused,
            EventKind::TaskResumed,
            EventKind::ValueCaptured,
            EventKind::TaskCompleted,
        ]
    );
}

#[test]
fn test_spawn_inherits_config_defaults() {
    let cfg = SchedulerConfig {
        default_phase: Phase::GuiTick,
        default_policy: ReturnPolicy::FirstThenContinue,
        default_steps: 3,
    };
    let mut sched = Scheduler::new(cfg);
    let id = sched.spawn(seq_ref(IterSeq::of(passes(3))));

    // Pace 3 under GuiTick: all three passes land in one tick.
    sched.advance(Phase::PerFrame, frame()).unwrap();
    assert!(sched.contains(id));
    sched.advance(Phase::GuiTick, frame()).unwrap();
    assert!(sched.contains(id));
    sched.advance(Phase::GuiTick, frame()).unwrap();
    assert!(!sched.contains(id));
}

#[test]
fn test_stop_by_sequence_handle() {
    let mut sched = Scheduler::new(SchedulerConfig::default());
    let seq = seq_ref(IterSeq::of(passes(10)));
    let id = sched.start(TaskSpec::new(seq.clone()));

    assert!(sched.stop_seq(&seq, false));
    assert!(!sched.contains(id));
    assert!(!sched.stop_seq(&seq, false));
}

#[test]
fn test_capture_then_delivers_value_to_callback() {
    let got = Rc::new(RefCell::new(None));
    let mut sched = Scheduler::new(SchedulerConfig::default());

    let seen = got.clone();
    let mut spec = TaskSpec::wrap(IterSeq::of(vec![Yield::value("done".to_string())]));
    let _slot = spec.capture_then::<String>(move |value| {
        *seen.borrow_mut() = value;
    });
    sched.start(spec);

    sched.advance(Phase::PerFrame, frame()).unwrap();
    assert_eq!(got.borrow().as_deref(), Some("done"));
}

#[test]
fn test_manual_phase_only_advances_on_demand() {
    let mut sched = Scheduler::new(SchedulerConfig::default());
    let id = sched.start(TaskSpec::wrap(IterSeq::of(passes(1))).with_phase(Phase::Manual));

    for phase in [Phase::PerFrame, Phase::PerFixedTick, Phase::LateFrame] {
        sched.advance(phase, frame()).unwrap();
    }
    assert!(sched.contains(id));

    sched.advance(Phase::Manual, frame()).unwrap();
    sched.advance(Phase::Manual, frame()).unwrap();
    assert!(!sched.contains(id));
}

#[test]
fn test_tag_groups_control_a_crowd() {
    let mut sched = Scheduler::new(SchedulerConfig::default());
    for _ in 0..3 {
        sched.start(TaskSpec::wrap(IterSeq::of(passes(50))).with_tag("enemy"));
    }
    let hero = sched.start(TaskSpec::wrap(IterSeq::of(passes(50))).with_tag("hero"));

    assert_eq!(sched.pause_tag("enemy"), 3);
    sched.advance(Phase::PerFrame, frame()).unwrap();
    assert_eq!(sched.unpause_tag("enemy"), 3);
    assert_eq!(sched.stop_tag("enemy", false), 3);
    assert_eq!(sched.list(), vec![hero]);
}

#[test]
fn test_fixed_tick_wait_inside_frame_task() {
    // A frame task hands one resumption to the fixed-tick boundary and
    // carries on from frame dispatch afterwards.
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut sched = Scheduler::new(SchedulerConfig::default());

    let seen = log.clone();
    let mut step = 0;
    let seq = seq_ref(StepFn::new(move |cx: &mut StepCx<'_>| {
        step += 1;
        match step {
            1 => {
                seen.borrow_mut().push(("frame", cx.phase()));
                Ok(Some(Yield::Wait(WaitFor::NextFixedTick)))
            }
            2 => {
                seen.borrow_mut().push(("fixed", cx.phase()));
                Ok(Some(Yield::Pass))
            }
            _ => {
                seen.borrow_mut().push(("frame again", cx.phase()));
                Ok(None)
            }
        }
    }));
    sched.start(TaskSpec::new(seq).with_phase(Phase::PerFrame));

    sched.advance(Phase::PerFrame, frame()).unwrap();
    sched.advance(Phase::PerFixedTick, frame()).unwrap();
    sched.advance(Phase::PerFrame, frame()).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            ("frame", Phase::PerFrame),
            ("fixed", Phase::PerFixedTick),
            ("frame again", Phase::PerFrame),
        ]
    );
}

#[test]
fn test_deep_nesting_unwinds_level_by_level() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut sched = Scheduler::new(SchedulerConfig::default());

    fn leveled(depth: u32, log: Rc<RefCell<Vec<u32>>>) -> tickflow::SeqRef {
        let mut spawned = false;
        seq_ref(StepFn::new(move |_cx: &mut StepCx<'_>| {
            if depth > 0 && !spawned {
                spawned = true;
                let child = leveled(depth - 1, log.clone());
                return Ok(Some(Yield::Seq(child)));
            }
            log.borrow_mut().push(depth);
            Ok(None)
        }))
    }

    sched.start(TaskSpec::new(leveled(3, log.clone())));

    // Each tick descends one level; the innermost completes first, then the
    // chain unwinds one completed child per fall-through.
    let mut guard = 0;
    while !sched.is_empty() {
        sched.advance(Phase::PerFrame, frame()).unwrap();
        guard += 1;
        assert!(guard < 20, "nesting failed to unwind");
    }
    assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
}

#[test]
fn test_faulted_scheduler_keeps_serving_survivors() {
    let mut sched = Scheduler::new(SchedulerConfig::default());
    let bad = seq_ref(StepFn::new(|_cx: &mut StepCx<'_>| {
        Err(tickflow::TaskError::fatal("corrupt state"))
    }));
    sched.start(TaskSpec::new(bad));
    let survivor = sched.start(TaskSpec::wrap(IterSeq::of(passes(2))));

    assert!(sched.advance(Phase::PerFrame, frame()).is_err());
    // Subsequent ticks proceed normally for the remaining tasks.
    sched.advance(Phase::PerFrame, frame()).unwrap();
    sched.advance(Phase::PerFrame, frame()).unwrap();
    sched.advance(Phase::PerFrame, frame()).unwrap();
    assert!(!sched.contains(survivor));
    assert!(sched.is_empty());
}
