//! # tickflow
//!
//! **Tickflow** is a cooperative task scheduler driven by host tick phases.
//!
//! It provides primitives to wrap resumable sequences in scheduled tasks,
//! advance them step-by-step during the host's update phases, and control
//! them individually or in bulk. Everything is synchronous and
//! single-threaded: a "suspended" task is simply one that returned control
//! between steps, not a blocked thread.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   TaskSpec   │   │   TaskSpec   │   │   TaskSpec   │
//!     │ (sequence +  │   │ (sequence +  │   │ (sequence +  │
//!     │  metadata)   │   │  metadata)   │   │  metadata)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Scheduler (driven by the host tick loop)                         │
//! │  - Registry (identity arena + by-sequence map + phase lists)      │
//! │  - ObserverSet (fans lifecycle events out to observers)           │
//! │  - cycle queue (tick-boundary delegations)                        │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  step exec   │   │  step exec   │   │  step exec   │
//!     │ (per task,   │   │              │   │              │
//!     │  `pace` per  │   │              │   │              │
//!     │  tick)       │   │              │   │              │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘
//!      │ Emits            │ Emits            │ Emits
//!      │ - TaskStarted    │ - TaskNested     │ - CycleDeferred
//!      │ - TaskCompleted  │ - TaskDetached   │ - ValueCaptured
//!      │ - TaskFaulted    │ - PhaseMoved     │ - ...
//!      ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                  ObserverSet (sync fan-out)                       │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### One dispatch
//! ```text
//! host: sched.advance(Phase::PerFrame, tick)
//!
//! for task in phase registry (registration order) {
//!   ├─► nested child first; parent blocked while the child lives
//!   ├─► up to `pace` times:
//!   │     resume(sequence) ─► yield
//!   │       ├─ Pass        ─► consume one iteration
//!   │       ├─ Value       ─► offer to the typed result channel
//!   │       ├─ Task / Seq  ─► nest a child, parent blocks
//!   │       ├─ Adopt       ─► nest an already-scheduled task
//!   │       ├─ Wait        ─► adapter: timed/probe child, or defer
//!   │       │                 one resumption to a tick boundary
//!   │       └─ Directive   ─► apply, resume again (transparent)
//!   │
//!   ├─ Ok(None) ─► complete, purge, run completion callback
//!   └─ Err(e)   ─► complete, purge, propagate to the caller
//! }
//! then: resume end-of-tick delegations queued during this call
//! ```
//!
//! ## Features
//! | Area            | Description                                                      | Key types / traits                       |
//! |-----------------|------------------------------------------------------------------|------------------------------------------|
//! | **Sequences**   | Resumable units of work, advanced one yield at a time.           | [`Sequence`], [`StepFn`], [`IterSeq`]    |
//! | **Tasks**       | Sequences bound to phase, tag, pace, and a result channel.       | [`TaskSpec`], [`TaskId`], [`Status`]     |
//! | **Dispatch**    | Phase-driven advancement under host control.                     | [`Scheduler`], [`Phase`], [`Tick`]       |
//! | **Suspension**  | Timed waits, operation probes, tick-boundary delegation.         | [`WaitFor`], [`Probe`], [`CyclePoint`]   |
//! | **Capture**     | Typed results pulled out of plain yields.                        | [`ReturnSlot`], [`ReturnPolicy`]         |
//! | **Observers**   | Hook into lifecycle events (logging, metrics, test assertions).  | [`Observe`], [`Event`], [`EventKind`]    |
//! | **Errors**      | Typed faults with purge-then-propagate semantics.                | [`TaskError`], [`SchedulerError`]        |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tickflow::{
//!     IterSeq, Phase, Scheduler, SchedulerConfig, TaskSpec, Tick, Yield,
//! };
//!
//! let mut sched = Scheduler::new(SchedulerConfig::default());
//!
//! // A sequence that works for two ticks, then produces a value.
//! let mut spec = TaskSpec::wrap(IterSeq::of(vec![
//!     Yield::Pass,
//!     Yield::Pass,
//!     Yield::value(42i32),
//! ]))
//! .with_tag("worker");
//! let slot = spec.capture::<i32>();
//! sched.start(spec);
//!
//! // The host drives the scheduler once per frame.
//! let tick = Tick::uniform(Duration::from_millis(16));
//! while !sched.is_empty() {
//!     sched.advance(Phase::PerFrame, tick)?;
//! }
//! assert_eq!(slot.take(), Some(42));
//! # Ok::<(), tickflow::SchedulerError>(())
//! ```

mod adapters;
mod config;
mod core;
mod error;
mod events;
mod policies;
mod sequence;
mod tasks;

// ---- Public re-exports ----

pub use adapters::{CyclePoint, OpWait, PollFn, Probe, TimedWait, WaitFor};
pub use config::SchedulerConfig;
pub use core::{Phase, Scheduler, SchedulerBuilder, StepCx, Tick};
pub use error::{SchedulerError, TaskError};
pub use events::{Event, EventKind, Observe, ObserverSet};
pub use policies::{Pace, ReturnPolicy};
pub use sequence::{seq_ref, Directive, IterSeq, SeqRef, Sequence, StepFn, StepResult, Yield};
pub use tasks::{ReturnSlot, Status, TaskId, TaskSpec};

// Optional: expose a simple built-in event printer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use events::LogWriter;
