//! # Scheduling core.
//!
//! Timing vocabulary ([`Phase`], [`Tick`]), the task registries, the
//! [`Scheduler`] itself, and the step executor that interprets yields.

mod cx;
mod registry;
mod scheduler;
mod stepper;
mod tick;

pub use cx::StepCx;
pub use scheduler::{Scheduler, SchedulerBuilder};
pub use tick::{Phase, Tick};
