//! Scheduler events and observer fan-out.

mod event;
mod observe;

pub use event::{Event, EventKind};
pub use observe::{Observe, ObserverSet};

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;
