//! # Observer fan-out.
//!
//! [`Observe`] is the hook for watching scheduler lifecycle events (logging,
//! metrics, assertions in tests). [`ObserverSet`] fans each [`Event`] out to
//! every registered observer, synchronously and in registration order.
//!
//! ## Rules
//! - Delivery happens inline inside scheduler operations; observers must be
//!   cheap and must not call back into the scheduler.
//! - A panicking observer does not take the scheduler down: the panic is
//!   caught and reported to the *other* observers as
//!   [`EventKind::ObserverPanicked`]. Panics raised while delivering that
//!   report are ignored.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use crate::events::{Event, EventKind};

/// Synchronous observer of scheduler events.
pub trait Observe {
    /// Handles a single event.
    fn on_event(&self, event: &Event);

    /// Stable observer name, used when reporting observer panics.
    fn name(&self) -> &'static str {
        "observer"
    }
}

/// Ordered set of observers sharing one event stream.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Rc<dyn Observe>>,
}

impl ObserverSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer to the end of the delivery order.
    pub fn push(&mut self, observer: Rc<dyn Observe>) {
        self.observers.push(observer);
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Delivers one event to every observer in registration order.
    pub fn emit(&self, event: &Event) {
        let mut panicked: Vec<&'static str> = Vec::new();
        for obs in &self.observers {
            let res = catch_unwind(AssertUnwindSafe(|| obs.on_event(event)));
            if res.is_err() {
                panicked.push(obs.name());
            }
        }

        for name in panicked {
            let report = Event::new(EventKind::ObserverPanicked)
                .with_reason(format!("observer={name} panicked"));
            for obs in &self.observers {
                if obs.name() == name {
                    continue;
                }
                let _ = catch_unwind(AssertUnwindSafe(|| obs.on_event(&report)));
            }
        }
    }
}
