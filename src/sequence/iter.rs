//! # Iterator-backed sequence (`IterSeq`)
//!
//! Adapts any `Iterator<Item = Yield>` into an infallible [`Sequence`]:
//! `next()` is one advance, iterator exhaustion is sequence exhaustion.
//! Handy for scripted sequences and for tests.
//!
//! ## Example
//! ```rust
//! use tickflow::{seq_ref, IterSeq, Yield};
//!
//! let script = seq_ref(IterSeq::of(vec![
//!     Yield::Pass,
//!     Yield::value(7i32),
//! ]));
//! # let _ = script;
//! ```

use crate::core::StepCx;
use crate::sequence::{Sequence, StepResult, Yield};

/// Iterator-backed sequence implementation.
pub struct IterSeq<I> {
    iter: I,
}

impl<I> IterSeq<I>
where
    I: Iterator<Item = Yield>,
{
    /// Wraps an iterator of yields.
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl IterSeq<std::vec::IntoIter<Yield>> {
    /// Wraps a vector of yields, consumed front to back.
    pub fn of(yields: Vec<Yield>) -> Self {
        IterSeq::new(yields.into_iter())
    }
}

impl<I> Sequence for IterSeq<I>
where
    I: Iterator<Item = Yield>,
{
    fn resume(&mut self, _cx: &mut StepCx<'_>) -> StepResult {
        Ok(self.iter.next())
    }
}
