//! # Closure-backed sequence (`StepFn`)
//!
//! [`StepFn`] wraps a closure `F: FnMut(&mut StepCx) -> StepResult`, invoked
//! once per advance. State lives in the closure's captured environment, so
//! small sequences need no dedicated state-machine type.
//!
//! ## Example
//! ```rust
//! use tickflow::{seq_ref, StepFn, Yield};
//!
//! let mut left = 3u32;
//! let countdown = seq_ref(StepFn::new(move |_cx| {
//!     if left == 0 {
//!         return Ok(None);
//!     }
//!     left -= 1;
//!     Ok(Some(Yield::Pass))
//! }));
//! # let _ = countdown;
//! ```

use crate::core::StepCx;
use crate::sequence::{Sequence, StepResult};

/// Function-backed sequence implementation.
pub struct StepFn<F> {
    f: F,
}

impl<F> StepFn<F>
where
    F: FnMut(&mut StepCx<'_>) -> StepResult,
{
    /// Creates a new closure-backed sequence.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Sequence for StepFn<F>
where
    F: FnMut(&mut StepCx<'_>) -> StepResult,
{
    fn resume(&mut self, cx: &mut StepCx<'_>) -> StepResult {
        (self.f)(cx)
    }
}
