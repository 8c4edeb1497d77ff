//! # Pacing: internal advances per dispatch call.
//!
//! [`Pace`] bounds how many internal sequence advances a task performs each
//! time the dispatcher reaches it, enabling batched catch-up for sequences
//! that want to run several logical steps per host tick.
//!
//! ## Rules
//! - The value is clamped to `[1, 100]` on construction; there is no way to
//!   hold an out-of-range pace.
//! - The per-tick advance counter resets at the start of every dispatch call,
//!   except when the task is suspended for an external tick-boundary cycle —
//!   then the counter pauses mid-count and resumes on the same cursor.

/// Clamped steps-per-tick value.
///
/// # Example
/// ```
/// use tickflow::Pace;
///
/// assert_eq!(Pace::new(0).get(), 1);
/// assert_eq!(Pace::new(3).get(), 3);
/// assert_eq!(Pace::new(1_000).get(), Pace::MAX.get());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pace(u32);

impl Pace {
    /// Smallest allowed pace (one advance per tick).
    pub const MIN: Pace = Pace(1);
    /// Largest allowed pace.
    pub const MAX: Pace = Pace(100);

    /// Creates a pace, clamping into `[1, 100]`.
    pub fn new(steps: u32) -> Self {
        Pace(steps.clamp(Pace::MIN.0, Pace::MAX.0))
    }

    /// Returns the number of advances per dispatch call.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Pace {
    fn default() -> Self {
        Pace::MIN
    }
}

impl From<u32> for Pace {
    fn from(steps: u32) -> Self {
        Pace::new(steps)
    }
}
