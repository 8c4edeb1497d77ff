//! # Host tick phases and per-tick timing.
//!
//! The scheduler does not own a loop. The host calls
//! [`Scheduler::advance`](crate::Scheduler::advance) once per tick for every
//! phase it drives, passing a [`Tick`] describing how much time elapsed since
//! the previous tick of that phase.
//!
//! ## Rules
//! - Phase order is entirely up to the host; the scheduler only guarantees
//!   insertion-ordered dispatch *within* one phase.
//! - [`Phase::EditorTick`] measures durations in unscaled (real) time, so
//!   timed waits behave consistently outside of play mode.

use std::fmt;
use std::time::Duration;

/// A named point in the host's tick loop.
///
/// Every active task belongs to exactly one phase; the host advances each
/// phase independently. Nested tasks ignore their own phase and are driven
/// by their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Never advanced automatically; driven only by explicit
    /// `advance(Phase::Manual, ..)` or tag-based advancing.
    Manual,
    /// Once per rendered frame.
    PerFrame,
    /// Once per fixed simulation step.
    PerFixedTick,
    /// After all per-frame work of the current frame.
    LateFrame,
    /// During GUI processing.
    GuiTick,
    /// Editor-driven updates outside of play mode.
    EditorTick,
}

impl Phase {
    /// Number of phases; sizes the per-phase registry tables.
    pub const COUNT: usize = 6;

    /// All phases in table order.
    pub const ALL: [Phase; Phase::COUNT] = [
        Phase::Manual,
        Phase::PerFrame,
        Phase::PerFixedTick,
        Phase::LateFrame,
        Phase::GuiTick,
        Phase::EditorTick,
    ];

    /// Stable index into per-phase tables.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Phase::Manual => 0,
            Phase::PerFrame => 1,
            Phase::PerFixedTick => 2,
            Phase::LateFrame => 3,
            Phase::GuiTick => 4,
            Phase::EditorTick => 5,
        }
    }

    /// Whether timed waits ticking under this phase should measure
    /// unscaled (real) time instead of scaled game time.
    #[inline]
    pub fn uses_unscaled_time(self) -> bool {
        matches!(self, Phase::EditorTick)
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            Phase::Manual => "manual",
            Phase::PerFrame => "per_frame",
            Phase::PerFixedTick => "per_fixed_tick",
            Phase::LateFrame => "late_frame",
            Phase::GuiTick => "gui_tick",
            Phase::EditorTick => "editor_tick",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Time elapsed since the previous tick of the advanced phase.
///
/// `delta` is scaled game time; `unscaled` is wall-clock time. Hosts without
/// a time-scale concept can build both from one value via [`Tick::uniform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    /// Scaled (game) time since the previous tick.
    pub delta: Duration,
    /// Unscaled (real) time since the previous tick.
    pub unscaled: Duration,
}

impl Tick {
    /// Creates a tick with distinct scaled and unscaled deltas.
    pub fn new(delta: Duration, unscaled: Duration) -> Self {
        Self { delta, unscaled }
    }

    /// Creates a tick where scaled and unscaled time agree.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use tickflow::Tick;
    ///
    /// let t = Tick::uniform(Duration::from_millis(16));
    /// assert_eq!(t.delta, t.unscaled);
    /// ```
    pub fn uniform(delta: Duration) -> Self {
        Self {
            delta,
            unscaled: delta,
        }
    }
}
