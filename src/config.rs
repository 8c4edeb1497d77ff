//! # Scheduler configuration.
//!
//! Provides [`SchedulerConfig`], the defaults new tasks inherit when built
//! with [`TaskSpec::with_defaults`](crate::TaskSpec::with_defaults) or
//! spawned directly from a bare sequence.
//!
//! ## Sentinel values
//! - `default_steps = 0` → clamped up to 1 by [`Pace`]
//! - values above 100 → clamped down to [`Pace::MAX`]

use crate::core::Phase;
use crate::policies::{Pace, ReturnPolicy};

/// Defaults applied to tasks that do not override them.
///
/// ## Field semantics
/// - `default_phase`: phase assigned to new tasks
/// - `default_policy`: return-capture policy for tasks with a result channel
/// - `default_steps`: steps-per-tick pace, clamped into `[1, 100]`
///
/// All fields are public for flexibility; prefer [`SchedulerConfig::default_pace`]
/// over reading `default_steps` raw to keep the clamp in one place.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Phase assigned to tasks that do not pick one.
    pub default_phase: Phase,
    /// Return policy assigned to tasks that do not pick one.
    pub default_policy: ReturnPolicy,
    /// Steps-per-tick pace assigned to tasks that do not pick one
    /// (clamped into `[1, 100]`).
    pub default_steps: u32,
}

impl SchedulerConfig {
    /// Returns the default pace with the clamp applied.
    #[inline]
    pub fn default_pace(&self) -> Pace {
        Pace::new(self.default_steps)
    }
}

impl Default for SchedulerConfig {
    /// Default configuration:
    ///
    /// - `default_phase = Phase::PerFrame`
    /// - `default_policy = ReturnPolicy::FirstThenStop`
    /// - `default_steps = 1`
    fn default() -> Self {
        Self {
            default_phase: Phase::PerFrame,
            default_policy: ReturnPolicy::default(),
            default_steps: 1,
        }
    }
}
