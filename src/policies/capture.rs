//! # Return capture policy.
//!
//! [`ReturnPolicy`] governs how a task with a typed result channel reacts to
//! plain values yielded by its sequence. Capture only happens for tasks that
//! configured a result type at creation time
//! (see [`TaskSpec::capture`](crate::TaskSpec::capture)); everything else is
//! fire-and-forget and ignores plain yields entirely.

/// How a typed result is captured from yielded values.
///
/// Values whose runtime type does not match the configured result type are
/// always ignored, regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnPolicy {
    /// Capture the first matching value, then stop the task immediately.
    #[default]
    FirstThenStop,
    /// Capture the first matching value; the task keeps running and later
    /// matches are ignored.
    FirstThenContinue,
    /// Every matching value overwrites the previous one; the task runs until
    /// its sequence exhausts or it is stopped.
    LastContinuously,
}

impl ReturnPolicy {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            ReturnPolicy::FirstThenStop => "first_then_stop",
            ReturnPolicy::FirstThenContinue => "first_then_continue",
            ReturnPolicy::LastContinuously => "last_continuously",
        }
    }

    /// Whether a successful capture terminates the task.
    #[inline]
    pub(crate) fn stops_on_capture(self) -> bool {
        matches!(self, ReturnPolicy::FirstThenStop)
    }

    /// Whether a capture may overwrite an already-captured value.
    #[inline]
    pub(crate) fn overwrites(self) -> bool {
        matches!(self, ReturnPolicy::LastContinuously)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_then_stop() {
        assert_eq!(ReturnPolicy::default(), ReturnPolicy::FirstThenStop);
    }

    #[test]
    fn test_only_first_then_stop_terminates() {
        assert!(ReturnPolicy::FirstThenStop.stops_on_capture());
        assert!(!ReturnPolicy::FirstThenContinue.stops_on_capture());
        assert!(!ReturnPolicy::LastContinuously.stops_on_capture());
    }

    #[test]
    fn test_only_last_continuously_overwrites() {
        assert!(ReturnPolicy::LastContinuously.overwrites());
        assert!(!ReturnPolicy::FirstThenContinue.overwrites());
    }
}
