//! Scheduling policies: return capture and pacing.

mod capture;
mod pace;

pub use capture::ReturnPolicy;
pub use pace::Pace;
