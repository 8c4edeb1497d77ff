//! Task records, handles, and specifications.

mod spec;
mod task;

pub use spec::{ReturnSlot, TaskSpec};
pub use task::{Status, TaskId};

pub(crate) use task::{SeqKey, Task};
