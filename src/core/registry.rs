//! # Task registries.
//!
//! Three views over the same set of live tasks:
//! - an insertion-ordered arena (`TaskId` → record), which doubles as the
//!   identity registry's iteration order,
//! - a by-sequence map (`SeqKey` → `TaskId`) for deduplication and
//!   stop-by-handle,
//! - one insertion-ordered id list per phase, feeding the dispatcher.
//!
//! ## Rules
//! - Nested tasks live in the arena and the by-sequence map but never in a
//!   phase list: only their parent drives them.
//! - Removal purges all three views in one call, so a dangling id simply
//!   misses every lookup.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::Phase;
use crate::tasks::{SeqKey, Task, TaskId};

/// Shared handle to a task record.
pub(crate) type TaskCell = Rc<RefCell<Task>>;

/// The scheduler's registries.
#[derive(Default)]
pub(crate) struct Registry {
    arena: IndexMap<TaskId, TaskCell>,
    by_seq: HashMap<SeqKey, TaskId>,
    phases: [Vec<TaskId>; Phase::COUNT],
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a task. `in_phase` is false for nested children.
    pub(crate) fn insert(&mut self, id: TaskId, cell: TaskCell, in_phase: bool) {
        let (key, phase) = {
            let t = cell.borrow();
            (SeqKey::of(&t.seq), t.phase)
        };
        self.by_seq.insert(key, id);
        if in_phase {
            self.phases[phase.index()].push(id);
        }
        self.arena.insert(id, cell);
    }

    /// Removes a task from every view, returning its record.
    pub(crate) fn remove(&mut self, id: TaskId) -> Option<TaskCell> {
        let cell = self.arena.shift_remove(&id)?;
        let (key, phase) = {
            let t = cell.borrow();
            (SeqKey::of(&t.seq), t.phase)
        };
        self.by_seq.remove(&key);
        self.phases[phase.index()].retain(|t| *t != id);
        Some(cell)
    }

    pub(crate) fn get(&self, id: TaskId) -> Option<TaskCell> {
        self.arena.get(&id).cloned()
    }

    pub(crate) fn contains(&self, id: TaskId) -> bool {
        self.arena.contains_key(&id)
    }

    /// Identity lookup: sequence handle → live task.
    pub(crate) fn lookup(&self, key: SeqKey) -> Option<TaskId> {
        self.by_seq.get(&key).copied()
    }

    /// Removes a task from its phase list only (nest adoption).
    pub(crate) fn detach_phase(&mut self, id: TaskId, phase: Phase) {
        self.phases[phase.index()].retain(|t| *t != id);
    }

    /// Moves a task between phase lists, keeping arrival order in the target.
    pub(crate) fn move_phase(&mut self, id: TaskId, from: Phase, to: Phase) {
        self.phases[from.index()].retain(|t| *t != id);
        self.phases[to.index()].push(id);
    }

    /// Snapshot of one phase list; iteration over it stays valid across
    /// mid-dispatch insertions and removals.
    pub(crate) fn snapshot_phase(&self, phase: Phase) -> Vec<TaskId> {
        self.phases[phase.index()].clone()
    }

    /// Snapshot of every live task in registration order.
    pub(crate) fn snapshot_all(&self) -> Vec<TaskId> {
        self.arena.keys().copied().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
