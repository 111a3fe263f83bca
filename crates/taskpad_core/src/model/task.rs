//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, persistence and views.
//! - Define the view filter enumeration and derived counts.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is never empty or all-whitespace; enforced before construction.
//! - `completed` is the only field that changes after creation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Random 128-bit v4 ids. Ids are only ever compared for equality; the
/// canonical string form is what reaches persisted payloads.
pub type TaskId = Uuid;

/// One to-do item.
///
/// The wire shape is exactly the three named fields; unrecognized fields in
/// persisted records are ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id assigned at creation.
    pub id: TaskId,
    /// Trimmed display text. Immutable; there is no edit operation.
    pub text: String,
    /// Completion flag, flipped by toggle.
    pub completed: bool,
}

impl Task {
    /// Builds a task from raw user input.
    ///
    /// Trims leading/trailing whitespace and returns `None` when nothing
    /// remains, so an empty submission never becomes a task.
    pub fn from_input(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            text: trimmed.to_string(),
            completed: false,
        })
    }

    /// Builds a task with a caller-provided id.
    ///
    /// Used by tests and hydration paths where identity already exists.
    /// Does not re-trim `text`.
    pub fn with_id(id: TaskId, text: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            text: text.into(),
            completed,
        }
    }

    /// Flips the completion flag in place.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// View selection narrowing which tasks are visible.
///
/// Session-only state; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

impl Filter {
    /// Parses a UI control identifier into a filter.
    ///
    /// Returns `None` for anything outside the enumeration so unknown
    /// values never reach the store.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns whether `task` belongs to this filter's visible subset.
    pub fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Derived task tallies. Never stored; recomputed from the list on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    /// Tallies a task slice. `active + completed == total` by construction.
    pub fn tally(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total,
            active: total - completed,
            completed,
        }
    }
}
