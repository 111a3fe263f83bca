//! Task store use-case service.
//!
//! # Responsibility
//! - Own the authoritative in-memory task list and the active filter.
//! - Run every mutation's persist-and-notify tail.
//! - Hand registered view observers the filtered projection and counts.
//!
//! # Invariants
//! - The task list is newest-first; new tasks are prepended.
//! - No operation returns an error; invalid input is absorbed as a no-op.
//! - The filter is session state only and is never persisted.
//! - The store holds no references to concrete UI widgets.

use crate::model::task::{Filter, Task, TaskCounts, TaskId};
use crate::repo::task_repo::TaskRepository;
use log::debug;

/// Receiver for "state changed" notifications.
///
/// Views register one of these and re-render from the snapshot they are
/// handed; they never reach into the store's list directly. An empty
/// `visible` slice with a non-zero `counts.total` is how a view detects
/// "nothing under this filter" as opposed to "no tasks at all".
pub trait ViewObserver {
    fn state_changed(&self, visible: &[Task], counts: TaskCounts);
}

/// Authoritative task-list state plus its synchronization contract.
///
/// Every mutation persists the full list through the repository and then
/// notifies observers; both side effects complete before the operation
/// returns, so each user action is one atomic step.
pub struct TaskStore<R: TaskRepository> {
    tasks: Vec<Task>,
    filter: Filter,
    repo: R,
    observers: Vec<Box<dyn ViewObserver>>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates a store hydrated from persistence.
    ///
    /// Storage is read once, here; afterwards it is write-only.
    pub fn new(repo: R) -> Self {
        let tasks = repo.load();
        Self {
            tasks,
            filter: Filter::default(),
            repo,
            observers: Vec::new(),
        }
    }

    /// Registers a view observer. It is first called on the next mutation.
    pub fn subscribe(&mut self, observer: Box<dyn ViewObserver>) {
        self.observers.push(observer);
    }

    /// Adds a task from raw input text.
    ///
    /// # Contract
    /// - Input is whitespace-trimmed; an empty result is a silent no-op
    ///   with no persistence call and no notification.
    /// - The new task gets a fresh id, `completed = false`, and the front
    ///   position in the list.
    pub fn add_task(&mut self, text: &str) {
        let Some(task) = Task::from_input(text) else {
            debug!("event=task_add module=store status=rejected reason=empty_text");
            return;
        };

        self.tasks.insert(0, task);
        self.persist_and_notify();
    }

    /// Deletes the task with the given id, if present.
    ///
    /// An absent id leaves the list unchanged; the persist-and-notify tail
    /// still runs, rewriting an identical payload.
    pub fn delete_task(&mut self, id: TaskId) {
        self.tasks.retain(|task| task.id != id);
        self.persist_and_notify();
    }

    /// Flips the completion flag of the task with the given id.
    ///
    /// All other fields and all other tasks are untouched; an absent id is
    /// a no-op on the list itself.
    pub fn toggle_complete(&mut self, id: TaskId) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.toggle();
        }
        self.persist_and_notify();
    }

    /// Switches the active filter and re-notifies observers.
    ///
    /// Filter selection is session-only, so nothing is persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.notify();
    }

    /// Returns the currently active filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Returns the full list, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Derived tallies; `active + completed == total` always holds.
    pub fn counts(&self) -> TaskCounts {
        TaskCounts::tally(&self.tasks)
    }

    /// The filtered projection, preserving newest-first relative order.
    ///
    /// Returned as an owned snapshot; views re-fetch it after every
    /// notification rather than holding on to a previous one.
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.admits(task))
            .cloned()
            .collect()
    }

    fn persist_and_notify(&mut self) {
        self.repo.save(&self.tasks);
        self.notify();
    }

    fn notify(&self) {
        let visible = self.visible_tasks();
        let counts = self.counts();
        for observer in &self.observers {
            observer.state_changed(&visible, counts);
        }
    }
}
