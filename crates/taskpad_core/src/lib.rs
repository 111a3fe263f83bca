//! Core domain logic for taskpad.
//! This crate is the single source of truth for task-list invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Filter, Task, TaskCounts, TaskId};
pub use repo::task_repo::{KvTaskRepository, TaskRepository};
pub use service::task_store::{TaskStore, ViewObserver};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
