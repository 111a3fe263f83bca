//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage-agnostic persistence contract for the task list.
//! - Isolate key-value storage details from store orchestration.
//!
//! # Invariants
//! - Repository implementations absorb failures; the contract surface is
//!   infallible (degrade to empty-read / dropped-write, logged).

pub mod task_repo;
