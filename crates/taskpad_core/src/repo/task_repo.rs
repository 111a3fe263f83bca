//! Task persistence adapter over key-value storage.
//!
//! # Responsibility
//! - Serialize the task list to a single kv entry and back.
//! - Validate persisted records one by one, dropping malformed ones.
//! - Absorb every storage failure; callers never see an error.
//!
//! # Invariants
//! - `load`/`save` never panic and never return errors; on failure they
//!   degrade to "storage was empty" / "write did not happen" and report
//!   the cause on the diagnostic log channel.
//! - In-memory state stays the source of truth for the session even when
//!   a save fails.

use crate::db::{kv_get, kv_set};
use crate::model::task::Task;
use log::{debug, error, warn};
use rusqlite::Connection;
use serde_json::Value;

/// Fixed key the serialized task list lives under.
const TASKS_KEY: &str = "taskpad.tasks";

/// Persistence boundary for the task list.
///
/// Implementations are infallible by contract: failures are logged and
/// swallowed so the store's operations cannot fail from the caller's
/// perspective.
pub trait TaskRepository {
    /// Reads the persisted task list, or an empty list when storage is
    /// absent, unreadable or malformed.
    fn load(&self) -> Vec<Task>;

    /// Writes the full task list, replacing the previous payload. A failed
    /// write is logged and otherwise ignored.
    fn save(&self, tasks: &[Task]);
}

/// Key-value backed task repository.
pub struct KvTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KvTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for KvTaskRepository<'_> {
    fn load(&self) -> Vec<Task> {
        let raw = match kv_get(self.conn, TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(
                    "event=tasks_load module=repo status=error error_code=storage_read_failed error={err}"
                );
                return Vec::new();
            }
        };

        decode_payload(&raw)
    }

    fn save(&self, tasks: &[Task]) {
        let payload = match serde_json::to_string(tasks) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event=tasks_save module=repo status=error error_code=serialize_failed error={err}"
                );
                return;
            }
        };

        match kv_set(self.conn, TASKS_KEY, &payload) {
            Ok(()) => {
                debug!("event=tasks_save module=repo status=ok count={}", tasks.len());
            }
            Err(err) => {
                error!(
                    "event=tasks_save module=repo status=error error_code=storage_write_failed error={err}"
                );
            }
        }
    }
}

/// Decodes a persisted payload with per-record validation.
///
/// The payload must be a JSON array; anything else yields an empty list.
/// Each element is decoded independently against the task record shape
/// (string `id` in canonical UUID form, string `text`, boolean
/// `completed`; unrecognized fields ignored) and dropped on mismatch, so
/// one damaged record does not discard the rest.
fn decode_payload(raw: &str) -> Vec<Task> {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!(
                "event=tasks_load module=repo status=error error_code=payload_malformed error={err}"
            );
            return Vec::new();
        }
    };

    let Value::Array(records) = parsed else {
        error!("event=tasks_load module=repo status=error error_code=payload_not_a_list");
        return Vec::new();
    };

    let record_count = records.len();
    let tasks: Vec<Task> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(task) => Some(task),
            Err(err) => {
                // Metadata only; record content may hold user text.
                warn!(
                    "event=tasks_load module=repo status=record_dropped index={index} error={err}"
                );
                None
            }
        })
        .collect();

    debug!(
        "event=tasks_load module=repo status=ok count={} dropped={}",
        tasks.len(),
        record_count - tasks.len()
    );
    tasks
}

#[cfg(test)]
mod tests {
    use super::decode_payload;

    #[test]
    fn non_list_payload_decodes_to_empty() {
        assert!(decode_payload("{\"id\": \"x\"}").is_empty());
        assert!(decode_payload("42").is_empty());
        assert!(decode_payload("not json at all").is_empty());
    }

    #[test]
    fn damaged_record_is_dropped_not_fatal() {
        let raw = r#"[
            {"id": "11111111-2222-4333-8444-555555555555", "text": "keep", "completed": false},
            {"id": "11111111-2222-4333-8444-666666666666", "text": "no flag"}
        ]"#;

        let tasks = decode_payload(raw);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "keep");
    }

    #[test]
    fn extra_record_fields_are_ignored() {
        let raw = r#"[
            {"id": "11111111-2222-4333-8444-555555555555", "text": "t", "completed": true, "priority": 3}
        ]"#;

        let tasks = decode_payload(raw);
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].completed);
    }
}
