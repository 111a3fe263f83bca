use taskpad_core::db::{kv_get, kv_set, open_db, open_db_in_memory};
use taskpad_core::{KvTaskRepository, Task, TaskRepository};
use uuid::Uuid;

const TASKS_KEY: &str = "taskpad.tasks";

#[test]
fn load_from_empty_storage_returns_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvTaskRepository::new(&conn);

    assert!(repo.load().is_empty());
}

#[test]
fn save_then_load_preserves_ids_text_flags_and_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvTaskRepository::new(&conn);

    let mut tasks = vec![
        Task::from_input("newest").unwrap(),
        Task::from_input("middle").unwrap(),
        Task::from_input("oldest").unwrap(),
    ];
    tasks[1].toggle();

    repo.save(&tasks);
    let loaded = repo.load();

    assert_eq!(loaded, tasks);
}

#[test]
fn round_trip_survives_process_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad.db");

    let tasks = vec![
        Task::from_input("survives").unwrap(),
        Task::from_input("a restart").unwrap(),
    ];

    {
        let conn = open_db(&path).unwrap();
        KvTaskRepository::new(&conn).save(&tasks);
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(KvTaskRepository::new(&conn).load(), tasks);
}

#[test]
fn save_replaces_the_previous_payload() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvTaskRepository::new(&conn);

    repo.save(&[Task::from_input("old").unwrap()]);
    let replacement = vec![Task::from_input("new").unwrap()];
    repo.save(&replacement);

    assert_eq!(repo.load(), replacement);
}

#[test]
fn record_missing_a_required_field_is_dropped_per_record() {
    let conn = open_db_in_memory().unwrap();
    let good_id = Uuid::new_v4();
    let payload = format!(
        r#"[
            {{"id": "{good_id}", "text": "well formed", "completed": false}},
            {{"id": "{}", "text": "missing flag"}}
        ]"#,
        Uuid::new_v4()
    );
    kv_set(&conn, TASKS_KEY, &payload).unwrap();

    let loaded = KvTaskRepository::new(&conn).load();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, good_id);
    assert_eq!(loaded[0].text, "well formed");
}

#[test]
fn mistyped_fields_are_dropped_per_record() {
    let conn = open_db_in_memory().unwrap();
    let good_id = Uuid::new_v4();
    let payload = format!(
        r#"[
            {{"id": 17, "text": "numeric id", "completed": false}},
            {{"id": "{}", "text": "stringly flag", "completed": "yes"}},
            {{"id": "{good_id}", "text": "fine", "completed": true}}
        ]"#,
        Uuid::new_v4()
    );
    kv_set(&conn, TASKS_KEY, &payload).unwrap();

    let loaded = KvTaskRepository::new(&conn).load();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, good_id);
    assert!(loaded[0].completed);
}

#[test]
fn non_list_payload_loads_as_empty_without_error() {
    let conn = open_db_in_memory().unwrap();
    kv_set(&conn, TASKS_KEY, r#"{"not": "a list"}"#).unwrap();
    assert!(KvTaskRepository::new(&conn).load().is_empty());

    kv_set(&conn, TASKS_KEY, "}}garbage{{").unwrap();
    assert!(KvTaskRepository::new(&conn).load().is_empty());
}

#[test]
fn unrecognized_record_fields_are_ignored_on_read() {
    let conn = open_db_in_memory().unwrap();
    let id = Uuid::new_v4();
    let payload = format!(
        r#"[{{"id": "{id}", "text": "extra", "completed": false, "due": "2026-01-01", "priority": 2}}]"#
    );
    kv_set(&conn, TASKS_KEY, &payload).unwrap();

    let loaded = KvTaskRepository::new(&conn).load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, id);
}

#[test]
fn storage_failure_is_swallowed_not_raised() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE kv;").unwrap();
    let repo = KvTaskRepository::new(&conn);

    // Both directions degrade gracefully once the table is gone.
    repo.save(&[Task::from_input("doomed write").unwrap()]);
    assert!(repo.load().is_empty());
}

#[test]
fn persisted_value_is_a_json_array_under_the_fixed_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvTaskRepository::new(&conn);
    let task = Task::from_input("wire shape").unwrap();

    repo.save(std::slice::from_ref(&task));

    let raw = kv_get(&conn, TASKS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], task.id.to_string());
    assert_eq!(records[0]["text"], "wire shape");
    assert_eq!(records[0]["completed"], false);
}
