//! CLI entry point.
//!
//! # Responsibility
//! - Provide a minimal executable view over `taskpad_core`.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

use taskpad_core::db::open_db;
use taskpad_core::{Filter, KvTaskRepository, Task, TaskCounts, TaskId, TaskStore, ViewObserver};

const USAGE: &str = "usage: taskpad_cli <db-path> <command>
commands:
  add <text>...            create a task
  done <id>                toggle completion
  rm <id>                  delete a task
  list [all|active|completed]";

/// Stdout renderer registered as the store's view observer.
struct StdoutView;

impl ViewObserver for StdoutView {
    fn state_changed(&self, visible: &[Task], counts: TaskCounts) {
        if visible.is_empty() {
            println!("(no tasks to show)");
        }
        for task in visible {
            let mark = if task.completed { "x" } else { " " };
            println!("[{mark}] {}  {}", task.id, task.text);
        }
        println!(
            "total: {}  active: {}  completed: {}",
            counts.total, counts.active, counts.completed
        );
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let [db_path, command, rest @ ..] = args else {
        return Err(USAGE.to_string());
    };

    let conn = open_db(db_path).map_err(|err| format!("failed to open `{db_path}`: {err}"))?;
    let repo = KvTaskRepository::new(&conn);
    let mut store = TaskStore::new(repo);
    store.subscribe(Box::new(StdoutView));

    match command.as_str() {
        "add" => {
            if rest.is_empty() {
                return Err(USAGE.to_string());
            }
            store.add_task(&rest.join(" "));
        }
        "done" => store.toggle_complete(parse_id(rest)?),
        "rm" => store.delete_task(parse_id(rest)?),
        "list" => {
            let filter = match rest {
                [] => Filter::All,
                [value] => Filter::parse(value)
                    .ok_or_else(|| format!("unknown filter `{value}`; expected all|active|completed"))?,
                _ => return Err(USAGE.to_string()),
            };
            store.set_filter(filter);
        }
        other => return Err(format!("unknown command `{other}`\n{USAGE}")),
    }

    Ok(())
}

fn parse_id(rest: &[String]) -> Result<TaskId, String> {
    let [raw] = rest else {
        return Err(USAGE.to_string());
    };
    raw.parse::<TaskId>()
        .map_err(|err| format!("invalid task id `{raw}`: {err}"))
}
