//! Text rendering of a `TodoStore`.

use std::fmt::Write as _;
use std::process::ExitCode;

use todo_client::{Todo, TodoStore};

pub const DEFAULT_TITLE: &str = "Simple Todo";

pub const EMPTY_STATE: &str = "No todos yet. Add your first task!";

pub fn render(title: &str, store: &TodoStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "Filter: {}", store.filter());
    out.push('\n');

    if store.is_loading() {
        out.push_str("Loading todos...\n");
    } else {
        let visible = store.visible();
        if visible.is_empty() {
            let _ = writeln!(out, "{EMPTY_STATE}");
        }
        for todo in visible {
            out.push_str(&render_item(todo));
            out.push('\n');
        }
    }

    if let Some(error) = store.error() {
        let _ = write!(out, "\nerror: {error}\n");
    }
    out
}

/// Non-zero while an error is showing.
pub fn exit_code(store: &TodoStore) -> ExitCode {
    if store.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn render_item(todo: &Todo) -> String {
    let mark = if todo.completed { 'x' } else { ' ' };
    format!("[{mark}] {}  ({})", todo.title, todo.id)
}
