//! Local mirror of the server collection and its reconciliation rules.
//!
//! # Design
//! `TodoStore` is plain data plus the only functions allowed to change it.
//! Each `apply_*` takes the outcome of one API call: success reconciles the
//! collection with the server's answer, failure leaves the collection as it
//! was and overwrites `error` with the failure message. A later success does
//! not clear `error`; only a successful initial load does.

use tracing::warn;

use crate::error::ApiError;
use crate::types::{filter_todos, Todo, TodoFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoStore {
    todos: Vec<Todo>,
    filter: TodoFilter,
    loading: bool,
    error: Option<String>,
}

impl TodoStore {
    /// A store waiting for its initial load.
    pub fn new(filter: TodoFilter) -> Self {
        Self {
            todos: Vec::new(),
            filter,
            loading: true,
            error: None,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The entries shown under the current filter.
    pub fn visible(&self) -> Vec<&Todo> {
        filter_todos(&self.todos, self.filter)
    }

    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Display-only; the collection is untouched.
    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Todo>, ApiError>) {
        match result {
            Ok(todos) => {
                self.todos = todos;
                self.error = None;
            }
            Err(err) => self.record_error(&err),
        }
        self.loading = false;
    }

    /// New entries go first.
    pub fn apply_created(&mut self, result: Result<Todo, ApiError>) {
        match result {
            Ok(todo) => self.todos.insert(0, todo),
            Err(err) => self.record_error(&err),
        }
    }

    /// Replace the entry with id `id` by the server's version, in place.
    pub fn apply_updated(&mut self, id: &str, result: Result<Todo, ApiError>) {
        match result {
            Ok(updated) => {
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
                    *slot = updated;
                }
            }
            Err(err) => self.record_error(&err),
        }
    }

    pub fn apply_deleted(&mut self, id: &str, result: Result<(), ApiError>) {
        match result {
            Ok(()) => self.todos.retain(|t| t.id != id),
            Err(err) => self.record_error(&err),
        }
    }

    fn record_error(&mut self, err: &ApiError) {
        warn!(error = %err, "todo request failed");
        self.error = Some(err.to_string());
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new(TodoFilter::All)
    }
}
