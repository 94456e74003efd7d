//! Composition root: owns the `TodoStore` and drives the `ApiClient`.
//!
//! # Design
//! Methods take `&self`, so several mutations can be in flight at once on
//! one task (e.g. under `tokio::join!`). The store lock is held only while a
//! result is applied, never across an await, so overlapping requests are
//! neither serialized nor de-duplicated: whichever response resolves last
//! is applied last. Only the initial load can be cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::api::ApiClient;
use crate::cancel::CancelToken;
use crate::config::ApiConfig;
use crate::store::TodoStore;
use crate::transport::Transport;
use crate::types::{NewTodo, Todo, TodoFilter, UpdateTodo};

pub struct TodoApp<T> {
    api: ApiClient<T>,
    store: Mutex<TodoStore>,
    mounted: AtomicBool,
}

impl<T: Transport> TodoApp<T> {
    pub fn new(config: &ApiConfig, transport: T, initial_filter: TodoFilter) -> Self {
        Self {
            api: ApiClient::new(config, transport),
            store: Mutex::new(TodoStore::new(initial_filter)),
            mounted: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    /// Initial load with the filter the store was created with. Runs at most
    /// once per app; later calls return immediately. If `cancel` fires
    /// before the response arrives, the response is dropped and the store is
    /// left as it was.
    pub async fn mount(&self, cancel: CancelToken) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            debug!("initial load already started");
            return;
        }
        let filter = {
            let mut store = self.lock();
            store.begin_load();
            store.filter()
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.api.list_todos(filter) => Some(result),
        };
        match result {
            Some(result) if !cancel.is_cancelled() => self.lock().finish_load(result),
            _ => debug!("initial load cancelled, discarding response"),
        }
    }

    pub async fn add_todo(&self, title: &str) {
        let result = self.api.create_todo(&NewTodo::new(title)).await;
        self.lock().apply_created(result);
    }

    pub async fn toggle_todo(&self, id: &str, completed: bool) {
        let result = self.api.update_todo(id, &UpdateTodo::completed(completed)).await;
        self.lock().apply_updated(id, result);
    }

    pub async fn edit_todo(&self, id: &str, title: &str) {
        let result = self.api.update_todo(id, &UpdateTodo::title(title)).await;
        self.lock().apply_updated(id, result);
    }

    pub async fn delete_todo(&self, id: &str) {
        let result = self.api.delete_todo_by_id(id).await;
        self.lock().apply_deleted(id, result);
    }

    pub fn set_filter(&self, filter: TodoFilter) {
        self.lock().set_filter(filter);
    }

    pub fn snapshot(&self) -> TodoStore {
        self.lock().clone()
    }

    /// The display value: the collection under the current filter.
    pub fn visible(&self) -> Vec<Todo> {
        self.lock().visible().into_iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, TodoStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
