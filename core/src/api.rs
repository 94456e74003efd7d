//! Async API client: `TodoClient` requests executed over a `Transport`.
//!
//! Each method is one round-trip with no retries and no timeout of its own.

use crate::client::TodoClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{NewTodo, Todo, TodoFilter, UpdateTodo};

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: &ApiConfig, transport: T) -> Self {
        Self {
            client: TodoClient::new(&config.base_url),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the collection, filtered server-side unless `filter` is `All`.
    pub async fn list_todos(&self, filter: TodoFilter) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_list_todos(filter);
        let response = self.transport.execute(request).await?;
        self.client.parse_list_todos(response)
    }

    pub async fn create_todo(&self, input: &NewTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    pub async fn update_todo(&self, id: &str, patch: &UpdateTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, patch)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    pub async fn delete_todo_by_id(&self, id: &str) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        let response = self.transport.execute(request).await?;
        self.client.parse_delete_todo(response)
    }
}
