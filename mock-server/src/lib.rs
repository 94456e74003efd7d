use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub completed: Option<bool>,
}

/// Todos in insertion order.
pub type Db = Arc<RwLock<Vec<Todo>>>;

/// Routes served both at the root and under `/api`, sharing one store.
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .merge(todo_routes())
        .nest("/api", todo_routes())
        .with_state(db)
}

fn todo_routes() -> Router<Db> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).patch(update_todo).delete(delete_todo))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}

async fn list_todos(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    let selected: Vec<Todo> = todos
        .iter()
        .filter(|t| query.completed.map_or(true, |c| t.completed == c))
        .cloned()
        .collect();
    tracing::info!(count = selected.len(), completed = ?query.completed, "list todos");
    Json(selected)
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let now = timestamp();
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        completed: false,
        created_at: now.clone(),
        updated_at: now,
    };
    tracing::info!(id = %todo.id, "create todo");
    db.write().await.push(todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, StatusCode> {
    let todos = db.read().await;
    todos.iter().find(|t| t.id == id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
        todo.title = title.to_string();
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    todo.updated_at = timestamp();
    tracing::info!(%id, "update todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut todos = db.write().await;
    let index = todos.iter().position(|t| t.id == id).ok_or(StatusCode::NOT_FOUND)?;
    todos.remove(index);
    tracing::info!(%id, "delete todo");
    Ok(StatusCode::NO_CONTENT)
}
