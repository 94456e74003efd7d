//! Client core for a REST todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` executes the
//! round-trip, and `TodoApp` keeps a local mirror of the server collection
//! consistent with the results of each call.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `ApiClient` pairs a `TodoClient` with a `Transport` for async callers.
//! - `TodoStore` holds the collection, filter, loading flag and last error;
//!   it changes only through its `apply_*` functions.
//! - `TodoApp` is the composition root. Its initial load is cancellable
//!   through a `CancelToken`; mutations are not.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod app;
pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod input;
pub mod store;
pub mod transport;
pub mod types;

pub use api::ApiClient;
pub use app::TodoApp;
pub use cancel::{CancelSource, CancelToken};
pub use client::TodoClient;
pub use config::ApiConfig;
pub use error::{ApiError, ErrorKind, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use input::{submit_title, EditBuffer, EditOutcome};
pub use store::TodoStore;
pub use transport::{Transport, UreqTransport};
pub use types::{filter_todos, NewTodo, Todo, TodoFilter, UpdateTodo};
