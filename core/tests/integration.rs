//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the async API client
//! and the composition root over real HTTP through `UreqTransport`. Validates
//! that request building, transport, response parsing, and reconciliation
//! work together with the actual server.

use std::io::{Read, Write};
use std::net::SocketAddr;

use todo_client::{
    ApiClient, ApiConfig, CancelSource, ErrorKind, NewTodo, TodoApp, TodoFilter, UpdateTodo,
    UreqTransport,
};

/// Start the mock server on its own runtime and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Answer one connection per canned response, in order, then stop.
/// Each response closes its connection so the next request reconnects.
fn serve_raw(responses: Vec<Vec<u8>>) -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        for response in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(&response).unwrap();
        }
    });

    addr
}

fn raw_response(status_line: &str, body: &[u8]) -> Vec<u8> {
    let mut out = format!(
        "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    out.extend_from_slice(body);
    out
}

/// Client configured with the default relative base url, resolved against
/// the server's origin by the transport.
fn api(addr: SocketAddr) -> ApiClient<UreqTransport> {
    let origin = format!("http://{addr}");
    ApiClient::new(&ApiConfig::resolve(None), UreqTransport::new(Some(&origin)))
}

#[tokio::test(flavor = "multi_thread")]
async fn crud_lifecycle() {
    let api = api(start_server());

    // Step 1: list should be empty.
    let todos = api.list_todos(TodoFilter::All).await.unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 2: create a todo.
    let created = api.create_todo(&NewTodo::new("Integration test")).await.unwrap();
    assert_eq!(created.title, "Integration test");
    assert!(!created.completed);
    assert!(!created.id.is_empty());
    assert!(created.created_at.is_some());
    let id = created.id.clone();

    // Step 3: update title.
    let updated = api.update_todo(&id, &UpdateTodo::title("Updated title")).await.unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(!updated.completed);

    // Step 4: update completed.
    let updated = api.update_todo(&id, &UpdateTodo::completed(true)).await.unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(updated.completed);

    // Step 5: server-side filters.
    assert_eq!(api.list_todos(TodoFilter::Completed).await.unwrap().len(), 1);
    assert!(api.list_todos(TodoFilter::Active).await.unwrap().is_empty());

    // Step 6: delete.
    api.delete_todo_by_id(&id).await.unwrap();

    // Step 7: delete again fails with 404.
    let err = api.delete_todo_by_id(&id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("404"));

    // Step 8: list should be empty again.
    let todos = api.list_todos(TodoFilter::All).await.unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}

#[tokio::test(flavor = "multi_thread")]
async fn app_reconciles_with_server() {
    let addr = start_server();
    let seed = api(addr);
    let first = seed.create_todo(&NewTodo::new("First")).await.unwrap();
    let second = seed.create_todo(&NewTodo::new("Second")).await.unwrap();

    let origin = format!("http://{addr}");
    let app = TodoApp::new(
        &ApiConfig::resolve(None),
        UreqTransport::new(Some(&origin)),
        TodoFilter::All,
    );
    let source = CancelSource::new();
    app.mount(source.token()).await;

    let state = app.snapshot();
    assert!(!state.is_loading());
    assert!(state.error().is_none());
    assert_eq!(state.todos().len(), 2);

    app.add_todo("Third").await;
    app.toggle_todo(&second.id, true).await;
    app.delete_todo(&first.id).await;

    let state = app.snapshot();
    let titles: Vec<&str> = state.todos().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Third", "Second"]);
    assert!(state.todos()[1].completed);
    assert!(state.error().is_none());

    app.set_filter(TodoFilter::Active);
    let visible = app.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Third");

    // The local mirror agrees with the server, modulo ordering.
    let mut server: Vec<String> = seed
        .list_todos(TodoFilter::All)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    let mut local: Vec<String> = state.todos().iter().map(|t| t.id.clone()).collect();
    server.sort();
    local.sort();
    assert_eq!(server, local);

    // A failing mutation keeps the collection and records the status.
    app.edit_todo("no-such-id", "Ghost").await;
    let after = app.snapshot();
    assert_eq!(after.todos(), state.todos());
    assert!(after.error().unwrap().contains("404"));
}

#[tokio::test]
async fn relative_base_without_origin_is_transport_unavailable() {
    let api = ApiClient::new(&ApiConfig::resolve(None), UreqTransport::new(None));
    let err = api.list_todos(TodoFilter::All).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportUnavailable);
}

#[tokio::test(flavor = "multi_thread")]
async fn binary_error_body_keeps_the_status() {
    let addr = serve_raw(vec![
        raw_response("200 OK", br#"[{"id":"1","title":"Keep","completed":false}]"#),
        raw_response("500 Internal Server Error", &[0xff, 0xfe, 0x00, 0x81]),
    ]);
    let origin = format!("http://{addr}");
    let app = TodoApp::new(
        &ApiConfig::resolve(None),
        UreqTransport::new(Some(&origin)),
        TodoFilter::All,
    );
    let source = CancelSource::new();
    app.mount(source.token()).await;
    let before = app.snapshot().todos().to_vec();
    assert_eq!(before.len(), 1);

    app.delete_todo("1").await;

    let state = app.snapshot();
    assert_eq!(state.todos(), before.as_slice());
    assert_eq!(
        state.error(),
        Some("Failed to delete todo: 500 Internal Server Error")
    );
}
