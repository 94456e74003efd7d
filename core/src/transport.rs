//! Execution of `HttpRequest` values.
//!
//! # Design
//! The core never performs I/O itself; a `Transport` turns a request into a
//! response. `UreqTransport` disables ureq's status-code-as-error behavior so
//! 4xx/5xx responses come back as data and the `TodoClient` interprets them.
//! ureq is blocking, so each call runs on tokio's blocking pool.

use std::future::Future;

use tracing::debug;
use ureq::Agent;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip. Implementations report only transport
/// failures as errors; every received status is returned as a response.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// `Transport` backed by a ureq `Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    origin: Option<String>,
}

impl UreqTransport {
    /// `origin` (scheme + host + port) is prepended to relative request
    /// paths. Without it, relative paths cannot be executed.
    pub fn new(origin: Option<&str>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            origin: origin.map(|o| o.trim_end_matches('/').to_string()),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send {
        let agent = self.agent.clone();
        let url = resolve_url(self.origin.as_deref(), &request.path);
        async move {
            let url = url?;
            debug!(method = %request.method, %url, "sending request");
            tokio::task::spawn_blocking(move || execute_blocking(&agent, &url, request))
                .await
                .map_err(|e| ApiError::transport(format!("request task failed: {e}")))?
        }
    }
}

fn resolve_url(origin: Option<&str>, path: &str) -> Result<String, ApiError> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Ok(path.to_string());
    }
    let origin = origin.ok_or_else(|| {
        ApiError::transport(format!("relative url `{path}` needs an origin to be requested"))
    })?;
    if path.starts_with('/') {
        Ok(format!("{origin}{path}"))
    } else {
        Ok(format!("{origin}/{path}"))
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn execute_blocking(agent: &Agent, url: &str, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => with_headers(agent.get(url), &req.headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(url), &req.headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(url), &req.headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(url), &req.headers).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            with_headers(agent.patch(url), &req.headers).send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => with_headers(agent.patch(url), &req.headers).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::transport(e.to_string()))?;

    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    // Error bodies are never parsed, so an unreadable one must not hide the status.
    let body = match response.body_mut().read_to_vec() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if !status.is_success() => {
            debug!(status = status.as_u16(), error = %e, "discarding unreadable error body");
            String::new()
        }
        Err(e) => return Err(ApiError::transport(format!("failed to read response body: {e}"))),
    };

    debug!(status = status.as_u16(), "received response");
    Ok(HttpResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        headers,
        body,
    })
}
