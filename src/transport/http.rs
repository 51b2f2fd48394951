//! Minimal HTTP façade over the dispatcher.
//!
//! Routes:
//! - `GET /health` liveness probe
//! - `GET /mcp` tool, resource and prompt listing
//! - `POST /mcp` run a tool: `{"tool": ..., "arguments": {...}, "sessionId": ...}`

use std::convert::Infallible;
use std::net::SocketAddr;

use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::UiForgeError;
use crate::server::UiForgeServer;
use crate::session::SessionTracker;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToolCallBody {
    tool: String,
    #[serde(default)]
    arguments: Value,
    session_id: Option<String>,
}

/// Bind `addr` and serve until `shutdown` is cancelled.
pub async fn run(
    addr: SocketAddr,
    server: UiForgeServer,
    shutdown: CancellationToken,
) -> Result<(), UiForgeError> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, server, shutdown).await
}

/// Serve on an already bound listener until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    server: UiForgeServer,
    shutdown: CancellationToken,
) -> Result<(), UiForgeError> {
    info!(addr = %listener.local_addr()?, "HTTP server listening");

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                let (stream, remote_addr) = match accept_result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "HTTP accept error");
                        continue;
                    }
                };

                let io = TokioIo::new(stream);
                let server = server.clone();
                let shutdown = shutdown.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        let server = server.clone();
                        let cancel = shutdown.child_token();
                        async move { handle_request(req, server, cancel).await }
                    });

                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        if !e.is_incomplete_message() {
                            warn!(%remote_addr, error = %e, "HTTP connection error");
                        }
                    }
                });
            }

            _ = shutdown.cancelled() => {
                info!("HTTP server shutting down");
                break;
            }
        }
    }
    Ok(())
}

async fn handle_request(
    req: Request<Incoming>,
    server: UiForgeServer,
    cancel: CancellationToken,
) -> Result<Response<Full<Bytes>>, Infallible> {
    debug!(method = %req.method(), path = req.uri().path(), "HTTP request");
    let response = match (req.method(), req.uri().path()) {
        (&Method::GET, "/health") => json_response(StatusCode::OK, &json!({ "status": "ok" })),
        (&Method::GET, "/mcp") => json_response(StatusCode::OK, &server.capabilities()),
        (&Method::POST, "/mcp") => match read_json(req).await {
            Ok(body) => call_tool(body, &server, &cancel).await,
            Err(message) => error_response(StatusCode::BAD_REQUEST, &message),
        },
        (_, path) => error_response(StatusCode::NOT_FOUND, &format!("no route for {path}")),
    };
    Ok(response)
}

async fn read_json(req: Request<Incoming>) -> Result<ToolCallBody, String> {
    let bytes = Limited::new(req.into_body(), MAX_BODY_BYTES)
        .collect()
        .await
        .map_err(|e| format!("failed to read request body: {e}"))?
        .to_bytes();
    serde_json::from_slice(&bytes).map_err(|e| format!("invalid request body: {e}"))
}

async fn call_tool(
    body: ToolCallBody,
    server: &UiForgeServer,
    cancel: &CancellationToken,
) -> Response<Full<Bytes>> {
    let session_id = body
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(SessionTracker::new_session_id);

    match server
        .call_tool(&body.tool, body.arguments, &session_id, cancel)
        .await
    {
        Ok(mut result) => {
            result
                .metadata
                .entry("sessionId")
                .or_insert_with(|| json!(session_id));
            match serde_json::to_value(&result) {
                Ok(value) => json_response(StatusCode::OK, &value),
                Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
            }
        }
        Err(err @ UiForgeError::UnknownTool(_)) => {
            error_response(StatusCode::NOT_FOUND, &err.to_string())
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &json!({ "error": message }))
}

fn json_response(status: StatusCode, body: &Value) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, hyper::header::HeaderValue::from_static("application/json"));
    response
}
