//! Request dispatch module
//!
//! Entry point for HTTP request processing: builds the request context,
//! dispatches on method, and decorates every outgoing response with the
//! CORS headers.

use crate::config::AppState;
use crate::cors;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use crate::logger::AccessLogEntry;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating what dispatch needs to know
pub struct RequestContext {
    pub method: Method,
    pub path: String,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::new(req.method().clone(), req.uri().path());

    let response = respond(&ctx, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            ctx.method.to_string(),
            ctx.path.clone(),
        );
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length_of(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch a request and decorate the result.
///
/// Every response leaves with the CORS headers attached, whatever the
/// method, path, or status.
pub async fn respond(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    let mut response = dispatch(ctx, state).await;
    cors::decorate(&mut response);
    response
}

/// Method dispatch: OPTIONS answers the preflight probe, everything
/// else goes through file serving.
async fn dispatch(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    match ctx.method {
        Method::OPTIONS => cors::preflight_response(),
        _ => serve_static(ctx, state).await,
    }
}

/// Serve the requested path from the root directory, or 404.
async fn serve_static(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    match static_files::load(&state.root, &ctx.path).await {
        Some((content, content_type)) => {
            http::build_file_response(content, content_type, ctx.is_head())
        }
        None => http::build_404_response(),
    }
}

/// Body size as advertised by the response, for the access log
fn content_length_of(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
