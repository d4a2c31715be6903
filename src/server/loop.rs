// Serve loop module
// Accepts connections and serves them one at a time until shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Run the accept-and-serve loop until the shutdown signal fires.
///
/// Each connection is served to completion before the next accept: the
/// server handles one request at a time, and a shutdown arriving while
/// a request is in flight takes effect once that request finishes. A
/// slow client therefore holds the server; acceptable for a local
/// preview tool.
pub async fn run_serve_loop(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            () = shutdown.notified() => break,

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        serve_connection(stream, peer_addr, &state).await;
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }
        }
    }
}

/// Serve a single connection to completion.
///
/// Keep-alive is disabled so one connection carries one request and the
/// loop above returns to `select!` (and the shutdown signal) after each
/// response.
async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let io = TokioIo::new(stream);

    let state = Arc::clone(state);
    let service = service_fn(move |req| {
        let state = Arc::clone(&state);
        async move { handler::handle_request(req, state, peer_addr).await }
    });

    let conn = http1::Builder::new().keep_alive(false).serve_connection(io, service);

    if let Err(err) = conn.await {
        logger::log_connection_error(&err);
    }
}
