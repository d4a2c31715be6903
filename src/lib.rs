//! Static file server with CORS for local browser add-in development.
//!
//! Serves the add-in's assets (HTML, CSS, JS, JSON) from a root
//! directory, appends permissive cross-origin headers to every response,
//! and answers browser preflight requests so pages loaded by the add-in
//! host can fetch from localhost.
//!
//! The modules:
//! - `config`: layered configuration and the immutable per-process state
//! - `cors`: the response decorator and the preflight response
//! - `http`: MIME detection and response builders
//! - `handler`: request dispatch and static file loading
//! - `logger`: banners, access log, error log
//! - `server`: listener construction, signals, and the serve loop

pub mod config;
pub mod cors;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
