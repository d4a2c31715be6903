//! End-to-end dispatch tests
//!
//! Exercise request dispatch against a temporary root directory and
//! check the externally observable contract: exact file bytes, the
//! three CORS headers on every response, the empty-200 preflight, and
//! 404 for paths with no file.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use addin_preview::config::{AppState, Config};
use addin_preview::handler::{respond, RequestContext};
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

/// Build an `AppState` over a fresh temp directory seeded with the
/// assets an add-in ships.
fn test_state(name: &str) -> Arc<AppState> {
    let root = temp_root(name);
    fs::write(root.join("index.html"), b"<html>ok</html>").unwrap();
    fs::write(root.join("style.css"), b"body { margin: 0; }").unwrap();
    fs::write(root.join("config.json"), br#"{"env":"dev"}"#).unwrap();

    let cfg = Config::load_from("no-such-config-file").unwrap();
    Arc::new(AppState::new(cfg, root.canonicalize().unwrap()))
}

fn temp_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("addin-preview-it-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

async fn body_bytes(resp: Response<Full<Bytes>>) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

fn assert_cors_headers(resp: &Response<Full<Bytes>>) {
    assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    assert_eq!(
        resp.headers()["Access-Control-Allow-Methods"],
        "GET, POST, OPTIONS"
    );
    assert_eq!(resp.headers()["Access-Control-Allow-Headers"], "Content-Type");
}

#[tokio::test]
async fn get_returns_exact_bytes_with_cors() {
    let state = test_state("get");
    let ctx = RequestContext::new(Method::GET, "/index.html");

    let resp = respond(&ctx, &state).await;

    assert_eq!(resp.status(), 200);
    assert_cors_headers(&resp);
    assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
    assert_eq!(body_bytes(resp).await, b"<html>ok</html>");
}

#[tokio::test]
async fn options_is_empty_200_with_cors_for_any_path() {
    let state = test_state("options");

    for path in ["/anything", "/index.html", "/no/such/path"] {
        let ctx = RequestContext::new(Method::OPTIONS, path);
        let resp = respond(&ctx, &state).await;

        assert_eq!(resp.status(), 200);
        assert_cors_headers(&resp);
        assert!(body_bytes(resp).await.is_empty());
    }
}

#[tokio::test]
async fn missing_file_is_404_with_cors() {
    let state = test_state("missing");
    let ctx = RequestContext::new(Method::GET, "/nope.html");

    let resp = respond(&ctx, &state).await;

    assert_eq!(resp.status(), 404);
    assert_cors_headers(&resp);
}

#[tokio::test]
async fn head_has_empty_body_and_full_headers() {
    let state = test_state("head");
    let ctx = RequestContext::new(Method::HEAD, "/style.css");

    let resp = respond(&ctx, &state).await;

    assert_eq!(resp.status(), 200);
    assert_cors_headers(&resp);
    assert_eq!(resp.headers()["Content-Type"], "text/css");
    assert_eq!(resp.headers()["Content-Length"], "19");
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn post_falls_through_to_file_serving() {
    let state = test_state("post");

    // A matching path serves the file, like GET
    let resp = respond(&RequestContext::new(Method::POST, "/config.json"), &state).await;
    assert_eq!(resp.status(), 200);
    assert_cors_headers(&resp);
    assert_eq!(body_bytes(resp).await, br#"{"env":"dev"}"#);

    // A non-matching path gets the 404
    let resp = respond(&RequestContext::new(Method::POST, "/submit"), &state).await;
    assert_eq!(resp.status(), 404);
    assert_cors_headers(&resp);
}

#[tokio::test]
async fn directory_request_serves_index() {
    let state = test_state("index");
    let ctx = RequestContext::new(Method::GET, "/");

    let resp = respond(&ctx, &state).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
    assert_eq!(body_bytes(resp).await, b"<html>ok</html>");
}
