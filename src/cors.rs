//! Cross-origin response decoration
//!
//! The add-in host loads pages from its own origin and fetches assets
//! from this server, so every response carries the same three permissive
//! headers, and preflight OPTIONS probes get an empty 200.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::Response;

/// Origins allowed to read responses (any; this is a dev-only server)
pub const ALLOW_ORIGIN: &str = "*";
/// Methods announced to the preflight check
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
/// Request headers announced to the preflight check
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Append the CORS headers to an outgoing response.
///
/// Applied to every response after dispatch, whatever the method, path,
/// or status. Side effect only, no branching.
pub fn decorate(response: &mut Response<Full<Bytes>>) {
    let headers = response.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// Build the response for a preflight OPTIONS request: status 200,
/// empty body. The path is ignored; the probe only checks permission.
pub fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            crate::logger::log_error(&format!("Failed to build preflight response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http;

    #[test]
    fn test_decorate_adds_all_three_headers() {
        let mut resp = http::build_404_response();
        decorate(&mut resp);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(
            resp.headers()["Access-Control-Allow-Methods"],
            "GET, POST, OPTIONS"
        );
        assert_eq!(resp.headers()["Access-Control-Allow-Headers"], "Content-Type");
    }

    #[test]
    fn test_decorate_overwrites_rather_than_duplicates() {
        let mut resp = http::build_404_response();
        decorate(&mut resp);
        decorate(&mut resp);
        let values: Vec<_> = resp
            .headers()
            .get_all("Access-Control-Allow-Origin")
            .iter()
            .collect();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_preflight_is_200() {
        let resp = preflight_response();
        assert_eq!(resp.status(), 200);
    }
}
