//! HTTP response building module
//!
//! Every page response is a status plus an optional body; without a body the
//! canonical reason phrase is sent.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Build a response with `status` and `body`, defaulting the body to the reason phrase
pub fn build_status_response(status: StatusCode, body: Option<Bytes>) -> Response<Full<Bytes>> {
    let body = body.unwrap_or_else(|| Bytes::from_static(reason_phrase(status).as_bytes()));
    let content_length = body.len();

    Response::builder()
        .status(status)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            crate::logger::log_error(&format!("Failed to build {status} response: {e}"));
            let mut fallback = Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = status;
            fallback
        })
}

fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}
