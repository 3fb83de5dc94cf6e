//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method → handler selection,
//! store-readiness gating, and the guarantee that every request ends with
//! exactly one response, whatever happens inside the handler.

use futures_util::FutureExt;
use http_body_util::Full;
use hyper::body::{Body, Bytes, Incoming};
use hyper::{Method, Request, Response, StatusCode};
use std::any::Any;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use super::{pages, HandlerError};
use crate::config::AppState;
use crate::http::{self, BoxError};
use crate::logger::{self, AccessLogEntry};
use crate::store::{is_store_ready, PageStore};

/// Handler selected for a request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRoute {
    GetPage,
    SetPage,
    DeletePage,
    NotFound,
}

impl PageRoute {
    pub fn from_method(method: &Method) -> Self {
        match *method {
            Method::GET | Method::HEAD => Self::GetPage,
            Method::POST | Method::PUT => Self::SetPage,
            Method::DELETE => Self::DeletePage,
            _ => Self::NotFound,
        }
    }

    pub const fn requires_store(self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<S>(
    req: Request<Incoming>,
    state: Arc<AppState<S>>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    S: PageStore + ?Sized,
{
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let mut entry = AccessLogEntry::from_request(&req, remote_addr);

    logger::log_request_start(&method, &uri);

    let response = AssertUnwindSafe(dispatch(state.store.as_ref(), req))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| {
            internal_error(&HandlerError::Panicked(panic_message(payload.as_ref())))
        });

    logger::log_request_done(&method, &uri, response.status());
    entry.complete(response.status(), body_len(&response), started.elapsed());
    logger::log_access(&entry, &state.config.logging.access_log_format);

    Ok(response)
}

/// Select the handler, gate it on store readiness, run it, and fold any failure into 500.
///
/// The store key is the URI path; the query string is not part of it.
pub async fn dispatch<S, B>(store: &S, req: Request<B>) -> Response<Full<Bytes>>
where
    S: PageStore + ?Sized,
    B: Body,
    B::Error: Into<BoxError>,
{
    let route = PageRoute::from_method(req.method());

    if route.requires_store() && !is_store_ready(store) {
        logger::log_warning("Request handler needs the store but it is not connected");
        return http::build_status_response(StatusCode::BAD_GATEWAY, None);
    }

    let (parts, body) = req.into_parts();
    let path = parts.uri.path();

    let outcome = match route {
        PageRoute::GetPage => pages::get_page(store, path).await,
        PageRoute::SetPage => pages::set_page(store, path, body).await,
        PageRoute::DeletePage => pages::delete_page(store, path).await,
        PageRoute::NotFound => Ok(pages::not_found()),
    };

    outcome.unwrap_or_else(|err| internal_error(&err))
}

fn internal_error(err: &HandlerError) -> Response<Full<Bytes>> {
    logger::log_error(&format!("An error occurred during request handling: {err}"));
    http::build_status_response(StatusCode::INTERNAL_SERVER_ERROR, None)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}
