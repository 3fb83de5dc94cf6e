//! Page handlers
//!
//! Each handler maps one store operation to exactly one terminal response.
//! Readiness has already been checked by the router.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Response, StatusCode};

use super::HandlerError;
use crate::http::{self, BoxError};
use crate::logger;
use crate::store::PageStore;

/// Read the page stored under `path`.
///
/// Existence and value are fetched in two round-trips. A nil or empty value
/// answers 200 with the reason phrase as body.
pub async fn get_page<S>(store: &S, path: &str) -> Result<Response<Full<Bytes>>, HandlerError>
where
    S: PageStore + ?Sized,
{
    logger::log_store_command("Get", path);

    if store.exists(path).await? != 1 {
        return Ok(http::build_status_response(StatusCode::NOT_FOUND, None));
    }

    let value = store.get(path).await?.filter(|value| !value.is_empty());
    Ok(http::build_status_response(StatusCode::OK, value))
}

/// Store the full request body under `path`, replacing any previous value.
pub async fn set_page<S, B>(
    store: &S,
    path: &str,
    body: B,
) -> Result<Response<Full<Bytes>>, HandlerError>
where
    S: PageStore + ?Sized,
    B: Body,
    B::Error: Into<BoxError>,
{
    logger::log_store_command("Set", path);

    let value = http::read_full_body(body)
        .await
        .map_err(HandlerError::Body)?;
    store.set(path, value).await?;

    Ok(http::build_status_response(StatusCode::CREATED, None))
}

/// Delete `path` whether or not it exists.
pub async fn delete_page<S>(store: &S, path: &str) -> Result<Response<Full<Bytes>>, HandlerError>
where
    S: PageStore + ?Sized,
{
    logger::log_store_command("Del", path);

    store.delete(path).await?;
    Ok(http::build_status_response(StatusCode::OK, None))
}

pub fn not_found() -> Response<Full<Bytes>> {
    http::build_status_response(StatusCode::NOT_FOUND, None)
}
