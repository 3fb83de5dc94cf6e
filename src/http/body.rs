//! Request body collection

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Read the whole body into one buffer, in arrival order.
///
/// Resolves once the final frame is received, or fails with the first
/// transport error.
pub async fn read_full_body<B>(body: B) -> Result<Bytes, BoxError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let collected = body.collect().await.map_err(Into::into)?;
    Ok(collected.to_bytes())
}
