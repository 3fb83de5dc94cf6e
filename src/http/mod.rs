//! HTTP protocol layer module
//!
//! Response building and request body collection, independent of the store.

pub mod body;
pub mod response;

pub use body::{read_full_body, BoxError};
pub use response::build_status_response;
