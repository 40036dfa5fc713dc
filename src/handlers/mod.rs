// src/handlers/mod.rs

pub mod catalog;
pub mod error;
pub mod history;
pub mod price;
pub mod site;

use warp::http::header::CONTENT_TYPE;
use warp::Reply;

/// Upstream bytes go back to the caller untouched.
pub(crate) fn json_bytes(data: Vec<u8>) -> impl Reply {
    warp::reply::with_header(data, CONTENT_TYPE, "application/json")
}
