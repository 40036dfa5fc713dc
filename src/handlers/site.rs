// src/handlers/site.rs
use serde_json::json;
use std::sync::Arc;
use warp::http::header::CONTENT_TYPE;
use warp::{Rejection, Reply};

use crate::state::AppState;

pub async fn index(state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    state.metrics.record_http_request("/", "GET");
    Ok(warp::reply::html(state.index_html.clone()))
}

pub async fn health(state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    state.metrics.record_http_request("/health", "GET");
    Ok(warp::reply::json(&json!({ "status": "ok" })))
}

pub async fn metrics(state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::with_header(
        state.metrics.render(),
        CONTENT_TYPE,
        "text/plain; version=0.0.4",
    ))
}
