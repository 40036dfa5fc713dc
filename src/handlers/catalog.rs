// src/handlers/catalog.rs
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::{Rejection, Reply};

use super::error::ApiError;
use super::json_bytes;
use crate::services::fetcher::FetchError;
use crate::services::fipe::DEFAULT_VEHICLE_TYPE;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogQuery {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub brand_id: String,
    pub model_id: String,
}

fn upstream_failure(e: FetchError) -> Rejection {
    error!("Upstream lookup failed: {}", e);
    warp::reject::custom(ApiError::bad_gateway(e.to_string()))
}

pub async fn get_brands(query: CatalogQuery, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    state.metrics.record_http_request("/api/brands", "GET");

    let vehicle_type = if query.vehicle_type.is_empty() {
        DEFAULT_VEHICLE_TYPE
    } else {
        query.vehicle_type.as_str()
    };
    info!("Handling request to list {} brands", vehicle_type);

    let data = state.fipe.brands(vehicle_type).await.map_err(upstream_failure)?;
    Ok(json_bytes(data))
}

pub async fn get_models(query: CatalogQuery, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    state.metrics.record_http_request("/api/models", "GET");
    info!("Handling request to list models for {}/{}", query.vehicle_type, query.brand_id);

    let data = state
        .fipe
        .models(&query.vehicle_type, &query.brand_id)
        .await
        .map_err(upstream_failure)?;
    Ok(json_bytes(data))
}

pub async fn get_years(query: CatalogQuery, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    state.metrics.record_http_request("/api/years", "GET");
    info!(
        "Handling request to list years for {}/{}/{}",
        query.vehicle_type, query.brand_id, query.model_id
    );

    let data = state
        .fipe
        .years(&query.vehicle_type, &query.brand_id, &query.model_id)
        .await
        .map_err(upstream_failure)?;
    Ok(json_bytes(data))
}
