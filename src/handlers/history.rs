// src/handlers/history.rs
use chrono::Local;
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::{Rejection, Reply};

use super::error::ApiError;
use super::json_bytes;
use crate::models::VehicleKey;
use crate::services::history::resolve_months;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub brand_id: String,
    pub model_id: String,
    pub year_id: String,
    pub months: Option<String>,
}

pub async fn get_price_history(
    query: HistoryQuery,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    state.metrics.record_http_request("/api/priceHistory", "GET");

    let months = resolve_months(query.months.as_deref(), state.config.history_max_months);
    let key = VehicleKey {
        vehicle_type: query.vehicle_type,
        brand_id: query.brand_id,
        model_id: query.model_id,
        year_id: query.year_id,
    };
    info!("Handling price history request for {:?} ({} months)", key, months);

    let today = Local::now().date_naive();
    let body = state
        .history
        .price_history(&key, months, today)
        .await
        .map_err(|e| {
            error!("Price history failed: {}", e);
            warp::reject::custom(ApiError::bad_gateway(e.to_string()))
        })?;

    Ok(json_bytes(body))
}
