// src/handlers/price.rs
use log::{debug, error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::{Rejection, Reply};

use super::error::ApiError;
use super::json_bytes;
use crate::models::{PriceRecord, VehicleKey};
use crate::services::metrics::AppMetrics;
use crate::services::price::parse_fipe_price;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceQuery {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub brand_id: String,
    pub model_id: String,
    pub year_id: String,
    pub brand_name: String,
    pub model_name: String,
}

impl PriceQuery {
    pub fn into_vehicle_key(self) -> VehicleKey {
        VehicleKey {
            vehicle_type: self.vehicle_type,
            brand_id: self.brand_id,
            model_id: self.model_id,
            year_id: self.year_id,
        }
    }
}

pub async fn get_price(query: PriceQuery, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    state.metrics.record_http_request("/api/price", "GET");
    state
        .metrics
        .record_search(&query.brand_name, &query.model_name, &query.year_id);

    let key = query.into_vehicle_key();
    info!("Handling price request for {:?}", key);

    let data = state.fipe.price(&key).await.map_err(|e| {
        error!("Failed to fetch price: {}", e);
        warp::reject::custom(ApiError::bad_gateway(e.to_string()))
    })?;

    observe_price(&state.metrics, &data, &key.year_id);
    Ok(json_bytes(data))
}

/// Metric side effects of a successful lookup. Payloads we cannot read are
/// still returned to the caller, they just do not move the gauges.
fn observe_price(metrics: &AppMetrics, data: &[u8], year_id: &str) {
    let record: PriceRecord = match serde_json::from_slice(data) {
        Ok(record) => record,
        Err(e) => {
            debug!("price payload did not decode, skipping metrics: {}", e);
            return;
        }
    };

    match parse_fipe_price(&record.price) {
        Ok(value) => metrics.record_price(&record.brand, &record.model, year_id, value),
        Err(e) => debug!("unparsable price {:?}: {}", record.price, e),
    }
    if !record.fuel.is_empty() {
        metrics.record_fuel(&record.fuel);
    }
}
