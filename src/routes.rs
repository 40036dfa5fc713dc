// src/routes.rs
use log::info;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reject::{InvalidQuery, MethodNotAllowed, Rejection};
use warp::{Filter, Reply};

use crate::handlers::catalog::{get_brands, get_models, get_years, CatalogQuery};
use crate::handlers::error::ApiError;
use crate::handlers::history::{get_price_history, HistoryQuery};
use crate::handlers::price::{get_price, PriceQuery};
use crate::handlers::site;
use crate::state::AppState;

// Every rejection is rendered as {"error": "..."}
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else if err.find::<MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let static_dir = state.config.static_dir.clone();
    let state_filter = warp::any().map(move || state.clone());

    let index_route = warp::path::end()
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(site::index);

    let health_route = warp::path!("health")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(site::health);

    let metrics_route = warp::path!("metrics")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(site::metrics);

    let static_route = warp::path("static").and(warp::fs::dir(static_dir));

    let brands_route = warp::path!("api" / "brands")
        .and(warp::get())
        .and(warp::query::<CatalogQuery>())
        .and(state_filter.clone())
        .and_then(get_brands);

    let models_route = warp::path!("api" / "models")
        .and(warp::get())
        .and(warp::query::<CatalogQuery>())
        .and(state_filter.clone())
        .and_then(get_models);

    let years_route = warp::path!("api" / "years")
        .and(warp::get())
        .and(warp::query::<CatalogQuery>())
        .and(state_filter.clone())
        .and_then(get_years);

    let price_route = warp::path!("api" / "price")
        .and(warp::get())
        .and(warp::query::<PriceQuery>())
        .and(state_filter.clone())
        .and_then(get_price);

    let history_route = warp::path!("api" / "priceHistory")
        .and(warp::get())
        .and(warp::query::<HistoryQuery>())
        .and(state_filter.clone())
        .and_then(get_price_history);

    info!("All routes configured successfully.");

    index_route
        .or(health_route)
        .or(metrics_route)
        .or(static_route)
        .or(brands_route)
        .or(models_route)
        .or(years_route)
        .or(price_route)
        .or(history_route)
        .recover(handle_rejection)
}
