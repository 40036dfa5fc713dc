// src/bin/probe_price.rs
//
//   probe_price <type> <brandId> <modelId> <yearId>
use dotenv::dotenv;
use log::info;

use fipe_bff::config::Config;
use fipe_bff::models::{PriceRecord, VehicleKey};
use fipe_bff::services::price::parse_fipe_price;
use fipe_bff::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [vehicle_type, brand_id, model_id, year_id] = args.as_slice() else {
        anyhow::bail!("usage: probe_price <type> <brandId> <modelId> <yearId>");
    };

    let state = AppState::new(Config::from_env()?, String::new())?;
    let key = VehicleKey {
        vehicle_type: vehicle_type.clone(),
        brand_id: brand_id.clone(),
        model_id: model_id.clone(),
        year_id: year_id.clone(),
    };

    info!("Fetching price from {}", state.fipe.price_url(&key));
    let data = state.fipe.price(&key).await?;
    let record: PriceRecord = serde_json::from_slice(&data)?;

    println!("{} {} ({}): {}", record.brand, record.model, record.model_year, record.price);
    println!("parsed value: {:?}", parse_fipe_price(&record.price)?);
    Ok(())
}
