// src/bin/probe_history.rs
//
// Runs the history synthesizer against the configured upstream:
//   probe_history <type> <brandId> <modelId> <yearId> [months]
use chrono::Local;
use dotenv::dotenv;
use log::{error, info};

use fipe_bff::config::Config;
use fipe_bff::models::VehicleKey;
use fipe_bff::services::history::resolve_months;
use fipe_bff::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        anyhow::bail!("usage: probe_history <type> <brandId> <modelId> <yearId> [months]");
    }

    let config = Config::from_env()?;
    let months = resolve_months(args.get(4).map(String::as_str), config.history_max_months);
    let state = AppState::new(config, String::new())?;

    let key = VehicleKey {
        vehicle_type: args[0].clone(),
        brand_id: args[1].clone(),
        model_id: args[2].clone(),
        year_id: args[3].clone(),
    };
    info!("Probing {} months of history for {:?}", months, key);

    match state.history.price_history(&key, months, Local::now().date_naive()).await {
        Ok(body) => {
            let value: serde_json::Value = serde_json::from_slice(&body)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            error!("ERROR: {}", e);
            Err(e.into())
        }
    }
}
