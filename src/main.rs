use anyhow::Context;
use dotenv::dotenv;
use log::info;
use std::net::SocketAddr;
use warp::Filter;

use fipe_bff::config::Config;
use fipe_bff::routes;
use fipe_bff::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = Config::from_env()?;
    info!("Using upstream {}", config.base_url);

    // The UI shell is read once; a missing template is a deployment error.
    let index_html = std::fs::read_to_string(&config.index_template).with_context(|| {
        format!("failed to read UI template {}", config.index_template.display())
    })?;

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let state = AppState::new(config, index_html).context("failed to build HTTP client")?;

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    let api = routes::routes(state).with(cors);
    info!("Routes configured successfully with CORS.");

    let (bound, server) = warp::serve(api).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
    })?;

    info!("Server starting on {}", bound);
    server.await;
    Ok(())
}
