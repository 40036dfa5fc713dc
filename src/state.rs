// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::cache::TtlCache;
use crate::services::fetcher::Fetcher;
use crate::services::fipe::FipeClient;
use crate::services::history::HistorySynthesizer;
use crate::services::metrics::AppMetrics;

/// Everything the handlers share. Built once in `main` (or once per test)
/// and handed to the routes; there is no other process-wide state.
pub struct AppState {
    pub config: Config,
    pub fipe: FipeClient,
    pub history: HistorySynthesizer,
    pub metrics: AppMetrics,
    pub index_html: String,
}

impl AppState {
    pub fn new(config: Config, index_html: String) -> Result<Arc<Self>, reqwest::Error> {
        let fetcher = Fetcher::new(config.timeout, &config.user_agent)?;
        let fipe = FipeClient::new(config.base_url.clone(), fetcher, Arc::new(TtlCache::new()));
        let history = HistorySynthesizer::new(fipe.clone());

        Ok(Arc::new(AppState {
            config,
            fipe,
            history,
            metrics: AppMetrics::new(),
            index_html,
        }))
    }
}
