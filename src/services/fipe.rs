// src/services/fipe.rs
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{BRANDS_TTL, MODELS_TTL, YEARS_TTL};
use crate::models::VehicleKey;

use super::cache::TtlCache;
use super::fetcher::{FetchError, Fetcher};

pub const DEFAULT_VEHICLE_TYPE: &str = "cars";

/// Read-through access to the upstream catalog:
/// `/{type}/brands[/{brandId}/models[/{modelId}/years[/{yearId}]]]`.
#[derive(Clone)]
pub struct FipeClient {
    base_url: String,
    fetcher: Fetcher,
    cache: Arc<TtlCache>,
}

impl FipeClient {
    pub fn new(base_url: impl Into<String>, fetcher: Fetcher, cache: Arc<TtlCache>) -> Self {
        FipeClient {
            base_url: base_url.into(),
            fetcher,
            cache,
        }
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn brands_url(&self, vehicle_type: &str) -> String {
        format!("{}/{}/brands", self.base_url, vehicle_type)
    }

    pub fn models_url(&self, vehicle_type: &str, brand_id: &str) -> String {
        format!("{}/{}/brands/{}/models", self.base_url, vehicle_type, brand_id)
    }

    pub fn years_url(&self, vehicle_type: &str, brand_id: &str, model_id: &str) -> String {
        format!(
            "{}/{}/brands/{}/models/{}/years",
            self.base_url, vehicle_type, brand_id, model_id
        )
    }

    pub fn price_url(&self, key: &VehicleKey) -> String {
        format!(
            "{}/{}",
            self.years_url(&key.vehicle_type, &key.brand_id, &key.model_id),
            key.year_id
        )
    }

    pub async fn brands(&self, vehicle_type: &str) -> Result<Vec<u8>, FetchError> {
        let key = format!("brands:{}", vehicle_type);
        self.cached(&key, &self.brands_url(vehicle_type), BRANDS_TTL).await
    }

    pub async fn models(&self, vehicle_type: &str, brand_id: &str) -> Result<Vec<u8>, FetchError> {
        let key = format!("models:{}:{}", vehicle_type, brand_id);
        self.cached(&key, &self.models_url(vehicle_type, brand_id), MODELS_TTL)
            .await
    }

    pub async fn years(
        &self,
        vehicle_type: &str,
        brand_id: &str,
        model_id: &str,
    ) -> Result<Vec<u8>, FetchError> {
        let key = format!("years:{}:{}:{}", vehicle_type, brand_id, model_id);
        let url = self.years_url(vehicle_type, brand_id, model_id);
        self.cached(&key, &url, YEARS_TTL).await
    }

    /// Current price for one vehicle year. Never cached.
    pub async fn price(&self, key: &VehicleKey) -> Result<Vec<u8>, FetchError> {
        self.fetcher.fetch(&self.price_url(key)).await
    }

    async fn cached(&self, key: &str, url: &str, ttl: Duration) -> Result<Vec<u8>, FetchError> {
        if let Some(data) = self.cache.get(key).await {
            debug!("cache hit for {}", key);
            return Ok(data);
        }

        debug!("cache miss for {}, fetching {}", key, url);
        let data = self.fetcher.fetch(url).await?;
        self.cache.put(key, data.clone(), ttl).await;
        info!("cached {} ({} bytes)", key, data.len());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FipeClient {
        let fetcher = Fetcher::new(Duration::from_secs(1), "fipe-bff/test").unwrap();
        FipeClient::new("http://127.0.0.1:9/api/v2", fetcher, Arc::new(TtlCache::new()))
    }

    #[test]
    fn builds_upstream_paths() {
        let c = client();
        assert_eq!(c.brands_url("cars"), "http://127.0.0.1:9/api/v2/cars/brands");
        assert_eq!(
            c.models_url("trucks", "23"),
            "http://127.0.0.1:9/api/v2/trucks/brands/23/models"
        );
        assert_eq!(
            c.years_url("motorcycles", "23", "5585"),
            "http://127.0.0.1:9/api/v2/motorcycles/brands/23/models/5585/years"
        );
        let key = VehicleKey {
            vehicle_type: "cars".into(),
            brand_id: "21".into(),
            model_id: "4828".into(),
            year_id: "2014-1".into(),
        };
        assert_eq!(
            c.price_url(&key),
            "http://127.0.0.1:9/api/v2/cars/brands/21/models/4828/years/2014-1"
        );
    }

    #[tokio::test]
    async fn cached_lookup_skips_the_network() {
        let c = client();
        c.cache
            .put("models:cars:23", b"[{\"code\":\"1\",\"name\":\"Gol\"}]".to_vec(), MODELS_TTL)
            .await;
        // The base url is unreachable, so only a cache hit can succeed.
        let data = c.models("cars", "23").await.unwrap();
        assert!(String::from_utf8(data).unwrap().contains("Gol"));
        assert!(c.models("cars", "24").await.is_err());
    }
}
