// src/services/metrics.rs
use metrics::{counter, describe_counter, describe_gauge, gauge, with_local_recorder};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use std::sync::Arc;

use crate::metrics_defs::{
    MetricType, ALL_METRICS, BRAND_SEARCHES, FUEL_SEARCHES, HTTP_REQUESTS, PRICE_MAX, PRICE_MIN,
    VEHICLE_SEARCHES,
};

struct Inner {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

/// Process-scoped metrics registry.
///
/// The Prometheus recorder is never installed as the global recorder; each
/// emission goes through `with_local_recorder`, so independent instances
/// (one per test, one per server) never share series.
#[derive(Clone)]
pub struct AppMetrics {
    inner: Arc<Inner>,
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl AppMetrics {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        with_local_recorder(&recorder, || {
            for def in ALL_METRICS {
                match def.metric_type {
                    MetricType::Counter => describe_counter!(def.name, def.description),
                    MetricType::Gauge => describe_gauge!(def.name, def.description),
                }
            }
        });

        AppMetrics {
            inner: Arc::new(Inner { recorder, handle }),
        }
    }

    pub fn record_http_request(&self, path: &str, method: &str) {
        with_local_recorder(&self.inner.recorder, || {
            counter!(HTTP_REQUESTS.name, "path" => path.to_owned(), "method" => method.to_owned())
                .increment(1);
        });
    }

    /// Counts a price lookup by the names the caller searched for.
    pub fn record_search(&self, brand_name: &str, model_name: &str, year_id: &str) {
        with_local_recorder(&self.inner.recorder, || {
            counter!(
                VEHICLE_SEARCHES.name,
                "brand_name" => brand_name.to_owned(),
                "model_name" => model_name.to_owned(),
                "year_id" => year_id.to_owned()
            )
            .increment(1);
            counter!(BRAND_SEARCHES.name, "brand_name" => brand_name.to_owned()).increment(1);
        });
    }

    /// Both gauges track the latest observed value for the vehicle.
    pub fn record_price(&self, brand: &str, model: &str, year_id: &str, value: f64) {
        with_local_recorder(&self.inner.recorder, || {
            for def in [PRICE_MIN, PRICE_MAX] {
                gauge!(
                    def.name,
                    "brand_name" => brand.to_owned(),
                    "model_name" => model.to_owned(),
                    "year_id" => year_id.to_owned()
                )
                .set(value);
            }
        });
    }

    pub fn record_fuel(&self, fuel: &str) {
        with_local_recorder(&self.inner.recorder, || {
            counter!(FUEL_SEARCHES.name, "fuel" => fuel.to_owned()).increment(1);
        });
    }

    /// Prometheus text exposition of everything recorded so far.
    pub fn render(&self) -> String {
        self.inner.handle.render()
    }
}
