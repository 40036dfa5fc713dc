//! Metrics definitions for the FIPE BFF.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

pub const HTTP_REQUESTS: MetricDef = MetricDef {
    name: "fipe_http_requests_total",
    metric_type: MetricType::Counter,
    description: "Total number of HTTP requests",
};

pub const VEHICLE_SEARCHES: MetricDef = MetricDef {
    name: "fipe_search_stats",
    metric_type: MetricType::Counter,
    description: "Counter for specific vehicle searches by brand, model, and year",
};

pub const PRICE_MIN: MetricDef = MetricDef {
    name: "fipe_price_min",
    metric_type: MetricType::Gauge,
    description: "Minimum observed price for searches",
};

pub const PRICE_MAX: MetricDef = MetricDef {
    name: "fipe_price_max",
    metric_type: MetricType::Gauge,
    description: "Maximum observed price for searches",
};

pub const FUEL_SEARCHES: MetricDef = MetricDef {
    name: "fipe_fuel_count",
    metric_type: MetricType::Counter,
    description: "Count of searches by fuel type",
};

pub const BRAND_SEARCHES: MetricDef = MetricDef {
    name: "fipe_brand_search_count",
    metric_type: MetricType::Counter,
    description: "Count of searches by brand",
};

pub const ALL_METRICS: &[MetricDef] = &[
    HTTP_REQUESTS,
    VEHICLE_SEARCHES,
    PRICE_MIN,
    PRICE_MAX,
    FUEL_SEARCHES,
    BRAND_SEARCHES,
];
