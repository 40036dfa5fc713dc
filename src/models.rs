// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of a brand/model list as returned by the FIPE v2 API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub code: String,
    pub name: String,
}

/// Price quotation for a single vehicle/year, in the upstream's v2 shape.
///
/// Every field defaults, whether missing or `null`, so that partial payloads
/// still decode; callers decide whether a record without `price` is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRecord {
    /// Locale formatted, e.g. "R$ 10.000,00".
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(rename = "modelYear", deserialize_with = "null_as_default")]
    pub model_year: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub fuel: String,
    #[serde(rename = "codeFipe", deserialize_with = "null_as_default")]
    pub fipe_code: String,
    /// "MM/YYYY" once normalized by the history synthesizer.
    #[serde(rename = "referenceMonth", deserialize_with = "null_as_default")]
    pub reference_month: String,
    #[serde(rename = "vehicleType", deserialize_with = "null_as_default")]
    pub vehicle_type: i32,
    #[serde(rename = "acronymFuel", deserialize_with = "null_as_default")]
    pub fuel_acronym: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Identifies a single vehicle year in the upstream catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleKey {
    pub vehicle_type: String,
    pub brand_id: String,
    pub model_id: String,
    pub year_id: String,
}
