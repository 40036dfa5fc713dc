// src/services/history.rs
//
// The upstream has no documented history endpoint. We try one native shape
// first, then probe every requested month against a list of candidate URL
// shapes, and finally fall back to the current price alone. Whatever comes
// back is relabelled so entry `i` always reads "current month - i".
use chrono::{Datelike, Months, NaiveDate};
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::models::{PriceRecord, VehicleKey};

use super::fetcher::{FetchError, Fetcher};
use super::fipe::FipeClient;

pub const DEFAULT_MONTHS: u32 = 12;

const REFERENCE_MONTH_KEY: &str = "referenceMonth";
const PRICE_KEY: &str = "price";
/// Older payloads carry the value under the Portuguese key.
const LEGACY_VALUE_KEY: &str = "Valor";

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history fetch failed: {history}, fallback failed: {fallback}")]
    Exhausted {
        history: FetchError,
        fallback: FetchError,
    },
}

/// Builds a candidate URL from the vehicle's price URL and a "YYYY-MM" reference.
type CandidateFn = fn(&str, &str) -> String;

fn query_reference_month(price_url: &str, reference: &str) -> String {
    format!("{}?referenceMonth={}", price_url, reference)
}

fn query_reference(price_url: &str, reference: &str) -> String {
    format!("{}?reference={}", price_url, reference)
}

fn query_month(price_url: &str, reference: &str) -> String {
    format!("{}?month={}", price_url, reference)
}

fn path_history(price_url: &str, reference: &str) -> String {
    format!("{}/history/{}", price_url, reference)
}

fn path_historico(price_url: &str, reference: &str) -> String {
    format!("{}/historico/{}", price_url, reference)
}

/// Tried in order; the first acceptable response wins.
const PROBE_CANDIDATES: &[CandidateFn] = &[
    query_reference_month,
    query_reference,
    query_month,
    path_history,
    path_historico,
];

/// Interpret the `months` query parameter: absent, unparsable or non-positive
/// values mean the default, and anything above `max` is clamped.
pub fn resolve_months(raw: Option<&str>, max: u32) -> u32 {
    let requested = raw
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MONTHS as i64);
    requested.min(max.max(1) as i64) as u32
}

/// First day of the month `offset` months before `today`.
pub fn month_start(today: NaiveDate, offset: u32) -> NaiveDate {
    let first = today.with_day(1).unwrap_or(today);
    first
        .checked_sub_months(Months::new(offset))
        .unwrap_or(NaiveDate::MIN)
}

/// "MM/YYYY" label for `offset` months before `today`.
pub fn month_label(today: NaiveDate, offset: u32) -> String {
    let d = month_start(today, offset);
    format!("{:02}/{}", d.month(), d.year())
}

/// "YYYY-MM" reference sent to the probe candidates.
pub fn month_reference(today: NaiveDate, offset: u32) -> String {
    let d = month_start(today, offset);
    format!("{}-{:02}", d.year(), d.month())
}

pub struct HistorySynthesizer {
    fipe: FipeClient,
}

impl HistorySynthesizer {
    pub fn new(fipe: FipeClient) -> Self {
        HistorySynthesizer { fipe }
    }

    pub fn history_url(&self, key: &VehicleKey, months: u32) -> String {
        format!("{}/history?months={}", self.fipe.price_url(key), months)
    }

    /// Returns the JSON body for `/api/priceHistory`.
    pub async fn price_history(
        &self,
        key: &VehicleKey,
        months: u32,
        today: NaiveDate,
    ) -> Result<Vec<u8>, HistoryError> {
        let history_err = match self.fipe.fetcher().fetch(&self.history_url(key, months)).await {
            Ok(data) => {
                info!("native history endpoint answered for {:?}", key);
                return Ok(normalize_native(data, today));
            }
            Err(e) => e,
        };
        debug!("native history unavailable ({}), probing {} months", history_err, months);

        let mut history = self.probe_months(key, months, today).await;

        if history.is_empty() {
            warn!("no month probe succeeded for {:?}, falling back to current price", key);
            let single = self
                .fipe
                .price(key)
                .await
                .map_err(|fallback| HistoryError::Exhausted {
                    history: history_err,
                    fallback,
                })?;
            history.push(value_from_body(&single));
        } else {
            info!("assembled {} history entries from month probes", history.len());
        }

        let history: Vec<Value> = history
            .into_iter()
            .enumerate()
            .map(|(i, entry)| relabel(entry, &month_label(today, i as u32)))
            .collect();

        Ok(json!({ "history": history }).to_string().into_bytes())
    }

    /// One task per month, all spawned up front and joined in offset order.
    async fn probe_months(&self, key: &VehicleKey, months: u32, today: NaiveDate) -> Vec<Value> {
        let price_url = self.fipe.price_url(key);

        let handles: Vec<_> = (0..months)
            .map(|offset| {
                let fetcher = self.fipe.fetcher().clone();
                let price_url = price_url.clone();
                tokio::spawn(async move { probe_month(&fetcher, &price_url, today, offset).await })
            })
            .collect();

        let mut history = Vec::with_capacity(handles.len());
        for (offset, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(Some(entry)) => history.push(entry),
                Ok(None) => debug!("no data for month offset {}", offset),
                Err(e) => error!("probe task for month offset {} failed: {}", offset, e),
            }
        }
        history
    }
}

async fn probe_month(
    fetcher: &Fetcher,
    price_url: &str,
    today: NaiveDate,
    offset: u32,
) -> Option<Value> {
    let reference = month_reference(today, offset);
    let label = month_label(today, offset);

    for candidate in PROBE_CANDIDATES {
        let url = candidate(price_url, &reference);
        let body = match fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                debug!("candidate failed: {}", e);
                continue;
            }
        };
        if let Some(entry) = accept_candidate(&body, &label) {
            debug!("month {} answered by {}", reference, url);
            return Some(entry);
        }
    }
    None
}

/// Decide whether a candidate's body is usable. `None` means try the next one.
fn accept_candidate(body: &[u8], label: &str) -> Option<Value> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return Some(value_from_body(body)),
    };
    if value.is_null() {
        return None;
    }

    if let Ok(mut record) = PriceRecord::deserialize(&value) {
        if record.price.is_empty() {
            return None;
        }
        if record.reference_month.is_empty() {
            record.reference_month = label.to_string();
        }
        if let Ok(entry) = serde_json::to_value(&record) {
            return Some(entry);
        }
    }

    Some(match value {
        Value::Object(map) => Value::Object(patch_generic(map, label)),
        other => other,
    })
}

/// Fill in the reference month and the price for a payload that did not
/// match `PriceRecord`.
fn patch_generic(mut map: Map<String, Value>, label: &str) -> Map<String, Value> {
    if map.get(REFERENCE_MONTH_KEY).map_or(true, Value::is_null) {
        map.insert(REFERENCE_MONTH_KEY.to_string(), Value::String(label.to_string()));
    }
    if !map.contains_key(PRICE_KEY) {
        if let Some(v) = map.get(LEGACY_VALUE_KEY).cloned() {
            map.insert(PRICE_KEY.to_string(), v);
        }
    }
    map
}

/// Force `label` onto an assembled entry, through `PriceRecord` when it decodes.
fn relabel(entry: Value, label: &str) -> Value {
    if let Ok(mut record) = PriceRecord::deserialize(&entry) {
        record.reference_month = label.to_string();
        if let Ok(v) = serde_json::to_value(&record) {
            return v;
        }
    }
    match entry {
        Value::Object(mut map) => {
            map.insert(REFERENCE_MONTH_KEY.to_string(), Value::String(label.to_string()));
            Value::Object(map)
        }
        other => other,
    }
}

/// Relabel a `{"history": [...]}` payload from the native endpoint. Anything
/// of a different shape is passed through untouched.
fn normalize_native(data: Vec<u8>, today: NaiveDate) -> Vec<u8> {
    let mut root: Value = match serde_json::from_slice(&data) {
        Ok(v) => v,
        Err(_) => return data,
    };
    let Some(items) = root.get_mut("history").and_then(Value::as_array_mut) else {
        return data;
    };

    debug!("normalizing {} history entries (direct)", items.len());
    for (i, item) in items.iter_mut().enumerate() {
        if let Some(obj) = item.as_object_mut() {
            obj.insert(
                REFERENCE_MONTH_KEY.to_string(),
                Value::String(month_label(today, i as u32)),
            );
        }
    }

    serde_json::to_vec(&root).unwrap_or(data)
}

/// Bodies that are not JSON at all are kept as a string so the response
/// stays valid JSON.
fn value_from_body(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
