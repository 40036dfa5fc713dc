// src/services/cache.rs
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Vec<u8>,
    expires_at: Instant,
}

/// Upstream payloads keyed by lookup, e.g. `models:cars:23`.
///
/// Expired entries are treated as absent on read and are only replaced by the
/// next `put` for the same key; nothing sweeps the map.
#[derive(Debug, Default)]
pub struct TtlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if Instant::now() > entry.expires_at {
            return None;
        }
        Some(entry.payload.clone())
    }

    pub async fn put(&self, key: impl Into<String>, payload: Vec<u8>, ttl: Duration) {
        let entry = CacheEntry {
            payload,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.into(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn get_after_put_then_expire() {
        let cache = TtlCache::new();
        cache.put("brands:cars", b"[1]".to_vec(), Duration::from_secs(60)).await;
        assert_eq!(cache.get("brands:cars").await, Some(b"[1]".to_vec()));

        tokio::time::advance(Duration::from_secs(60)).await;
        // still valid exactly at the deadline
        assert!(cache.get("brands:cars").await.is_some());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get("brands:cars").await, None);
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let cache = TtlCache::new();
        assert_eq!(cache.get("years:cars:1:2").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn put_overwrites_and_refreshes_ttl() {
        let cache = TtlCache::new();
        cache.put("k", b"old".to_vec(), Duration::from_secs(1)).await;
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("k").await, None);

        cache.put("k", b"new".to_vec(), Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await, Some(b"new".to_vec()));
    }
}
