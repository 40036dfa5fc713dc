// src/services/fetcher.rs
use log::debug;
use reqwest::{Client, StatusCode};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("external API returned status: {status} for url: {url}")]
    Status { status: u16, url: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Single-GET helper shared by every handler and by the history fan-out.
/// Clones share the same connection pool.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Fetcher { client })
    }

    /// GET `url` and return the body. Anything but 200 is an error.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().await.map_err(transport)?;
        if resp.status() != StatusCode::OK {
            return Err(FetchError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code_and_url() {
        let err = FetchError::Status {
            status: 404,
            url: "http://upstream/cars/brands".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "external API returned status: 404 for url: http://upstream/cars/brands"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let fetcher = Fetcher::new(Duration::from_secs(1), "fipe-bff/test").unwrap();
        // Port 9 (discard) on loopback is closed on any sane test machine.
        let err = fetcher.fetch("http://127.0.0.1:9/cars/brands").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(err.to_string().contains("127.0.0.1:9"));
    }
}
