// src/config.rs
use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://fipe.parallelum.com.br/api/v2";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HISTORY_MAX_MONTHS: u32 = 60;

pub const BRANDS_TTL: Duration = Duration::from_secs(12 * 60 * 60);
pub const MODELS_TTL: Duration = Duration::from_secs(12 * 60 * 60);
pub const YEARS_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub static_dir: PathBuf,
    pub index_template: PathBuf,
    pub history_max_months: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            static_dir: PathBuf::from("static"),
            index_template: PathBuf::from("templates/index.html"),
            history_max_months: DEFAULT_HISTORY_MAX_MONTHS,
        }
    }
}

pub fn default_user_agent() -> String {
    format!("fipe-bff/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Build the configuration from the process environment.
    /// Call `dotenv().ok()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`, which keeps
    /// tests away from the shared process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(v) => parse_var("PORT", &v)?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                defaults.port
            }
        };

        let base_url = lookup("FIPE_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let timeout = match lookup("FIPE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_var("FIPE_TIMEOUT_SECS", &v)?),
            None => defaults.timeout,
        };

        let history_max_months = match lookup("HISTORY_MAX_MONTHS") {
            Some(v) => {
                let n: u32 = parse_var("HISTORY_MAX_MONTHS", &v)?;
                if n == 0 {
                    return Err(ConfigError::Invalid { var: "HISTORY_MAX_MONTHS", value: v });
                }
                n
            }
            None => defaults.history_max_months,
        };

        Ok(Config {
            port,
            base_url,
            timeout,
            user_agent: lookup("FIPE_USER_AGENT").unwrap_or(defaults.user_agent),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            index_template: lookup("INDEX_TEMPLATE")
                .map(PathBuf::from)
                .unwrap_or(defaults.index_template),
            history_max_months,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.history_max_months, 60);
        assert!(config.user_agent.starts_with("fipe-bff/"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "3030"),
            ("FIPE_BASE_URL", "http://127.0.0.1:9000/api/v2/"),
            ("FIPE_TIMEOUT_SECS", "3"),
            ("HISTORY_MAX_MONTHS", "24"),
            ("STATIC_DIR", "/srv/static"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3030);
        assert_eq!(config.base_url, "http://127.0.0.1:9000/api/v2");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.history_max_months, 24);
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
    }

    #[test]
    fn rejects_garbage_numbers() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid { var: "PORT", value: "eighty".to_string() }
        );

        let err = Config::from_lookup(lookup_from(&[("HISTORY_MAX_MONTHS", "0")])).unwrap_err();
        assert!(err.to_string().contains("HISTORY_MAX_MONTHS"));
    }
}
