//! Server configuration read from the environment (and `.env` when present).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Context};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8088";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat,
    pub request_timeout: Duration,
    pub cors_origins: CorsOrigins,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing .env file is fine; real environment variables still apply.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let listen_addr = lookup("FL_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("FL_LISTEN_ADDR must be a socket address like 0.0.0.0:8088")?;

        let log_format = match lookup("FL_LOG_FORMAT") {
            None => LogFormat::Text,
            Some(v) if v.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(v) => return Err(anyhow!("FL_LOG_FORMAT must be 'text' or 'json', got '{}'", v)),
        };

        let timeout_secs = match lookup("FL_REQUEST_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("FL_REQUEST_TIMEOUT_SECS is not a number: '{}'", v))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(anyhow!("FL_REQUEST_TIMEOUT_SECS must be greater than zero"));
        }

        let cors_origins = match lookup("FL_CORS_ALLOW_ORIGINS") {
            None => CorsOrigins::Any,
            Some(v) if v.trim() == "*" => CorsOrigins::Any,
            Some(v) => {
                let origins: Vec<String> = v
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                for origin in &origins {
                    origin
                        .parse::<axum::http::HeaderValue>()
                        .with_context(|| format!("Invalid CORS origin '{}'", origin))?;
                }
                CorsOrigins::List(origins)
            }
        };

        Ok(Config {
            listen_addr,
            log_format,
            request_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr.port(), 8088);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FL_LISTEN_ADDR", "127.0.0.1:9000"),
            ("FL_LOG_FORMAT", "JSON"),
            ("FL_REQUEST_TIMEOUT_SECS", "5"),
            (
                "FL_CORS_ALLOW_ORIGINS",
                "https://ops.example.com, https://desk.example.com",
            ),
        ])
        .unwrap();
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![
                "https://ops.example.com".to_string(),
                "https://desk.example.com".to_string()
            ])
        );
    }

    #[test]
    fn test_invalid_values_fail_startup() {
        assert!(config_from(&[("FL_LISTEN_ADDR", "localhost")]).is_err());
        assert!(config_from(&[("FL_LOG_FORMAT", "xml")]).is_err());
        assert!(config_from(&[("FL_REQUEST_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("FL_REQUEST_TIMEOUT_SECS", "soon")]).is_err());
    }
}
