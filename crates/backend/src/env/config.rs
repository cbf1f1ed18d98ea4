use anyhow::{anyhow, Result};
use std::{
    env,
    fmt::Display,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
    time::Duration,
};

use crate::constants::source::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Server configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// Upper bound on buffered upstream bodies. `None` reads bodies of any size.
    pub max_body_bytes: Option<usize>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            fetch: FetchConfig::default(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = FetchConfig::default();

        let timeout_secs: u64 = parse_var(&lookup, "FETCH_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(anyhow!("FETCH_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Self {
            host: parse_var(&lookup, "HOST")?.unwrap_or_else(default_host),
            port: parse_var(&lookup, "PORT")?.unwrap_or_else(default_port),
            fetch: FetchConfig {
                timeout: Duration::from_secs(timeout_secs),
                user_agent: lookup("FETCH_USER_AGENT")
                    .filter(|ua| !ua.trim().is_empty())
                    .unwrap_or(defaults.user_agent),
                max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES")?,
            },
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow!("Invalid {} value {:?}: {}", key, value, e)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.fetch.timeout, Duration::from_secs(10));
        assert_eq!(
            config.fetch.user_agent,
            "Mozilla/5.0 (compatible; SourceViewer/1.0)"
        );
        assert_eq!(config.fetch.max_body_bytes, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("FETCH_TIMEOUT_SECS", "3"),
            ("FETCH_USER_AGENT", "probe/2.0"),
            ("MAX_BODY_BYTES", "1048576"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.fetch.timeout, Duration::from_secs(3));
        assert_eq!(config.fetch.user_agent, "probe/2.0");
        assert_eq!(config.fetch.max_body_bytes, Some(1_048_576));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("PORT", " "), ("FETCH_USER_AGENT", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.fetch.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_invalid_port_names_variable() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(config_from(&[("FETCH_TIMEOUT_SECS", "0")]).is_err());
    }
}
