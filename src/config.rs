use crate::{Error, BASE_URL};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const API_URL_ENV: &str = "BIKEMAP_API_URL";
pub const MAP_TOKEN_ENV: &str = "BIKEMAP_MAP_TOKEN";
pub const LISTEN_ADDR_ENV: &str = "BIKEMAP_LISTEN_ADDR";
pub const DEFAULT_CITY_ENV: &str = "BIKEMAP_DEFAULT_CITY";
pub const TIMEOUT_SECS_ENV: &str = "BIKEMAP_TIMEOUT_SECS";
pub const FOOTER_URL_ENV: &str = "BIKEMAP_FOOTER_URL";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8050";
const DEFAULT_CITY: &str = "Bruxelles";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_FOOTER_URL: &str = "https://github.com/ahmedaazri";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub map_token: Option<String>,
    pub listen_addr: SocketAddr,
    pub default_city: String,
    pub timeout: Duration,
    pub footer_url: String,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr =
            lookup(LISTEN_ADDR_ENV).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = match listen_addr.parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                return Err(Error::Unspecified(format!(
                    "Invalid {} \"{}\" ({}).",
                    LISTEN_ADDR_ENV, listen_addr, err
                )))
            }
        };

        let timeout = match lookup(TIMEOUT_SECS_ENV) {
            Some(secs) => match secs.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(err) => {
                    return Err(Error::Unspecified(format!(
                        "Invalid {} \"{}\" ({}).",
                        TIMEOUT_SECS_ENV, secs, err
                    )))
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Config {
            api_url: lookup(API_URL_ENV).unwrap_or_else(|| BASE_URL.to_string()),
            map_token: lookup(MAP_TOKEN_ENV).filter(|t| !t.trim().is_empty()),
            listen_addr,
            default_city: lookup(DEFAULT_CITY_ENV).unwrap_or_else(|| DEFAULT_CITY.to_string()),
            timeout,
            footer_url: lookup(FOOTER_URL_ENV).unwrap_or_else(|| DEFAULT_FOOTER_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_url, BASE_URL);
        assert_eq!(config.map_token, None);
        assert_eq!(config.listen_addr, "127.0.0.1:8050".parse().unwrap());
        assert_eq!(config.default_city, "Bruxelles");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn reads_overrides() {
        let vars: HashMap<&str, &str> = [
            (API_URL_ENV, "http://localhost:9000"),
            (MAP_TOKEN_ENV, "pk.abc"),
            (LISTEN_ADDR_ENV, "0.0.0.0:9090"),
            (DEFAULT_CITY_ENV, "Paris"),
            (TIMEOUT_SECS_ENV, "5"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.map_token.as_deref(), Some("pk.abc"));
        assert_eq!(config.listen_addr.port(), 9090);
        assert_eq!(config.default_city, "Paris");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = Config::from_lookup(|key| {
            (key == TIMEOUT_SECS_ENV).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Error::Unspecified(_)));
    }
}
