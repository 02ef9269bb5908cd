use crate::error::AppError;
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_REGION: &str = "euw1";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 5;
const DEFAULT_CACHE_SIZE: usize = 1024;
const DEFAULT_REQUESTS_PER_SECOND: u32 = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Platform region, e.g. `euw1` or `na1`.
    pub region: String,
    pub network_timeout: Duration,
    pub max_retries: u32,
    pub cache_size: usize,
    pub requests_per_second: u32,
    pub colored_console: bool,
}

impl Config {
    /// Loads settings from the process environment, after reading `.env`
    /// (or `env_file` when given) into it.
    pub fn from_env(env_file: Option<&Path>) -> Result<Self, AppError> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    AppError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
                })?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key-value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("RIOT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
            })?;

        let region = lookup("RIOT_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());

        let timeout_secs = parse_or(&lookup, "RIOT_NETWORK_TIMEOUT", DEFAULT_TIMEOUT_SECS)?;
        let max_retries = parse_or(&lookup, "RIOT_MAX_RETRIES", DEFAULT_MAX_RETRIES)?;
        let cache_size = parse_or(&lookup, "RIOT_CACHE_SIZE", DEFAULT_CACHE_SIZE)?;
        let requests_per_second =
            parse_or(&lookup, "RIOT_REQUESTS_PER_SECOND", DEFAULT_REQUESTS_PER_SECOND)?;

        let colored_console = match lookup("COLORED_CONSOLE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::ConfigError(format!("COLORED_CONSOLE is not a boolean: {}", raw))
            })?,
            None => true,
        };

        if requests_per_second == 0 {
            return Err(AppError::ConfigError(
                "RIOT_REQUESTS_PER_SECOND must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            api_key,
            region: region.trim().to_lowercase(),
            network_timeout: Duration::from_secs(timeout_secs),
            max_retries: max_retries.max(1),
            cache_size,
            requests_per_second,
            colored_console,
        })
    }

    /// Regional routing host used by the account and match endpoints.
    pub fn regional_routing(&self) -> &'static str {
        match self.region.as_str() {
            "na1" | "br1" | "la1" | "la2" => "americas",
            "euw1" | "eun1" | "tr1" | "ru" | "me1" => "europe",
            "kr" | "jp1" => "asia",
            "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
            _ => "europe",
        }
    }
}

#[cfg(test)]
impl Config {
    /// Fast pacing, uncolored output; for tests that drive a mock transport.
    pub fn for_tests() -> Self {
        Config {
            api_key: "RGAPI-test".to_string(),
            region: DEFAULT_REGION.to_string(),
            network_timeout: Duration::from_secs(1),
            max_retries: 3,
            cache_size: DEFAULT_CACHE_SIZE,
            requests_per_second: 10_000,
            colored_console: false,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::ConfigError(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[("RIOT_API_KEY", "RGAPI-test")])).unwrap();
        assert_eq!(config.api_key, "RGAPI-test");
        assert_eq!(config.region, "euw1");
        assert_eq!(config.network_timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.cache_size, 1024);
        assert!(config.colored_console);
        assert_eq!(config.regional_routing(), "europe");
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("RIOT_REGION", "na1")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn parses_overrides_and_booleans() {
        let config = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "k"),
            ("RIOT_REGION", "NA1"),
            ("RIOT_NETWORK_TIMEOUT", "3"),
            ("RIOT_MAX_RETRIES", "2"),
            ("RIOT_CACHE_SIZE", "16"),
            ("COLORED_CONSOLE", "off"),
        ]))
        .unwrap();
        assert_eq!(config.region, "na1");
        assert_eq!(config.regional_routing(), "americas");
        assert_eq!(config.network_timeout, Duration::from_secs(3));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.cache_size, 16);
        assert!(!config.colored_console);
    }

    #[test]
    fn rejects_malformed_numbers_and_flags() {
        let bad_timeout = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "k"),
            ("RIOT_NETWORK_TIMEOUT", "ten"),
        ]));
        assert!(matches!(bad_timeout, Err(AppError::ConfigError(_))));

        let bad_flag = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "k"),
            ("COLORED_CONSOLE", "maybe"),
        ]));
        assert!(matches!(bad_flag, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn zero_retries_still_allows_one_attempt() {
        let config = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "k"),
            ("RIOT_MAX_RETRIES", "0"),
        ]))
        .unwrap();
        assert_eq!(config.max_retries, 1);
    }
}
