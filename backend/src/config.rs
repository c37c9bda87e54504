//! Runtime settings read from the environment.
//!
//! Unset or unparsable values fall back to the defaults below.

use common::model::settings::DEFAULT_API_BASE;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_NAME_HOST: &str = "SOURCEFILL_HOST";
pub const ENV_NAME_PORT: &str = "SOURCEFILL_PORT";
pub const ENV_NAME_DB: &str = "SOURCEFILL_DB";
pub const ENV_NAME_API_BASE: &str = "SOURCEFILL_API_BASE";
pub const ENV_NAME_DEBOUNCE_MS: &str = "SOURCEFILL_DEBOUNCE_MS";
pub const ENV_NAME_FETCH_TIMEOUT_SECS: &str = "SOURCEFILL_FETCH_TIMEOUT_SECS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB: &str = "sourcefill.sqlite";
const DEFAULT_DEBOUNCE_MS: u64 = 600;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub api_base: String,
    /// Quiet period before state changes are emitted to the host.
    pub debounce: Duration,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var(ENV_NAME_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parsed(ENV_NAME_PORT, DEFAULT_PORT),
            db_path: env::var(ENV_NAME_DB)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB)),
            api_base: env::var(ENV_NAME_API_BASE).unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            debounce: Duration::from_millis(parsed(ENV_NAME_DEBOUNCE_MS, DEFAULT_DEBOUNCE_MS)),
            fetch_timeout: Duration::from_secs(parsed(
                ENV_NAME_FETCH_TIMEOUT_SECS,
                DEFAULT_FETCH_TIMEOUT_SECS,
            )),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .map_err(|_| ())
        .and_then(|val| T::from_str(val.trim()).map_err(|_| ()))
        .unwrap_or(default)
}
