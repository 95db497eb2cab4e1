//! Daemon configuration from `PROMPTMOCK_*` environment variables

use promptmock_api_http::HttpServerConfig;
use promptmock_core::application::worker::constants::{
    DEFAULT_MAX_DELAY_SECS, DEFAULT_MIN_DELAY_SECS,
};
use promptmock_core::{AppError, Result};
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_SOURCE_IMAGE: &str = "resources/image.jpg";
const DEFAULT_OUTPUT_DIR: &str = "outputs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub http: HttpServerConfig,
    pub source_image: PathBuf,
    pub output_dir: PathBuf,
    pub min_delay_secs: u64,
    pub max_delay_secs: u64,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup (tests pass a map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HttpServerConfig::default();
        let http = HttpServerConfig {
            host: lookup("PROMPTMOCK_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PROMPTMOCK_PORT", defaults.port)?,
        };

        let min_delay_secs = parse_or(&lookup, "PROMPTMOCK_MIN_DELAY_SECS", DEFAULT_MIN_DELAY_SECS)?;
        let max_delay_secs = parse_or(&lookup, "PROMPTMOCK_MAX_DELAY_SECS", DEFAULT_MAX_DELAY_SECS)?;
        if min_delay_secs > max_delay_secs {
            return Err(AppError::Config(format!(
                "PROMPTMOCK_MIN_DELAY_SECS ({}) exceeds PROMPTMOCK_MAX_DELAY_SECS ({})",
                min_delay_secs, max_delay_secs
            )));
        }

        let log_format = match lookup("PROMPTMOCK_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "PROMPTMOCK_LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            http,
            source_image: expand_path(lookup("PROMPTMOCK_SOURCE_IMAGE"), DEFAULT_SOURCE_IMAGE),
            output_dir: expand_path(lookup("PROMPTMOCK_OUTPUT_DIR"), DEFAULT_OUTPUT_DIR),
            min_delay_secs,
            max_delay_secs,
            log_format,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has invalid value '{}'", key, raw))),
    }
}

fn expand_path(value: Option<String>, default: &str) -> PathBuf {
    let raw = value.unwrap_or_else(|| default.to_string());
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
