//! Server configuration
//!
//! Assembled from CLI flags and environment variables in `main.rs`; the engine
//! never reads the environment itself.

use std::net::SocketAddr;
use std::time::Duration;

use pulse::{ProviderConfig, ProviderKind, PulseConfig};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Origins the browser frontends are served from.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://marketpulse.ai",
    "https://app.marketpulse.ai",
    "https://ai.marketpulse.ai",
    "https://classic.marketpulse.ai",
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:3002",
    "http://localhost:3005",
];

/// Server configuration structure
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
    /// Engine settings
    pub engine: PulseConfig,
    /// Provider chain in priority order
    pub providers: Vec<ProviderConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5003,
            log_level: LogLevel::default(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            engine: PulseConfig::default(),
            providers: pulse_providers::default_provider_configs(),
        }
    }
}

impl ServerConfig {
    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}

/// Raw values collected by the binary's argument parser.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub cors_origins: Option<Vec<String>>,
    /// Cache lifetime in seconds; `0` disables caching.
    pub cache_duration: Option<u64>,
    pub max_workers: Option<usize>,
    /// Per-call provider timeout in seconds.
    pub timeout: Option<u64>,
    /// Provider names in priority order, e.g. `twelve-data,finnhub`.
    pub providers: Option<Vec<String>>,
    pub twelve_data_api_key: Option<String>,
    pub alpha_vantage_api_key: Option<String>,
    pub finnhub_api_key: Option<String>,
    pub polygon_api_key: Option<String>,
}

fn parse_provider(name: &str) -> Result<ProviderKind, ConfigError> {
    ProviderKind::DEFAULT_ORDER
        .iter()
        .copied()
        .find(|k| k.as_str().eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| ConfigError::UnknownProvider(name.to_string()))
}

/// Build configuration by layering CLI/env values over the defaults.
pub fn build_config(args: &CliArgs) -> Result<ServerConfig, ConfigError> {
    let mut config = ServerConfig::default();

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.parse()?;
    }
    if let Some(origins) = &args.cors_origins {
        config.cors_origins = origins.clone();
    }
    if let Some(secs) = args.cache_duration {
        config.engine.cache_ttl = Duration::from_secs(secs);
    }
    if let Some(workers) = args.max_workers {
        if workers == 0 {
            return Err(ConfigError::Zero("MAX_WORKERS"));
        }
        config.engine.max_workers = workers;
    }
    if let Some(secs) = args.timeout {
        if secs == 0 {
            return Err(ConfigError::Zero("TIMEOUT"));
        }
        config.engine.provider_timeout = Duration::from_secs(secs);
    }

    if let Some(names) = &args.providers {
        config.providers = names
            .iter()
            .filter(|n| !n.trim().is_empty())
            .map(|n| parse_provider(n).map(ProviderConfig::new))
            .collect::<Result<_, _>>()?;
    }

    for p in &mut config.providers {
        let key = match p.kind {
            ProviderKind::TwelveData => &args.twelve_data_api_key,
            ProviderKind::AlphaVantage => &args.alpha_vantage_api_key,
            ProviderKind::Finnhub => &args.finnhub_api_key,
            ProviderKind::Polygon => &args.polygon_api_key,
            ProviderKind::YahooFinance => &None,
        };
        if let Some(key) = key.as_ref().filter(|k| !k.is_empty()) {
            p.credential = Some(key.clone());
        }
    }

    Ok(config)
}
