//! MarketPulse stock data server.

use clap::Parser;
use pulse::PulseConnector as _;
use pulse_server::config::{CliArgs, build_config};
use pulse_server::server::{Server, build_pulse};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Multi-provider stock quote API
#[derive(Parser, Debug)]
#[command(name = "pulse-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Host address to bind to
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Allowed CORS origins, comma separated
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Option<Vec<String>>,

    /// Cache lifetime in seconds (0 disables caching)
    #[arg(long, env = "CACHE_DURATION")]
    cache_duration: Option<u64>,

    /// Shared worker pool size
    #[arg(long, env = "MAX_WORKERS")]
    max_workers: Option<usize>,

    /// Per-call provider timeout in seconds
    #[arg(long, env = "TIMEOUT")]
    timeout: Option<u64>,

    /// Provider chain in priority order, comma separated
    #[arg(long, env = "PROVIDERS", value_delimiter = ',')]
    providers: Option<Vec<String>>,

    #[arg(long, env = "TWELVE_DATA_API_KEY", hide_env_values = true)]
    twelve_data_api_key: Option<String>,

    #[arg(long, env = "ALPHA_VANTAGE_API_KEY", hide_env_values = true)]
    alpha_vantage_api_key: Option<String>,

    #[arg(long, env = "FINNHUB_API_KEY", hide_env_values = true)]
    finnhub_api_key: Option<String>,

    #[arg(long, env = "POLYGON_API_KEY", hide_env_values = true)]
    polygon_api_key: Option<String>,
}

impl From<Args> for CliArgs {
    fn from(args: Args) -> Self {
        CliArgs {
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            cors_origins: args.cors_origins,
            cache_duration: args.cache_duration,
            max_workers: args.max_workers,
            timeout: args.timeout,
            providers: args.providers,
            twelve_data_api_key: args.twelve_data_api_key,
            alpha_vantage_api_key: args.alpha_vantage_api_key,
            finnhub_api_key: args.finnhub_api_key,
            polygon_api_key: args.polygon_api_key,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli_args: CliArgs = Args::parse().into();
    let config = build_config(&cli_args)?;

    init_tracing(config.log_level.as_filter_str());

    let metrics = pulse_server::metrics::install_recorder()?;
    let pulse = build_pulse(&config)?;

    let providers: Vec<String> = pulse
        .connectors()
        .iter()
        .map(|c| format!("{} ({})", c.name(), c.vendor()))
        .collect();
    tracing::info!(
        version = pulse_server::VERSION,
        port = config.port,
        cache_ttl_secs = config.engine.cache_ttl.as_secs(),
        max_workers = config.engine.max_workers,
        ?providers,
        "starting stock data server"
    );

    Server::new(config, pulse, Some(metrics)).run().await
}
