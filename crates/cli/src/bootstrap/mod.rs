use ferrous_relay_domain::{CliOverrides, Config, LogFormat, LoggingConfig};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Loads and validates the configuration.
///
/// Runs before logging is initialised; rejected upstream entries are logged
/// afterwards by [`report_upstreams`].
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.effective_level()));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

pub fn report_upstreams(config: &Config) {
    let parsed = config.upstream.parse_servers();

    for (entry, error) in &parsed.rejected {
        warn!(entry = %entry, error = %error, "Ignoring invalid upstream server");
    }
    for duplicate in &parsed.duplicates {
        warn!(server = %duplicate, "Ignoring duplicate upstream server");
    }

    info!(
        servers = ?parsed.resolvers.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        timeout_ms = config.upstream.query_timeout_ms,
        "Upstream servers configured"
    );
}
