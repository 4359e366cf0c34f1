use clap::Parser;
use ferrous_relay_application::use_cases::RankingPass;
use ferrous_relay_domain::CliOverrides;
use ferrous_relay_jobs::UpstreamRankingJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-relay")]
#[command(version)]
#[command(about = "Ferrous Relay - DNS forwarder that keeps the fastest upstream in front")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Upstream resolvers, comma separated (e.g. "1.1.1.1,8.8.8.8:53")
    #[arg(short = 'u', long, value_name = "LIST")]
    upstream: Option<String>,

    /// Seconds between upstream ranking passes (0 disables)
    #[arg(short = 't', long = "test-interval", value_name = "SECS")]
    test_interval: Option<u64>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.port,
        bind_address: cli.bind,
        upstream: cli.upstream,
        ranking_interval_secs: cli.test_interval,
        debug: cli.debug,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous Relay v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::report_upstreams(&config);

    let services = di::RelayServices::new(&config)?;

    if services.ranking.has_alternatives() {
        services.ranking.execute(RankingPass::Startup).await;
    } else {
        info!("Single upstream configured, skipping ranking");
    }
    if let Some(preferred) = services.registry.snapshot().preferred() {
        info!(server = %preferred, "Preferred upstream server");
    }

    let shutdown = CancellationToken::new();

    if config.ranking.periodic_enabled() && services.ranking.has_alternatives() {
        Arc::new(
            UpstreamRankingJob::new(services.ranking.clone(), config.ranking.interval())
                .with_cancellation(shutdown.clone()),
        )
        .start();
    }

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        server::wait_for_shutdown().await;
        signal_token.cancel();
    });

    server::start_dns_server(
        config.server.listen_addr(),
        services.handler,
        shutdown,
    )
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
