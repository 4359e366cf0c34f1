use ferrous_relay_application::services::UpstreamRegistry;
use ferrous_relay_application::use_cases::{
    ForwardQueryUseCase, HandleDnsQueryUseCase, RankUpstreamsUseCase,
};
use ferrous_relay_domain::Config;
use ferrous_relay_infrastructure::dns::{DnsServerHandler, UdpHealthProber, UdpUpstreamExchange};
use std::sync::Arc;

/// Everything the relay needs at runtime, wired from the configuration.
pub struct RelayServices {
    pub registry: Arc<UpstreamRegistry>,
    pub ranking: Arc<RankUpstreamsUseCase>,
    pub handler: Arc<DnsServerHandler>,
}

impl RelayServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let resolvers = config.upstream.parse_servers().resolvers;
        if resolvers.is_empty() {
            anyhow::bail!("No valid upstream servers configured");
        }

        let registry = Arc::new(UpstreamRegistry::new(resolvers.clone()));
        let exchange = Arc::new(UdpUpstreamExchange::new());

        let prober = Arc::new(UdpHealthProber::new(
            exchange.clone(),
            &config.ranking.probe_domain,
        )?);
        let ranking = Arc::new(RankUpstreamsUseCase::new(
            registry.clone(),
            prober,
            resolvers,
            config.ranking.probe_timeout(),
        ));

        let forwarder = Arc::new(ForwardQueryUseCase::new(
            registry.clone(),
            exchange,
            config.upstream.query_timeout(),
        ));
        let handle_query = Arc::new(HandleDnsQueryUseCase::new(
            forwarder,
            config.filter.strip_ipv6,
        ));
        let handler = Arc::new(DnsServerHandler::new(handle_query));

        Ok(Self {
            registry,
            ranking,
            handler,
        })
    }
}
