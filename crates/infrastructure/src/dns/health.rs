use super::message_builder::MessageBuilder;
use async_trait::async_trait;
use ferrous_relay_application::ports::{HealthProbePort, UpstreamExchange};
use ferrous_relay_domain::{DomainError, ProbeResult, ResolverAddr};
use hickory_proto::op::Message;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Measures how fast an upstream answers one A query.
///
/// Any well-formed reply counts as reachable, whatever its response code.
pub struct UdpHealthProber {
    exchange: Arc<dyn UpstreamExchange>,
    probe_domain: String,
}

impl UdpHealthProber {
    pub fn new(exchange: Arc<dyn UpstreamExchange>, probe_domain: &str) -> Result<Self, DomainError> {
        MessageBuilder::build_probe_query(probe_domain)?;
        Ok(Self {
            exchange,
            probe_domain: probe_domain.to_string(),
        })
    }

    async fn probe_once(
        &self,
        server: &ResolverAddr,
        query: &Message,
        timeout: Duration,
    ) -> Result<(), DomainError> {
        tokio::time::timeout(timeout, self.exchange.exchange(server, query, timeout))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.to_string(),
            })??;
        Ok(())
    }
}

#[async_trait]
impl HealthProbePort for UdpHealthProber {
    async fn probe(&self, server: &ResolverAddr, timeout: Duration) -> ProbeResult {
        let query = match MessageBuilder::build_probe_query(&self.probe_domain) {
            Ok(q) => q,
            Err(e) => return ProbeResult::unreachable(server.clone(), Duration::ZERO, e.to_string()),
        };

        let start = Instant::now();
        let result = self.probe_once(server, &query, timeout).await;
        let latency = start.elapsed();

        match result {
            Ok(()) => {
                debug!(server = %server, latency_ms = latency.as_millis() as u64, "Health probe: OK");
                ProbeResult::reachable(server.clone(), latency)
            }
            Err(e) => {
                debug!(server = %server, error = %e, "Health probe: FAILED");
                ProbeResult::unreachable(server.clone(), latency, e.to_string())
            }
        }
    }
}
