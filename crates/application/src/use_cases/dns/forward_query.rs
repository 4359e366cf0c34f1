use crate::ports::UpstreamExchange;
use crate::services::UpstreamRegistry;
use ferrous_relay_domain::{DomainError, ResolverAddr};
use hickory_proto::op::Message;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct ForwardOutcome {
    pub response: Message,
    pub server: ResolverAddr,
    /// Exchanges attempted, including the successful one.
    pub attempts: usize,
}

/// Relays a client query to the upstream resolvers, preferred one first.
///
/// Candidates come from one registry snapshot taken at the start of the
/// request and are tried strictly one after another. A success on anything
/// but the first candidate promotes that server in the registry.
pub struct ForwardQueryUseCase {
    registry: Arc<UpstreamRegistry>,
    exchange: Arc<dyn UpstreamExchange>,
    timeout: Duration,
}

impl ForwardQueryUseCase {
    pub fn new(
        registry: Arc<UpstreamRegistry>,
        exchange: Arc<dyn UpstreamExchange>,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            exchange,
            timeout,
        }
    }

    pub async fn execute(&self, query: &Message) -> Result<ForwardOutcome, DomainError> {
        let snapshot = self.registry.snapshot();
        let candidates = snapshot.candidates();

        if candidates.is_empty() {
            error!("Upstream registry is empty, cannot forward query");
            return Err(DomainError::NoUpstreamServers);
        }

        debug!(
            servers = candidates.len(),
            preferred = %candidates[0],
            id = query.id(),
            "Forwarding query"
        );

        let mut last_error: Option<DomainError> = None;

        for (position, server) in candidates.iter().enumerate() {
            match self.exchange_bounded(server, query).await {
                Ok(response) => {
                    if position > 0 && self.registry.promote(server) {
                        info!(
                            server = %server,
                            previous = %candidates[0],
                            "Switched preferred upstream server"
                        );
                    }
                    debug!(server = %server, position, rcode = ?response.response_code(), "Upstream responded");
                    return Ok(ForwardOutcome {
                        response,
                        server: (*server).clone(),
                        attempts: position + 1,
                    });
                }
                Err(e) => {
                    warn!(server = %server, error = %e, position, "Upstream exchange failed, failing over");
                    last_error = Some(e);
                }
            }
        }

        let last_error = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no exchange attempted".to_string());
        error!(
            attempts = candidates.len(),
            last_error = %last_error,
            "All upstream servers failed"
        );
        Err(DomainError::TransportAllServersUnreachable {
            attempts: candidates.len(),
            last_error,
        })
    }

    async fn exchange_bounded(
        &self,
        server: &ResolverAddr,
        query: &Message,
    ) -> Result<Message, DomainError> {
        tokio::time::timeout(self.timeout, self.exchange.exchange(server, query, self.timeout))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.to_string(),
            })?
    }
}
