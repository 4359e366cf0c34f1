use super::message_builder::MessageBuilder;
use super::transport::{resolver, UdpTransport};
use async_trait::async_trait;
use ferrous_relay_application::ports::UpstreamExchange;
use ferrous_relay_domain::{DomainError, ResolverAddr};
use hickory_proto::op::{Message, MessageType};
use std::time::Duration;
use tracing::debug;

/// Plain-UDP exchange with one upstream resolver.
///
/// The query goes out under a fresh random ID; the reply is checked against
/// it and handed back carrying the caller's original ID.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpUpstreamExchange;

impl UdpUpstreamExchange {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UpstreamExchange for UdpUpstreamExchange {
    async fn exchange(
        &self,
        server: &ResolverAddr,
        query: &Message,
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let target = resolver::resolve_server(server, timeout).await?;

        let mut outbound = query.clone();
        outbound.set_id(fastrand::u16(..));
        let bytes = MessageBuilder::serialize_message(&outbound)?;

        let transport = UdpTransport::new(target);
        let response = transport.send(&bytes, timeout).await?;

        let mut message = Message::from_vec(&response).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Undecodable reply from {}: {}", server, e))
        })?;
        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Reply from {} is not a response",
                server
            )));
        }

        debug!(
            server = %server,
            upstream_id = outbound.id(),
            client_id = query.id(),
            answers = message.answers().len(),
            "Upstream exchange completed"
        );

        message.set_id(query.id());
        Ok(message)
    }
}
