use async_trait::async_trait;
use ferrous_relay_domain::{DomainError, ResolverAddr};
use hickory_proto::op::Message;
use std::time::Duration;

/// One request/response round trip with a single upstream resolver.
///
/// Implementations must return within `timeout` and report every transport
/// or decoding failure as an error; a well-formed reply is `Ok` whatever its
/// response code. The returned message carries the query's transaction id.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(
        &self,
        server: &ResolverAddr,
        query: &Message,
        timeout: Duration,
    ) -> Result<Message, DomainError>;
}
