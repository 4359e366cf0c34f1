use ferrous_relay_domain::{DomainError, ResolverAddr};
use std::net::SocketAddr;
use std::time::Duration;

/// Socket address to send to: the literal itself, or the first address the
/// system resolver returns for a hostname.
pub async fn resolve_server(
    server: &ResolverAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    if let Some(addr) = server.socket_addr() {
        return Ok(addr);
    }

    let host = server
        .as_str()
        .rsplit_once(':')
        .map(|(host, _)| host)
        .unwrap_or(server.as_str());

    let target = format!("{}:{}", host, server.port());

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| {
            DomainError::InvalidResolverAddress(format!(
                "DNS resolution failed for {}: {}",
                target, e
            ))
        })?;

    addrs.next().ok_or_else(|| {
        DomainError::InvalidResolverAddress(format!("No addresses found for {}", target))
    })
}
