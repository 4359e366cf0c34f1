use async_trait::async_trait;
use ferrous_relay_domain::{ProbeResult, ResolverAddr};
use std::time::Duration;

/// Port for measuring reachability and latency of one resolver.
///
/// Failure is data: a probe never errors, it reports `reachable = false`.
#[async_trait]
pub trait HealthProbePort: Send + Sync {
    async fn probe(&self, server: &ResolverAddr, timeout: Duration) -> ProbeResult;
}
