use crate::resolver_addr::ResolverAddr;
use std::time::Duration;

/// Outcome of a single health probe against one resolver.
///
/// Produced by the health prober and consumed right away by the ranking pass;
/// an unreachable resolver is still reported with the time spent waiting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub server: ResolverAddr,
    pub latency: Duration,
    pub reachable: bool,
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn reachable(server: ResolverAddr, latency: Duration) -> Self {
        Self {
            server,
            latency,
            reachable: true,
            error: None,
        }
    }

    pub fn unreachable(server: ResolverAddr, latency: Duration, error: impl Into<String>) -> Self {
        Self {
            server,
            latency,
            reachable: false,
            error: Some(error.into()),
        }
    }

    pub fn latency_ms(&self) -> u64 {
        self.latency.as_millis() as u64
    }

    /// `✓` for reachable, `✗` otherwise. Used in ranking summaries.
    pub fn status_mark(&self) -> &'static str {
        if self.reachable {
            "✓"
        } else {
            "✗"
        }
    }
}
