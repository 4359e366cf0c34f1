use ferrous_relay_domain::{ProbeResult, ResolverAddr};
use std::cmp::Ordering;

/// Order probe results best-first.
///
/// Reachable servers come first, fastest first; unreachable servers keep
/// their input order. The sort is stable, so ranking the same results twice
/// gives the same order.
pub fn rank_probe_results(mut results: Vec<ProbeResult>) -> Vec<ProbeResult> {
    results.sort_by(|a, b| match (a.reachable, b.reachable) {
        (true, true) => a.latency.cmp(&b.latency),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    });
    results
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedOrder {
    pub order: Vec<ResolverAddr>,
    pub preferred: usize,
}

impl RankedOrder {
    pub fn preferred_server(&self) -> &ResolverAddr {
        &self.order[self.preferred]
    }
}

/// Reachable servers in ranked order; empty when nothing answered.
pub fn reachable_order(ranked: &[ProbeResult]) -> Vec<ResolverAddr> {
    ranked
        .iter()
        .filter(|r| r.reachable)
        .map(|r| r.server.clone())
        .collect()
}

/// Position of `keep` in `order`, falling back to the first server.
pub fn preferred_position(order: &[ResolverAddr], keep: Option<&ResolverAddr>) -> usize {
    keep.and_then(|k| order.iter().position(|s| s == k))
        .unwrap_or(0)
}
