use crate::ports::HealthProbePort;
use crate::services::{
    rank_probe_results, reachable_order, PreferredSelection, RankedOrder, UpstreamRegistry,
};
use ferrous_relay_domain::{ProbeResult, ResolverAddr};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingPass {
    /// Before serving: the fastest server becomes preferred.
    Startup,
    /// In the background: the current preferred server stays preferred while reachable.
    Periodic,
}

#[derive(Debug, Clone)]
pub struct RankingOutcome {
    /// All probe results, best first.
    pub ranked: Vec<ProbeResult>,
    /// What was installed in the registry, `None` when the pass changed nothing.
    pub installed: Option<RankedOrder>,
}

impl RankingOutcome {
    pub fn reachable_count(&self) -> usize {
        self.ranked.iter().filter(|r| r.reachable).count()
    }

    pub fn is_degraded(&self) -> bool {
        self.reachable_count() == 0
    }
}

/// Probe every configured resolver concurrently, rank them, install the result.
///
/// Every configured resolver is probed on each pass, including ones an
/// earlier pass left out, so a recovered server can rejoin the order.
pub struct RankUpstreamsUseCase {
    registry: Arc<UpstreamRegistry>,
    prober: Arc<dyn HealthProbePort>,
    configured: Arc<[ResolverAddr]>,
    probe_timeout: Duration,
}

impl RankUpstreamsUseCase {
    pub fn new(
        registry: Arc<UpstreamRegistry>,
        prober: Arc<dyn HealthProbePort>,
        configured: Vec<ResolverAddr>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            prober,
            configured: configured.into(),
            probe_timeout,
        }
    }

    pub fn configured(&self) -> &[ResolverAddr] {
        &self.configured
    }

    /// Ranking only matters with a choice to make.
    pub fn has_alternatives(&self) -> bool {
        self.configured.len() > 1
    }

    pub async fn execute(&self, pass: RankingPass) -> RankingOutcome {
        info!(
            pass = ?pass,
            servers = self.configured.len(),
            "Probing upstream servers"
        );

        let started = Instant::now();
        let ranked = rank_probe_results(self.probe_all().await);
        let reachable = ranked.iter().filter(|r| r.reachable).count();

        info!(
            reachable,
            total = ranked.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Upstream ranking completed"
        );
        for (i, result) in ranked.iter().enumerate() {
            info!(
                "  [{}] {} - {}ms {}",
                i + 1,
                result.server,
                result.latency_ms(),
                result.status_mark()
            );
        }

        let order = reachable_order(&ranked);
        if order.is_empty() {
            warn!(
                servers = ranked.len(),
                "No upstream server reachable, keeping current order (degraded)"
            );
            return RankingOutcome { ranked, installed: None };
        }

        let selection = match pass {
            RankingPass::Startup => PreferredSelection::First,
            RankingPass::Periodic => PreferredSelection::KeepCurrent,
        };
        let installed = self.registry.install(order, selection);
        if let Some(plan) = &installed {
            info!(
                order = ?plan.order.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                preferred = %plan.preferred_server(),
                "Upstream order updated"
            );
        }

        RankingOutcome { ranked, installed }
    }

    async fn probe_all(&self) -> Vec<ProbeResult> {
        join_all(
            self.configured
                .iter()
                .map(|server| self.prober.probe(server, self.probe_timeout)),
        )
        .await
    }
}
