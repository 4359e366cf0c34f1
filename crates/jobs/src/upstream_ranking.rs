use ferrous_relay_application::use_cases::{RankUpstreamsUseCase, RankingPass};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Re-ranks the upstream resolvers on a fixed interval.
///
/// The first pass runs one full interval after `start`; the startup ranking
/// is expected to have happened before the listener came up.
pub struct UpstreamRankingJob {
    ranking: Arc<RankUpstreamsUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl UpstreamRankingJob {
    pub fn new(ranking: Arc<RankUpstreamsUseCase>, interval: Duration) -> Self {
        Self {
            ranking,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            servers = self.ranking.configured().len(),
            "Starting upstream ranking job"
        );

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("UpstreamRankingJob: shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let outcome = self.ranking.execute(RankingPass::Periodic).await;
                        debug!(
                            reachable = outcome.reachable_count(),
                            installed = outcome.installed.is_some(),
                            "Periodic upstream ranking pass finished"
                        );
                    }
                }
            }
        })
    }
}
