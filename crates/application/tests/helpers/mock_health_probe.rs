use async_trait::async_trait;
use ferrous_relay_application::ports::HealthProbePort;
use ferrous_relay_domain::{ProbeResult, ResolverAddr};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Health probe with scripted latencies; `None` (or no entry) means unreachable.
///
/// With `sleeping()` a reachable probe takes its scripted latency in
/// (tokio) time before answering.
#[derive(Clone, Default)]
pub struct MockHealthProbe {
    latencies: Arc<RwLock<HashMap<ResolverAddr, Option<Duration>>>>,
    sleeps: bool,
    probe_count: Arc<AtomicUsize>,
    probed: Arc<RwLock<Vec<ResolverAddr>>>,
}

impl MockHealthProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeping() -> Self {
        Self {
            sleeps: true,
            ..Self::default()
        }
    }

    pub fn set_reachable(&self, server: &ResolverAddr, latency_ms: u64) {
        self.latencies
            .write()
            .unwrap()
            .insert(server.clone(), Some(Duration::from_millis(latency_ms)));
    }

    pub fn set_unreachable(&self, server: &ResolverAddr) {
        self.latencies.write().unwrap().insert(server.clone(), None);
    }

    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::Relaxed)
    }

    pub fn probed(&self) -> Vec<ResolverAddr> {
        self.probed.read().unwrap().clone()
    }
}

#[async_trait]
impl HealthProbePort for MockHealthProbe {
    async fn probe(&self, server: &ResolverAddr, timeout: Duration) -> ProbeResult {
        self.probe_count.fetch_add(1, Ordering::Relaxed);
        self.probed.write().unwrap().push(server.clone());

        let latency = self.latencies.read().unwrap().get(server).copied().flatten();
        match latency {
            Some(latency) => {
                if self.sleeps {
                    tokio::time::sleep(latency).await;
                }
                ProbeResult::reachable(server.clone(), latency)
            }
            None => ProbeResult::unreachable(server.clone(), timeout, "probe timed out"),
        }
    }
}
