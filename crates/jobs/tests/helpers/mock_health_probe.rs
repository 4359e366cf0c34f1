use async_trait::async_trait;
use ferrous_relay_application::ports::HealthProbePort;
use ferrous_relay_domain::{ProbeResult, ResolverAddr};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockHealthProbe {
    latencies: Arc<RwLock<HashMap<ResolverAddr, Duration>>>,
    probe_count: Arc<AtomicUsize>,
}

impl MockHealthProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_latency(&self, server: &ResolverAddr, latency_ms: u64) {
        self.latencies
            .write()
            .unwrap()
            .insert(server.clone(), Duration::from_millis(latency_ms));
    }

    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthProbePort for MockHealthProbe {
    async fn probe(&self, server: &ResolverAddr, timeout: Duration) -> ProbeResult {
        self.probe_count.fetch_add(1, Ordering::SeqCst);
        let latency = self.latencies.read().unwrap().get(server).copied();
        match latency {
            Some(latency) => ProbeResult::reachable(server.clone(), latency),
            None => ProbeResult::unreachable(server.clone(), timeout, "probe timed out"),
        }
    }
}
