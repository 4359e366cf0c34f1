use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    /// Seconds between periodic ranking passes. `0` disables them.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Name queried (type A) by every health probe.
    #[serde(default = "default_probe_domain")]
    pub probe_domain: String,
}

impl RankingConfig {
    pub fn periodic_enabled(&self) -> bool {
        self.interval_secs > 0
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            probe_timeout_ms: default_probe_timeout_ms(),
            probe_domain: default_probe_domain(),
        }
    }
}

fn default_interval_secs() -> u64 {
    300
}

fn default_probe_timeout_ms() -> u64 {
    3000
}

fn default_probe_domain() -> String {
    "google.com.".to_string()
}
