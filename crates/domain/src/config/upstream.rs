use crate::resolver_addr::{parse_upstream_list, ParsedUpstreams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Resolver addresses; each entry may also be a comma-separated list.
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// Per-exchange timeout when relaying a client query.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn parse_servers(&self) -> ParsedUpstreams {
        parse_upstream_list(&self.servers)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string()]
}

fn default_query_timeout_ms() -> u64 {
    5000
}
