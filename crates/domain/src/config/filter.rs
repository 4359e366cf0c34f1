use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Drop AAAA answers from every upstream response (IPv4-only resolution).
    #[serde(default = "default_true")]
    pub strip_ipv6: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strip_ipv6: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
