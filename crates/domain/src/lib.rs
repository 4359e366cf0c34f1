//! Ferrous Relay Domain Layer
pub mod config;
pub mod errors;
pub mod probe;
pub mod resolver_addr;

pub use config::{
    CliOverrides, Config, ConfigError, FilterConfig, LogFormat, LoggingConfig, RankingConfig,
    ServerConfig, UpstreamConfig,
};
pub use errors::DomainError;
pub use probe::ProbeResult;
pub use resolver_addr::{parse_upstream_list, ParsedUpstreams, ResolverAddr, DEFAULT_DNS_PORT};
