mod health_probe;
mod upstream_exchange;

pub use health_probe::HealthProbePort;
pub use upstream_exchange::UpstreamExchange;
