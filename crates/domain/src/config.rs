pub mod errors;
pub mod filter;
pub mod logging;
pub mod ranking;
pub mod root;
pub mod server;
pub mod upstream;

pub use errors::ConfigError;
pub use filter::FilterConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use ranking::RankingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
