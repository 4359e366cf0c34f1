pub mod exchange;
pub mod health;
pub mod listener;
pub mod message_builder;
pub mod server;
pub mod transport;

pub use exchange::UdpUpstreamExchange;
pub use health::UdpHealthProber;
pub use listener::serve_udp;
pub use message_builder::MessageBuilder;
pub use server::DnsServerHandler;
