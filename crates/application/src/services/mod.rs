pub mod ipv6_filter;
pub mod ranking;
pub mod reply;
pub mod upstream_registry;

pub use ipv6_filter::Ipv6AnswerFilter;
pub use ranking::{preferred_position, rank_probe_results, reachable_order, RankedOrder};
pub use reply::error_reply;
pub use upstream_registry::{PreferredSelection, RegistrySnapshot, UpstreamRegistry};
