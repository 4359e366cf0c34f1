pub mod dns;
pub mod upstreams;

pub use dns::{ForwardOutcome, ForwardQueryUseCase, HandleDnsQueryUseCase};
pub use upstreams::{RankUpstreamsUseCase, RankingOutcome, RankingPass};
