pub mod rank_upstreams;

pub use rank_upstreams::{RankUpstreamsUseCase, RankingOutcome, RankingPass};
