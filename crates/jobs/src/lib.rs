pub mod upstream_ranking;

pub use upstream_ranking::UpstreamRankingJob;
