#![allow(dead_code)]
#![allow(unused_imports)]

mod messages;
mod mock_health_probe;
mod mock_upstream_exchange;

pub use messages::*;
pub use mock_health_probe::MockHealthProbe;
pub use mock_upstream_exchange::{MockUpstreamExchange, ScriptedReply};
