#![allow(dead_code)]

mod mock_health_probe;

pub use mock_health_probe::MockHealthProbe;
